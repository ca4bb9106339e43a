// サービス層 - 機能別の周辺処理
// 設定・進捗報告・レポート永続化をそれぞれ独立して提供

pub mod config;
pub mod monitoring;
pub mod persistence;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{validate_config, DefaultBenchmarkConfig, DEFAULT_OPERATION_COUNT};
pub use monitoring::{render_summary, ConsoleProgressReporter, NoOpProgressReporter};
pub use persistence::{export_json_report, load_json_report};
