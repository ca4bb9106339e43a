// レポート永続化機能
// 計測結果のJSON出力と読み込み

pub mod implementations;

// 公開API
pub use implementations::{export_json_report, load_json_report};
