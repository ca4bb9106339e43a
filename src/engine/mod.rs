// エンジン層 - 戦略の逐次計測とオーケストレーション
// サービス層と戦略層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod benchmark_runner;

// 公開API - 主要エンジンクラス
pub use api::{create_default_runner, create_quiet_runner, run_with_runner};
pub use benchmark_runner::BenchmarkRunner;
