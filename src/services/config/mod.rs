// 設定管理機能
// ベンチマーク設定の既定値、ビルダー、検証

pub mod implementations;

// 公開API
pub use implementations::{
    validate_config, DefaultBenchmarkConfig, DEFAULT_OPERATION_COUNT, DEFAULT_TRIALS,
    DEFAULT_WARMUP_TRIALS,
};
