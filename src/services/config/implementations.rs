// 設定管理の具象実装

use crate::core::{
    ArgumentMode, BenchmarkConfig, StrategyKind, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

/// 1回の戦略実行あたりの既定呼び出し回数
pub const DEFAULT_OPERATION_COUNT: usize = 10_000;

/// 既定の計測試行回数
pub const DEFAULT_TRIALS: usize = 20;

/// 既定のウォームアップ回数
pub const DEFAULT_WARMUP_TRIALS: usize = 3;

/// デフォルト設定実装
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBenchmarkConfig {
    operation_count: usize,
    trials: usize,
    warmup_trials: usize,
    argument_mode: ArgumentMode,
    strategies: Vec<StrategyKind>,
}

impl DefaultBenchmarkConfig {
    pub fn new(operation_count: usize) -> Self {
        Self {
            operation_count,
            ..Self::default()
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_warmup_trials(mut self, warmup_trials: usize) -> Self {
        self.warmup_trials = warmup_trials;
        self
    }

    pub fn with_argument_mode(mut self, argument_mode: ArgumentMode) -> Self {
        self.argument_mode = argument_mode;
        self
    }

    /// 計測対象を絞り込む。重複は最初の出現だけを残す
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = StrategyKind>) -> Self {
        self.strategies.clear();
        for kind in strategies {
            if !self.strategies.contains(&kind) {
                self.strategies.push(kind);
            }
        }
        self
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_config(self)
    }
}

impl Default for DefaultBenchmarkConfig {
    fn default() -> Self {
        Self {
            operation_count: DEFAULT_OPERATION_COUNT,
            trials: DEFAULT_TRIALS,
            warmup_trials: DEFAULT_WARMUP_TRIALS,
            argument_mode: ArgumentMode::default(),
            strategies: StrategyKind::ALL.to_vec(),
        }
    }
}

impl BenchmarkConfig for DefaultBenchmarkConfig {
    fn operation_count(&self) -> usize {
        self.operation_count
    }

    fn trials(&self) -> usize {
        self.trials
    }

    fn warmup_trials(&self) -> usize {
        self.warmup_trials
    }

    fn argument_mode(&self) -> ArgumentMode {
        self.argument_mode
    }

    fn strategies(&self) -> Vec<StrategyKind> {
        self.strategies.clone()
    }
}

/// 任意の設定実装を検証
pub fn validate_config<C: BenchmarkConfig + ?Sized>(config: &C) -> ValidationResult<()> {
    if config.trials() == 0 {
        return Err(ValidationError::new("trials", "1以上である必要があります"));
    }

    if i64::try_from(config.operation_count()).is_err() {
        return Err(ValidationError::new(
            "operation_count",
            format!("{} 以下である必要があります", i64::MAX),
        ));
    }

    let strategies = config.strategies();
    if strategies.is_empty() {
        return Err(ValidationError::new(
            "strategies",
            "少なくとも1つの戦略を指定してください",
        ));
    }
    for (index, kind) in strategies.iter().enumerate() {
        if strategies[..index].contains(kind) {
            return Err(ValidationError::new(
                "strategies",
                format!("戦略が重複しています: {kind}"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockBenchmarkConfig;

    #[test]
    fn test_default_benchmark_config() {
        let config = DefaultBenchmarkConfig::default();

        assert_eq!(config.operation_count(), 10_000);
        assert_eq!(config.trials(), DEFAULT_TRIALS);
        assert_eq!(config.warmup_trials(), DEFAULT_WARMUP_TRIALS);
        assert_eq!(config.argument_mode(), ArgumentMode::Reuse);
        assert_eq!(config.strategies(), StrategyKind::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_benchmark_config_builder() {
        let config = DefaultBenchmarkConfig::new(100)
            .with_trials(5)
            .with_warmup_trials(0)
            .with_argument_mode(ArgumentMode::Fresh)
            .with_strategies([
                StrategyKind::Reflective,
                StrategyKind::Direct,
                StrategyKind::Reflective,
            ]);

        assert_eq!(config.operation_count(), 100);
        assert_eq!(config.trials(), 5);
        assert_eq!(config.warmup_trials(), 0);
        assert_eq!(config.argument_mode(), ArgumentMode::Fresh);
        assert_eq!(
            config.strategies(),
            vec![StrategyKind::Reflective, StrategyKind::Direct]
        );
    }

    #[test]
    fn test_zero_operation_count_is_valid() {
        assert!(DefaultBenchmarkConfig::new(0).validate().is_ok());
    }

    #[test]
    fn test_zero_trials_is_rejected() {
        let error = DefaultBenchmarkConfig::default()
            .with_trials(0)
            .validate()
            .unwrap_err();
        assert_eq!(error.field, "trials");
    }

    #[test]
    fn test_empty_strategies_is_rejected() {
        let error = DefaultBenchmarkConfig::default()
            .with_strategies(Vec::new())
            .validate()
            .unwrap_err();
        assert_eq!(error.field, "strategies");
    }

    #[test]
    fn test_validate_custom_config_implementation() {
        let mut config = MockBenchmarkConfig::new();
        config.expect_trials().return_const(1_usize);
        config.expect_operation_count().return_const(10_usize);
        config
            .expect_strategies()
            .returning(|| vec![StrategyKind::Direct, StrategyKind::Direct]);

        let error = validate_config(&config).unwrap_err();
        assert_eq!(error.field, "strategies");
        assert!(error.reason.contains("DirectCall"));
    }
}
