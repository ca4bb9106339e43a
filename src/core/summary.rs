//! 計測結果の集計型
//!
//! 戦略ごとの統計値とベンチマーク全体のレポートを保持する。

use super::types::{ArgumentMode, StrategyKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 経過時間を1オペレーションあたりのナノ秒に正規化
///
/// N = 0 の場合は割る対象がないため 0.0 を返す。
pub fn nanos_per_op(elapsed: Duration, operation_count: usize) -> f64 {
    if operation_count == 0 {
        0.0
    } else {
        elapsed.as_secs_f64() * 1e9 / operation_count as f64
    }
}

/// 戦略ごとの統計値（単位はすべて ns/op）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStats {
    pub strategy: StrategyKind,
    pub label: String,
    pub operation_count: usize,
    pub sample_count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub total_elapsed: Duration,
}

impl StrategyStats {
    /// 試行ごとの経過時間から統計値を算出
    pub fn from_samples(strategy: StrategyKind, operation_count: usize, samples: &[Duration]) -> Self {
        let per_op: Vec<f64> = samples
            .iter()
            .map(|elapsed| nanos_per_op(*elapsed, operation_count))
            .collect();
        let sample_count = per_op.len();

        let (mean, min, max, variance) = if sample_count == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let mean = per_op.iter().sum::<f64>() / sample_count as f64;
            let min = per_op.iter().copied().fold(f64::INFINITY, f64::min);
            let max = per_op.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            // 標本分散（不偏）
            let variance = if sample_count > 1 {
                per_op.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (sample_count - 1) as f64
            } else {
                0.0
            };
            (mean, min, max, variance)
        };

        Self {
            strategy,
            label: strategy.label().to_string(),
            operation_count,
            sample_count,
            mean,
            min,
            max,
            variance,
            std_dev: variance.sqrt(),
            total_elapsed: samples.iter().sum(),
        }
    }

    /// 平均値から求めたスループット（ops/sec）
    pub fn throughput(&self) -> f64 {
        if self.mean > 0.0 {
            1e9 / self.mean
        } else {
            0.0
        }
    }
}

/// 戦略ごとの計測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrategyOutcome {
    Measured(StrategyStats),
    Failed {
        strategy: StrategyKind,
        reason: String,
    },
}

impl StrategyOutcome {
    pub fn strategy(&self) -> StrategyKind {
        match self {
            Self::Measured(stats) => stats.strategy,
            Self::Failed { strategy, .. } => *strategy,
        }
    }

    pub fn stats(&self) -> Option<&StrategyStats> {
        match self {
            Self::Measured(stats) => Some(stats),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// ベンチマーク全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timestamp: DateTime<Utc>,
    pub operation_count: usize,
    pub trials: usize,
    pub warmup_trials: usize,
    pub argument_mode: ArgumentMode,
    pub outcomes: Vec<StrategyOutcome>,
}

impl BenchmarkReport {
    pub fn new(
        operation_count: usize,
        trials: usize,
        warmup_trials: usize,
        argument_mode: ArgumentMode,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation_count,
            trials,
            warmup_trials,
            argument_mode,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: StrategyOutcome) {
        self.outcomes.push(outcome);
    }

    /// 正当性違反などで失敗した戦略があるか
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(StrategyOutcome::is_failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StrategyOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failed())
    }

    pub fn measured(&self) -> impl Iterator<Item = &StrategyStats> {
        self.outcomes.iter().filter_map(StrategyOutcome::stats)
    }

    pub fn stats_for(&self, kind: StrategyKind) -> Option<&StrategyStats> {
        self.measured().find(|stats| stats.strategy == kind)
    }

    /// 平均 ns/op が最小の戦略
    pub fn fastest(&self) -> Option<&StrategyStats> {
        self.measured().min_by(|a, b| a.mean.total_cmp(&b.mean))
    }

    /// baseline に対する相対速度（1.0 より大きければ baseline より速い）
    pub fn relative_speed(&self, kind: StrategyKind, baseline: StrategyKind) -> Option<f64> {
        let target = self.stats_for(kind)?;
        let base = self.stats_for(baseline)?;
        if target.mean > 0.0 {
            Some(base.mean / target.mean)
        } else {
            None
        }
    }
}
