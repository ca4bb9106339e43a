// ベンチマークシステムのトレイト定義
// 設定・進捗報告・呼び出し戦略の抽象化インターフェース

use super::error::BenchResult;
use super::summary::{BenchmarkReport, StrategyStats};
use super::types::{ArgumentMode, CallCounter, StrategyKind};
use mockall::automock;

/// ベンチマーク設定を抽象化するトレイト
#[automock]
pub trait BenchmarkConfig {
    /// 1回の戦略実行あたりのオペレーション呼び出し回数 (N)
    fn operation_count(&self) -> usize;

    /// 記録対象の試行回数
    fn trials(&self) -> usize;

    /// 記録しないウォームアップ試行回数
    fn warmup_trials(&self) -> usize;

    /// 遅延束縛呼び出しの引数バッファモード
    fn argument_mode(&self) -> ArgumentMode;

    /// 計測対象の戦略
    fn strategies(&self) -> Vec<StrategyKind>;
}

/// 進捗報告の抽象化トレイト
#[automock]
pub trait ProgressReporter {
    /// セットアップ（コンパイル）完了時の報告
    fn report_setup(&self, operation_count: usize, strategies: &[StrategyKind]);

    /// 戦略の計測開始時の報告
    fn report_strategy_started(&self, kind: StrategyKind, trials: usize);

    /// 1試行ごとの報告
    fn report_trial(&self, kind: StrategyKind, trial: usize, nanos_per_op: f64);

    /// 戦略の計測失敗時の報告
    fn report_failure(&self, kind: StrategyKind, reason: &str);

    /// 戦略の計測完了時の報告
    fn report_strategy_completed(&self, stats: &StrategyStats);

    /// 全体完了時の報告
    fn report_completed(&self, report: &BenchmarkReport);
}

impl ProgressReporter for Box<dyn ProgressReporter> {
    fn report_setup(&self, operation_count: usize, strategies: &[StrategyKind]) {
        self.as_ref().report_setup(operation_count, strategies)
    }

    fn report_strategy_started(&self, kind: StrategyKind, trials: usize) {
        self.as_ref().report_strategy_started(kind, trials)
    }

    fn report_trial(&self, kind: StrategyKind, trial: usize, nanos_per_op: f64) {
        self.as_ref().report_trial(kind, trial, nanos_per_op)
    }

    fn report_failure(&self, kind: StrategyKind, reason: &str) {
        self.as_ref().report_failure(kind, reason)
    }

    fn report_strategy_completed(&self, stats: &StrategyStats) {
        self.as_ref().report_strategy_completed(stats)
    }

    fn report_completed(&self, report: &BenchmarkReport) {
        self.as_ref().report_completed(report)
    }
}

/// 計測対象の呼び出し方式
///
/// `execute` は1回の呼び出しで内部的にオペレーションをちょうど N 回呼ぶ。
/// N は戦略の構築時に固定され、実行時には変更できない。
#[automock]
pub trait CallStrategy {
    /// 戦略の種別
    fn kind(&self) -> StrategyKind;

    /// N 回分の呼び出しを1回で実行
    fn execute(&mut self, counter: &mut CallCounter) -> BenchResult<()>;
}
