// 高レベル公開API
// BenchmarkRunnerを簡単に使用できるようにするための便利な関数

use super::BenchmarkRunner;
use crate::{
    core::{error::BenchResult, BenchmarkConfig, BenchmarkReport, ProgressReporter},
    services::{ConsoleProgressReporter, DefaultBenchmarkConfig, NoOpProgressReporter},
};

/// 設定済みBenchmarkRunnerで全戦略を計測
pub fn run_with_runner<C, R>(runner: &BenchmarkRunner<C, R>) -> BenchResult<BenchmarkReport>
where
    C: BenchmarkConfig,
    R: ProgressReporter,
{
    runner.run()
}

/// デフォルト設定・コンソール出力のランナーを作成
pub fn create_default_runner() -> BenchResult<BenchmarkRunner<DefaultBenchmarkConfig, ConsoleProgressReporter>> {
    BenchmarkRunner::new(DefaultBenchmarkConfig::default(), ConsoleProgressReporter::new())
}

/// 静音ランナーを作成（テスト・ライブラリ利用向け）
pub fn create_quiet_runner(
    config: DefaultBenchmarkConfig,
) -> BenchResult<BenchmarkRunner<DefaultBenchmarkConfig, NoOpProgressReporter>> {
    BenchmarkRunner::new(config, NoOpProgressReporter::new())
}
