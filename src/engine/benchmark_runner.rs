// BenchmarkRunner - 呼び出し戦略の計測と正当性検証
// 設定と進捗報告をコンストラクタで注入し、戦略を1つずつ逐次計測する

use crate::{
    core::{
        nanos_per_op, BenchError, BenchResult, BenchmarkConfig, BenchmarkReport, CallCounter,
        CallStrategy, ProgressReporter, StrategyOutcome, StrategyStats,
    },
    expression::{ClosureCompiler, ExpressionCompiler, InterpretingCompiler},
    services::{export_json_report, validate_config},
    strategies::StrategyFactory,
};
use std::path::Path;
use std::time::{Duration, Instant};

/// 呼び出し戦略のベンチマークランナー
///
/// N（1回の戦略実行あたりの呼び出し回数）は構築時に設定から一度だけ読み取り、
/// セットアップ・検証・正規化のすべてで同じ値を使う。
/// 戦略は同時に実行せず、常に1つずつ計測する。
pub struct BenchmarkRunner<C, R> {
    config: C,
    reporter: R,
    operation_count: usize,
}

impl<C, R> BenchmarkRunner<C, R>
where
    C: BenchmarkConfig,
    R: ProgressReporter,
{
    /// 設定を検証してランナーを作成
    pub fn new(config: C, reporter: R) -> BenchResult<Self> {
        validate_config(&config)?;
        let operation_count = config.operation_count();
        Ok(Self {
            config,
            reporter,
            operation_count,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    /// 標準の2つのコンパイラで全戦略を構築（計測対象外）
    pub fn setup(&self) -> BenchResult<Vec<Box<dyn CallStrategy>>> {
        self.setup_with_compilers(&InterpretingCompiler::new(), &ClosureCompiler::new())
    }

    /// 任意のコンパイラで全戦略を構築
    ///
    /// コンパイルエラーは致命的で、再試行せずにそのまま返す。
    pub fn setup_with_compilers(
        &self,
        baseline: &dyn ExpressionCompiler,
        fast: &dyn ExpressionCompiler,
    ) -> BenchResult<Vec<Box<dyn CallStrategy>>> {
        let factory = StrategyFactory::new(
            self.operation_count,
            self.config.argument_mode(),
            baseline,
            fast,
        );
        let kinds = self.config.strategies();
        let strategies = factory.build_all(&kinds)?;

        self.reporter.report_setup(self.operation_count, &kinds);
        Ok(strategies)
    }

    /// 戦略を1回実行し、呼び出し回数を検証して経過時間を返す
    pub fn run_once(
        &self,
        strategy: &mut dyn CallStrategy,
        counter: &mut CallCounter,
    ) -> BenchResult<Duration> {
        let before = counter.get();
        let start = Instant::now();
        strategy.execute(counter)?;
        let elapsed = start.elapsed();

        let expected = self.operation_count as u64;
        let actual = counter.delta_since(before);
        if actual != expected {
            return Err(BenchError::correctness_violation(
                strategy.kind().label(),
                expected,
                actual,
            ));
        }
        Ok(elapsed)
    }

    /// ウォームアップ後、設定された回数だけ試行して統計値を返す
    ///
    /// ウォームアップも検証はするが、記録はしない。
    /// 違反が起きた時点でその戦略の計測を打ち切る。
    pub fn measure(
        &self,
        strategy: &mut dyn CallStrategy,
        counter: &mut CallCounter,
    ) -> BenchResult<StrategyStats> {
        let kind = strategy.kind();
        let trials = self.config.trials();
        self.reporter.report_strategy_started(kind, trials);

        for _ in 0..self.config.warmup_trials() {
            self.run_once(strategy, counter)?;
        }

        let mut samples = Vec::with_capacity(trials);
        for trial in 0..trials {
            let elapsed = self.run_once(strategy, counter)?;
            self.reporter
                .report_trial(kind, trial, nanos_per_op(elapsed, self.operation_count));
            samples.push(elapsed);
        }

        let stats = StrategyStats::from_samples(kind, self.operation_count, &samples);
        self.reporter.report_strategy_completed(&stats);
        Ok(stats)
    }

    /// セットアップから全戦略の計測までを実行
    pub fn run(&self) -> BenchResult<BenchmarkReport> {
        let strategies = self.setup()?;
        self.run_strategies(strategies)
    }

    /// 構築済みの戦略を順に計測してレポートを作成
    ///
    /// 正当性違反はその戦略を失敗として記録し、次の戦略へ進む。
    /// 回復不能なエラーは即座に返す。
    pub fn run_strategies(
        &self,
        mut strategies: Vec<Box<dyn CallStrategy>>,
    ) -> BenchResult<BenchmarkReport> {
        let mut counter = CallCounter::new();
        let mut report = BenchmarkReport::new(
            self.operation_count,
            self.config.trials(),
            self.config.warmup_trials(),
            self.config.argument_mode(),
        );

        for strategy in strategies.iter_mut() {
            let kind = strategy.kind();
            match self.measure(strategy.as_mut(), &mut counter) {
                Ok(stats) => report.push(StrategyOutcome::Measured(stats)),
                Err(error) if error.is_recoverable() => {
                    let reason = error.to_string();
                    self.reporter.report_failure(kind, &reason);
                    report.push(StrategyOutcome::Failed {
                        strategy: kind,
                        reason,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        self.reporter.report_completed(&report);
        Ok(report)
    }

    /// レポートをJSONファイルへ書き出す
    pub fn export_report(&self, report: &BenchmarkReport, path: &Path) -> BenchResult<()> {
        export_json_report(report, path)?;
        Ok(())
    }
}
