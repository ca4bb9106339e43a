// 進捗監視の具象実装

use crate::core::{BenchmarkReport, ProgressReporter, StrategyKind, StrategyOutcome, StrategyStats};
use std::fmt;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
    verbose: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            verbose: false,
        }
    }

    /// 試行ごとの計測値も表示する
    pub fn verbose() -> Self {
        Self {
            quiet: false,
            verbose: true,
        }
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report_setup(&self, operation_count: usize, strategies: &[StrategyKind]) {
        if !self.quiet {
            println!(
                "🔧 Setup completed: {} strategies, {operation_count} operations per invoke",
                strategies.len()
            );
        }
    }

    fn report_strategy_started(&self, kind: StrategyKind, trials: usize) {
        if !self.quiet {
            println!("🔬 {kind} ({trials} trials)");
        }
    }

    fn report_trial(&self, kind: StrategyKind, trial: usize, nanos_per_op: f64) {
        if self.verbose {
            println!("   - {kind} #{trial}: {nanos_per_op:.3} ns/op");
        }
    }

    fn report_failure(&self, kind: StrategyKind, reason: &str) {
        if !self.quiet {
            eprintln!("❌ {kind} failed: {reason}");
        }
    }

    fn report_strategy_completed(&self, stats: &StrategyStats) {
        if !self.quiet {
            println!(
                "   🟢 mean {:.3} ns/op (min {:.3}, max {:.3}, σ {:.3})",
                stats.mean, stats.min, stats.max, stats.std_dev
            );
        }
    }

    fn report_completed(&self, report: &BenchmarkReport) {
        if !self.quiet {
            println!();
            print!("{}", render_summary(report));
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoOpProgressReporter {
    fn report_setup(&self, _operation_count: usize, _strategies: &[StrategyKind]) {}

    fn report_strategy_started(&self, _kind: StrategyKind, _trials: usize) {}

    fn report_trial(&self, _kind: StrategyKind, _trial: usize, _nanos_per_op: f64) {}

    fn report_failure(&self, _kind: StrategyKind, _reason: &str) {}

    fn report_strategy_completed(&self, _stats: &StrategyStats) {}

    fn report_completed(&self, _report: &BenchmarkReport) {}
}

/// 戦略名をキーにした結果サマリー表を生成
pub fn render_summary(report: &BenchmarkReport) -> String {
    SummaryTable(report).to_string()
}

struct SummaryTable<'a>(&'a BenchmarkReport);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "📊 呼び出し方式比較サマリー")?;
        writeln!(
            f,
            "   N = {}, trials = {}, warmup = {}, arguments = {:?}",
            report.operation_count, report.trials, report.warmup_trials, report.argument_mode
        )?;
        writeln!(f, "{}", "=".repeat(96))?;
        writeln!(
            f,
            "{:<32} {:>12} {:>12} {:>12} {:>10} {:>7} {:>8}",
            "Strategy", "Mean ns/op", "Min ns/op", "Max ns/op", "StdDev", "Samples", "vs Direct"
        )?;
        writeln!(f, "{}", "-".repeat(96))?;

        for outcome in &report.outcomes {
            match outcome {
                StrategyOutcome::Measured(stats) => {
                    let relative = report
                        .relative_speed(stats.strategy, StrategyKind::Direct)
                        .map(|ratio| format!("{ratio:.2}x"))
                        .unwrap_or_else(|| "-".to_string());
                    writeln!(
                        f,
                        "{:<32} {:>12.3} {:>12.3} {:>12.3} {:>10.3} {:>7} {:>8}",
                        stats.label,
                        stats.mean,
                        stats.min,
                        stats.max,
                        stats.std_dev,
                        stats.sample_count,
                        relative
                    )?;
                }
                StrategyOutcome::Failed { strategy, reason } => {
                    writeln!(f, "{:<32} ❌ FAILED: {reason}", strategy.label())?;
                }
            }
        }

        writeln!(f, "{}", "=".repeat(96))?;
        if let Some(fastest) = report.fastest() {
            writeln!(f, "🏆 Fastest: {} ({:.3} ns/op)", fastest.label, fastest.mean)?;
        }
        Ok(())
    }
}
