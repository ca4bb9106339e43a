use crate::cli::RunArgs;
use crate::core::{BenchmarkReport, ProgressReporter};
use crate::engine::BenchmarkRunner;
use crate::services::{render_summary, ConsoleProgressReporter};
use anyhow::{Context, Result};

/// 正常終了時の終了コード
pub const EXIT_SUCCESS: i32 = 0;

/// 正当性違反・致命的エラー時の終了コード
pub const EXIT_FAILURE: i32 = 1;

/// 選択された戦略を計測し、必要ならJSONレポートを書き出す
///
/// 正当性違反はレポート内の失敗として返す。終了コードは `exit_code` で決める。
pub fn execute_run(args: &RunArgs) -> Result<BenchmarkReport> {
    if !args.quiet {
        println!("🚀 呼び出し方式ベンチマーク");
    }

    let runner = BenchmarkRunner::new(args.to_config(), reporter_for(args))
        .context("ベンチマーク設定が不正です")?;
    let report = runner.run().context("ベンチマークを完了できませんでした")?;

    // 静音モードでも結果表だけは出す
    if args.quiet {
        print!("{}", render_summary(&report));
    }

    if let Some(output) = &args.output {
        runner
            .export_report(&report, output)
            .context("レポートを保存できませんでした")?;
        if !args.quiet {
            println!("📄 結果は {} に保存されました", output.display());
        }
    }

    Ok(report)
}

/// 失敗した戦略が1つでもあれば非ゼロ
pub fn exit_code(report: &BenchmarkReport) -> i32 {
    if report.has_failures() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}

fn reporter_for(args: &RunArgs) -> Box<dyn ProgressReporter> {
    if args.quiet {
        Box::new(ConsoleProgressReporter::quiet())
    } else if args.verbose {
        Box::new(ConsoleProgressReporter::verbose())
    } else {
        Box::new(ConsoleProgressReporter::new())
    }
}
