use anyhow::Result;
use clap::Parser;
use expr_bench::cli::{execute_list, execute_run, exit_code, Cli, Commands, EXIT_FAILURE};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.into_command() {
        Commands::Run(args) => match execute_run(&args) {
            Ok(report) => {
                if report.has_failures() {
                    eprintln!(
                        "⚠️  {}個の呼び出し方式で正当性違反が発生しました",
                        report.failures().count()
                    );
                    std::process::exit(exit_code(&report));
                }
            }
            Err(error) => {
                eprintln!("❌ エラー: {error:#}");
                std::process::exit(EXIT_FAILURE);
            }
        },
        Commands::List => execute_list(),
    }

    Ok(())
}
