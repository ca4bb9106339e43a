use crate::core::{ArgumentMode, StrategyKind};
use crate::services::{DefaultBenchmarkConfig, DEFAULT_OPERATION_COUNT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "expr_bench")]
#[command(about = "Compare direct, reflective and compiled expression-tree call strategies")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// サブコマンド省略時は run として扱う
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    /// 実行するコマンドを確定する
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Run(self.run))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure every selected call strategy
    Run(RunArgs),

    /// List available strategies
    List,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of operation calls per strategy invoke
    #[arg(short = 'n', long, default_value_t = DEFAULT_OPERATION_COUNT)]
    pub operations: usize,

    /// Number of recorded trials per strategy
    #[arg(short, long, default_value_t = crate::services::config::DEFAULT_TRIALS)]
    pub trials: usize,

    /// Number of unrecorded warm-up runs per strategy
    #[arg(short, long, default_value_t = crate::services::config::DEFAULT_WARMUP_TRIALS)]
    pub warmup: usize,

    /// Argument buffer handling for the reflective strategy
    #[arg(long, value_enum, default_value_t = ArgumentMode::Reuse)]
    pub argument_mode: ArgumentMode,

    /// Strategies to run (repeatable, default: all)
    #[arg(short, long = "strategy", value_enum)]
    pub strategies: Vec<StrategyKind>,

    /// Write the report as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the summary table
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every trial
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    /// コマンドライン引数から設定を組み立てる
    pub fn to_config(&self) -> DefaultBenchmarkConfig {
        let config = DefaultBenchmarkConfig::new(self.operations)
            .with_trials(self.trials)
            .with_warmup_trials(self.warmup)
            .with_argument_mode(self.argument_mode);

        if self.strategies.is_empty() {
            config
        } else {
            config.with_strategies(self.strategies.iter().copied())
        }
    }
}
