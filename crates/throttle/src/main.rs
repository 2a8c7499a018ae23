mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use throttle_cloud::OutputFormat;

#[derive(Parser)]
#[command(name = "throttle")]
#[command(about = "Declare the throttlehead.dev site infrastructure, one stack at a time", long_about = None)]
struct Cli {
    /// デバッグログを有効化
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// プロビジョニングエンジンに渡す宣言を出力
    Preview {
        /// スタック名（prod, staging など）
        stack: Option<String>,
        /// スタック名（-s/--stack フラグ、環境変数 THROTTLE_STACK）
        #[arg(
            short = 's',
            long = "stack",
            env = "THROTTLE_STACK",
            conflicts_with = "stack",
            hide = true
        )]
        stack_flag: Option<String>,
        /// 出力形式
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// シークレットを伏せずに出力
        #[arg(long)]
        show_secrets: bool,
        /// 標準出力ではなくファイルに書き出す
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// スタック設定を検証
    Validate {
        /// スタック名（prod, staging など）
        stack: Option<String>,
        /// スタック名（-s/--stack フラグ、環境変数 THROTTLE_STACK）
        #[arg(
            short = 's',
            long = "stack",
            env = "THROTTLE_STACK",
            conflicts_with = "stack",
            hide = true
        )]
        stack_flag: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 標準出力は宣言専用、ログは標準エラーへ
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Preview {
            stack,
            stack_flag,
            format,
            show_secrets,
            output,
        } => {
            let stack = utils::determine_stack_name(stack.or(stack_flag))?;
            commands::preview::handle(&stack, format.into(), show_secrets, output.as_deref())?;
        }
        Commands::Validate { stack, stack_flag } => {
            let stack = utils::determine_stack_name(stack.or(stack_flag))?;
            commands::validate::handle(&stack)?;
        }
        Commands::Version => {
            println!("throttle {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
