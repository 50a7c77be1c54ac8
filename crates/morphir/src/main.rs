use clap::{Parser, Subcommand};
use morphir::commands::{run_convert, run_name, run_validate};
use morphir::help::{print_banner, should_show_banner};
use morphir::logging::{self, LogConfig};
use morphir::OutputFormat;
use starbase::{App, AppResult, AppSession};
use std::path::PathBuf;

/// Morphir CLI - read, check and convert Morphir IR
#[derive(Parser)]
#[command(name = "morphir")]
#[command(about = "Morphir IR toolkit", long_about = None)]
#[command(version)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Print help
    #[arg(short, long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Log at debug level (overrides MORPHIR_LOG_LEVEL)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Work with Morphir IR distribution files
    Ir {
        #[command(subcommand)]
        action: IrAction,
    },
    /// Show how text splits into a Morphir name
    Name {
        /// Free text such as `valueInUSD`, or a `Package:Module:localName`
        text: String,
    },
}

#[derive(Clone, Subcommand)]
enum IrAction {
    /// Re-encode a distribution file at another format version
    Convert {
        /// Distribution file to read
        #[arg(short, long)]
        input: PathBuf,
        /// Output file, or `-` for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
        /// Target format version (1, 2, 3, v1, v2, v3)
        #[arg(long, default_value = "3")]
        to: String,
    },
    /// Decode a distribution file and report what it contains
    Validate {
        /// Distribution file to read
        #[arg(short, long)]
        input: PathBuf,
        /// Require the file to declare this format version
        #[arg(long)]
        format_version: Option<String>,
    },
}

/// Application session for Morphir CLI
#[derive(Clone)]
struct MorphirSession {
    command: Commands,
    format: OutputFormat,
}

#[async_trait::async_trait]
impl AppSession for MorphirSession {
    async fn execute(&mut self) -> AppResult {
        match &self.command {
            Commands::Ir { action } => match action {
                IrAction::Convert { input, output, to } => {
                    run_convert(input.clone(), output.clone(), to.clone(), self.format)
                }
                IrAction::Validate {
                    input,
                    format_version,
                } => run_validate(input.clone(), format_version.clone(), self.format),
            },
            Commands::Name { text } => run_name(text.clone(), self.format),
        }
    }
}

#[tokio::main]
async fn main() -> starbase::MainResult {
    let args: Vec<String> = std::env::args().collect();
    if should_show_banner(&args) {
        print_banner();
    }

    let cli = Cli::parse();
    logging::init(&LogConfig::from_env(cli.verbose));

    let session = MorphirSession {
        command: cli.command,
        format: OutputFormat::from_flags(cli.json),
    };

    let exit_code = App::default()
        .run(session, |mut session| async move { session.execute().await })
        .await?;

    Ok(std::process::ExitCode::from(exit_code))
}
