use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use ledgerlink::{logging, LedgerLink, LedgerLinkError, LinkConfig};

/// Construct a LedgerLink and run it.
#[derive(Parser, Debug)]
#[command(name = "ledgerlink", version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file. Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the link; exits nonzero if the run is not successful.
    Run,
    /// Print the effective configuration.
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = dispatch(cli, |key| std::env::var(key).ok(), &mut io::stdout().lock());
    if let Err(err) = &result {
        eprintln!("error: {err}");
    }
    ExitCode::from(exit_status(&result))
}

/// 0 for a successful run, 1 for a failed one, the error's code otherwise.
fn exit_status(result: &Result<bool, LedgerLinkError>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => err.exit_code(),
    }
}

fn dispatch<F>(cli: Cli, env: F, out: &mut impl Write) -> Result<bool, LedgerLinkError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = LinkConfig::load_with(cli.config.as_deref(), cli.log_level.as_deref(), env)?;

    match cli.command {
        Commands::Run => {
            logging::init_tracing(&config.log)?;
            run_cmd(config, cli.output, out)
        }
        Commands::Config => {
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            Ok(true)
        }
    }
}

fn run_cmd(
    config: LinkConfig,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<bool, LedgerLinkError> {
    let link = LedgerLink::with_config(config);
    info!(link = link.name(), "starting run");
    let outcome = link.outcome();

    match output {
        OutputFormat::Text => {
            let verdict = if outcome.ok { "PASS" } else { "FAIL" };
            writeln!(out, "{verdict} {}", outcome.name)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&outcome)?)?,
    }

    if !outcome.ok {
        warn!(link = outcome.name.as_str(), "run reported failure");
    }
    Ok(outcome.ok)
}
