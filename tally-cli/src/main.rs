use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tally_ingest::{DateOrder, ParseOptions, parse_csv_to_rows};
use tracing::info;

mod config;
mod logging;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Turn bank/card statement exports into canonical transactions"
)]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a CSV/TSV statement export and print the rows as JSON
    Parse {
        /// Path to the exported statement
        file: PathBuf,

        /// Print `{rows, diagnostics}` instead of the bare row list
        #[arg(long)]
        diagnostics: bool,

        /// How to read ambiguous dates such as 03/04/2025
        #[arg(long, value_enum)]
        date_order: Option<DateOrderArg>,

        /// Number of lines searched for the header row
        #[arg(long)]
        scan_window: Option<usize>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DateOrderArg {
    DayFirst,
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Parse {
            file,
            diagnostics,
            date_order,
            scan_window,
            pretty,
        } => {
            let options = apply_overrides(cfg.parser.clone(), diagnostics, date_order, scan_window)?;
            if !file.exists() {
                bail!("Statement not found: {}", file.display());
            }

            let raw = state::read_statement(&file)?;
            let output = parse_csv_to_rows(&raw, &options)
                .with_context(|| format!("parsing {}", file.display()))?;

            info!(
                file = %file.display(),
                rows = output.rows().len(),
                "parsed statement"
            );

            let json = if pretty || cfg.output.pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{json}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let p = config::config_path(cli.config.as_deref())?;
                println!("# {}", p.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Layer command-line flags over the `[parser]` config section.
fn apply_overrides(
    mut options: ParseOptions,
    diagnostics: bool,
    date_order: Option<DateOrderArg>,
    scan_window: Option<usize>,
) -> Result<ParseOptions> {
    if diagnostics {
        options.return_diagnostics = true;
    }
    if let Some(order) = date_order {
        options.date_order = order.into();
    }
    if let Some(window) = scan_window {
        if window == 0 {
            bail!("--scan-window must be at least 1");
        }
        options.header_scan_window = window;
    }
    Ok(options)
}
