//! # gtld-census
//!
//! Operator tools for classifying the delegations of a gTLD zone file.

mod bootstrap;
mod commands;
mod di;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gtld_census_domain::CliOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gtld-census")]
#[command(version)]
#[command(about = "Classify gTLD zone delegations by nameserver and reverse DNS")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Upstream resolver, "ip" or "ip:port"; repeat for several
    #[arg(long = "upstream", global = true)]
    upstream: Vec<String>,

    /// SQLite database path
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every delegation of a zone file and print the bucket counts
    ProcessZone {
        zonefile: PathBuf,
        #[arg(long)]
        origin: String,
        #[command(flatten)]
        patterns: PatternArgs,
        /// Resolve addresses and PTR names before classifying
        #[arg(long)]
        enrich: bool,
        /// Also dump bucket members to stdout
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Write the nameserver tally of a zone file as CSV
    DumpNameservers {
        zonefile: PathBuf,
        outfile: PathBuf,
        #[arg(long)]
        origin: String,
    },
    /// Resolve PTR names for every domain and write them as CSV
    DumpReverseZone {
        zonefile: PathBuf,
        outfile: PathBuf,
        #[arg(long)]
        origin: String,
    },
    /// Load a zone file, enrich it and store it; prints the new zone id
    CreateData {
        zonefile: PathBuf,
        #[arg(long)]
        origin: String,
        /// Store the delegations without running reverse lookups
        #[arg(long)]
        skip_reverse: bool,
    },
    /// Classify a zone previously stored with create-data
    ClassifyStored {
        zone_id: i64,
        #[command(flatten)]
        patterns: PatternArgs,
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// List stored zones
    ListZones,
}

/// Pattern list files; each overrides the matching `[patterns]` entry.
#[derive(Args, Default)]
struct PatternArgs {
    #[arg(long = "parking-nameservers")]
    parked_nameservers: Option<String>,
    #[arg(long)]
    blocked_nameservers: Option<String>,
    #[arg(long)]
    parked_ptr: Option<String>,
    #[arg(long)]
    expired_ptr: Option<String>,
    #[arg(long)]
    other_inactive_nameservers: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let patterns = match &self.command {
            Command::ProcessZone { patterns, .. } | Command::ClassifyStored { patterns, .. } => {
                Some(patterns)
            }
            _ => None,
        };

        CliOverrides {
            upstream_servers: self.upstream.clone(),
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
            log_json: self.log_format.map(|f| matches!(f, LogFormat::Json)),
            parked_nameservers: patterns.and_then(|p| p.parked_nameservers.clone()),
            blocked_nameservers: patterns.and_then(|p| p.blocked_nameservers.clone()),
            parked_ptr: patterns.and_then(|p| p.parked_ptr.clone()),
            expired_ptr: patterns.and_then(|p| p.expired_ptr.clone()),
            other_inactive_nameservers: patterns
                .and_then(|p| p.other_inactive_nameservers.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::config::log_config(cli.config.as_deref(), &config);

    match cli.command {
        Command::ProcessZone {
            zonefile,
            origin,
            enrich,
            output,
            ..
        } => commands::process_zone(&config, &zonefile, &origin, enrich, output).await,
        Command::DumpNameservers {
            zonefile,
            outfile,
            origin,
        } => commands::dump_nameservers(&config, &zonefile, &outfile, &origin),
        Command::DumpReverseZone {
            zonefile,
            outfile,
            origin,
        } => commands::dump_reverse_zone(&config, &zonefile, &outfile, &origin).await,
        Command::CreateData {
            zonefile,
            origin,
            skip_reverse,
        } => commands::create_data(&config, &zonefile, &origin, skip_reverse).await,
        Command::ClassifyStored {
            zone_id, output, ..
        } => commands::classify_stored(&config, zone_id, output).await,
        Command::ListZones => commands::list_zones(&config).await,
    }
}
