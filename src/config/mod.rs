#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::ServerConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "vive-delivery")]
#[command(about = "Parcel pricing and booking server")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Price a parcel locally
    Quote(QuoteArgs),
    /// Ask a running server for an estimate
    Estimate {
        #[arg(long, default_value = "http://localhost:4000")]
        server: String,

        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Print a signed bearer token
    Token(TokenArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Directory for the parcel store")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Keep parcels in memory only")]
    pub memory_store: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[arg(long, default_value = "0")]
    pub weight_kg: f64,

    #[arg(long, default_value = "0", help = "Length in cm")]
    pub length: f64,

    #[arg(long, default_value = "0", help = "Width in cm")]
    pub width: f64,

    #[arg(long, default_value = "0", help = "Height in cm")]
    pub height: f64,

    #[arg(long)]
    pub express: bool,

    #[arg(long)]
    pub insured: bool,

    #[arg(long, default_value = "0")]
    pub declared_value: f64,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct TokenArgs {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "User id placed in the `sub` claim")]
    pub sub: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub ttl_days: Option<i64>,
}
