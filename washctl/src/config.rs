//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `WASHCTL_CONFIG`
//! environment variable.
//!
//! Sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **Built-in defaults** - the `Default` implementation below
//! 2. **YAML config file** - base configuration (default: `config.yaml`)
//! 3. **Environment variables** - variables prefixed with `WASHCTL_` override YAML values
//!
//! ```bash
//! # Override server port
//! WASHCTL_PORT=9000
//!
//! # Point the upload client at a remote server
//! WASHCTL_BASE_URL="https://carwash.example.com"
//! ```

use clap::{Parser, Subcommand};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::types::PaymentId;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "WASHCTL_CONFIG", default_value = "config.yaml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
    /// Upload a payment receipt and log the server's JSON response
    UploadReceipt {
        /// Payment the receipt belongs to
        #[arg(long)]
        payment_id: PaymentId,

        /// Receipt file to attach; when omitted the `receipt` field is sent empty
        #[arg(long)]
        file: Option<PathBuf>,

        /// Base URL of the washctl server (defaults to `base_url` from the config)
        #[arg(long, env = "WASHCTL_BASE_URL")]
        base_url: Option<Url>,
    },
}

/// Main application configuration.
///
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Base URL the upload client targets when none is given on the command line
    pub base_url: Url,
    /// Directory where uploaded receipts are stored
    pub uploads_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: Url::parse("http://127.0.0.1:8080").expect("default base url is valid"),
            uploads_dir: PathBuf::from("uploads/receipts"),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("WASHCTL_").ignore(&["CONFIG"]).split("__"))
            .extract()?;

        Ok(config)
    }
}
