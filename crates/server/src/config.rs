//! Server configuration from command-line flags and environment variables.

use crate::error::CliError;
use clap::Args;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Flags of the `serve` subcommand. Each falls back to an environment
/// variable, then to the built-in default.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long, env = "COLOR_ADVISOR_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// TCP port to listen on.
    #[arg(short, long, env = "COLOR_ADVISOR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of request worker threads.
    #[arg(short, long, env = "COLOR_ADVISOR_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Value of the Access-Control-Allow-Origin header.
    #[arg(long, env = "COLOR_ADVISOR_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Regenerate advice on every request instead of caching it per color.
    #[arg(long)]
    pub no_cache: bool,

    /// PRNG seed for reproducible responses (default: system clock).
    #[arg(long, env = "COLOR_ADVISOR_SEED")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub cors_origin: String,
    pub cache_advice: bool,
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            cache_advice: true,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.workers == 0 {
            return Err(CliError::Input("--workers must be at least 1".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(CliError::Input("--host must not be empty".to_string()));
        }
        if !self.cors_origin.is_ascii() {
            return Err(CliError::Input(format!(
                "--cors-origin must be ASCII, got '{}'",
                self.cors_origin
            )));
        }
        Ok(())
    }
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            workers: args.workers,
            cors_origin: args.cors_origin,
            cache_advice: !args.no_cache,
            seed: args.seed,
        }
    }
}
