//! Command line interface.
//!
//! ```text
//! checkout-api run [--port N] [--sqlite PATH] [--memory-db] [--recreate-schema]
//!                  [--log-level LEVEL] [--log-format text|json] [--password PW]
//! checkout-api version
//! ```
//!
//! Every `run` flag is also read from its `CHECKOUT_*` variable. Values left
//! unset fall back to the [`ApiConfig`] defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::build_info;
use crate::config::{ApiConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "checkout-api",
    about = "Inventory pricing and purchase server",
    version = build_info::VERSION,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Run(RunArgs),
    /// Print version and build details
    Version,
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Port to listen on
    #[arg(long, env = "CHECKOUT_PORT")]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(long, env = "CHECKOUT_SQLITE")]
    pub sqlite: Option<PathBuf>,

    /// Keep all data in memory
    #[arg(long, env = "CHECKOUT_MEMORY_DB")]
    pub memory_db: bool,

    /// Drop and recreate the schema on startup. Destroys stored data.
    #[arg(long, env = "CHECKOUT_RECREATE_SCHEMA")]
    pub recreate_schema: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CHECKOUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, env = "CHECKOUT_LOG_FORMAT", value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,

    /// Password required in `X-Auth-Password` on write routes
    #[arg(long, env = "CHECKOUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl RunArgs {
    /// Overlays the given flags on `config`.
    pub fn apply(self, mut config: ApiConfig) -> ApiConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.sqlite {
            config.sqlite_path = path;
        }
        config.memory_db |= self.memory_db;
        config.recreate_schema |= self.recreate_schema;
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::collections::HashMap;

    fn defaults() -> ApiConfig {
        ApiConfig::from_lookup(|_| None).unwrap()
    }

    fn run_args(args: &[&str]) -> RunArgs {
        let argv = ["checkout-api", "run"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Run(args) => args,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["checkout-api", "version"]).unwrap();
        assert!(matches!(cli.command, Command::Version));

        assert!(Cli::try_parse_from(["checkout-api"]).is_err());
        assert!(Cli::try_parse_from(["checkout-api", "serve"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = run_args(&[
            "--port",
            "9090",
            "--sqlite",
            "/var/lib/checkout/shop.db",
            "--memory-db",
            "--recreate-schema",
            "--log-level",
            "debug",
            "--log-format",
            "JSON",
            "--password",
            "hunter2",
        ])
        .apply(defaults());

        assert_eq!(config.port, 9090);
        assert_eq!(config.sqlite_path, PathBuf::from("/var/lib/checkout/shop.db"));
        assert!(config.memory_db);
        assert!(config.recreate_schema);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let vars: HashMap<&str, &str> = [("CHECKOUT_PORT", "7000"), ("CHECKOUT_PASSWORD", "env")]
            .into_iter()
            .collect();
        let base = ApiConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        let config = RunArgs::default().apply(base);
        assert_eq!(config.port, 7000);
        assert_eq!(config.password, "env");
        assert_eq!(config.sqlite_path, PathBuf::from("data/checkout.db"));
        assert!(!config.memory_db);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        for args in [
            ["checkout-api", "run", "--port", "eighty"],
            ["checkout-api", "run", "--log-format", "xml"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{:?}", args);
        }
    }
}
