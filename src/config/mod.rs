#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::cli::Command;
    use super::AppConfig;
    use crate::utils::error::{HoursError, Result};
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "hours-store")]
    #[command(about = "Store and serve named sets of business hours")]
    pub struct CliConfig {
        #[arg(long, help = "Path to a TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Directory holding one <name>.json file per hours set")]
        pub hours_dir: Option<String>,

        #[arg(long, help = "Base path of the hours API")]
        pub base_path: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    impl CliConfig {
        /// Loads the configuration file (if any) and applies command-line
        /// overrides on top of it.
        ///
        /// The memory backend is only accepted for `serve`; a one-shot
        /// command would lose its data when the process exits.
        pub fn resolve(&self) -> Result<AppConfig> {
            let mut config = match &self.config {
                Some(path) => AppConfig::from_file(path)?,
                None => AppConfig::default(),
            };

            if let Some(dir) = &self.hours_dir {
                config.storage.backend = "local".to_string();
                config.storage.directory = dir.clone();
            }
            if let Some(base_path) = &self.base_path {
                config.api.base_path = base_path.clone();
            }
            if self.json_logs {
                config.logging.format = "json".to_string();
            }
            if let Command::Serve { addr: Some(addr) } = &self.command {
                config.server.address = addr.clone();
            }

            config.validate()?;
            if config.storage.backend == "memory" && !self.command.is_serve() {
                return Err(HoursError::InvalidConfigValueError {
                    field: "storage.backend".to_string(),
                    value: config.storage.backend.clone(),
                    reason: "The memory backend only keeps data while `serve` is running"
                        .to_string(),
                });
            }
            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_overrides_defaults() {
            let cli = CliConfig::parse_from([
                "hours-store",
                "--hours-dir",
                "/srv/hours",
                "--json-logs",
                "get",
                "shop",
            ]);
            let config = cli.resolve().unwrap();

            assert_eq!(config.storage.directory, "/srv/hours");
            assert!(config.uses_json_logs());
            assert!(matches!(cli.command, Command::Get { ref name } if name == "shop"));
        }

        #[test]
        fn test_memory_backend_only_for_serve() {
            let mut config_file = tempfile::NamedTempFile::new().unwrap();
            std::io::Write::write_all(&mut config_file, b"[storage]\nbackend = \"memory\"\n")
                .unwrap();
            let config_path = config_file.path().to_str().unwrap();

            let list = CliConfig::parse_from(["hours-store", "--config", config_path, "list"]);
            assert!(matches!(
                list.resolve(),
                Err(HoursError::InvalidConfigValueError { ref field, .. }) if field == "storage.backend"
            ));

            let serve = CliConfig::parse_from([
                "hours-store",
                "--config",
                config_path,
                "serve",
                "--addr",
                "127.0.0.1:3000",
            ]);
            let config = serve.resolve().unwrap();
            assert_eq!(config.storage.backend, "memory");
            assert_eq!(config.server.address, "127.0.0.1:3000");
        }

        #[test]
        fn test_invalid_override_fails_validation() {
            let cli = CliConfig::parse_from(["hours-store", "--base-path", "hours", "list"]);
            assert!(cli.resolve().is_err());
        }
    }
}
