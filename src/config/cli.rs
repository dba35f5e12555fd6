use crate::config::toml_config::{LogFormat, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "drivedesk")]
#[command(about = "Driving-school API gateway for auth and student progress")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "DRIVEDESK_BIND", help = "Address to listen on")]
    pub bind: Option<String>,

    #[arg(long, env = "DRIVEDESK_AUTH_ENDPOINT")]
    pub auth_endpoint: Option<String>,

    #[arg(long, env = "DRIVEDESK_AUTH_API_KEY", hide_env_values = true)]
    pub auth_api_key: Option<String>,

    #[arg(long, env = "DRIVEDESK_PROGRESS_ENDPOINT")]
    pub progress_endpoint: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the file (if any) and lays command-line values over it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(endpoint) = &self.auth_endpoint {
            config.auth.endpoint = Some(endpoint.clone());
        }
        if let Some(api_key) = &self.auth_api_key {
            config.auth.api_key = Some(api_key.clone());
        }
        if let Some(endpoint) = &self.progress_endpoint {
            config.progress.endpoint = Some(endpoint.clone());
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[server]
bind = "127.0.0.1:4000"

[auth]
endpoint = "https://file.supabase.co"

[progress]
endpoint = "https://progress.file.test"
"#,
            )
            .unwrap();

        let cli = CliConfig::parse_from([
            "drivedesk",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--bind",
            "0.0.0.0:9000",
            "--json-logs",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.auth.endpoint.as_deref(), Some("https://file.supabase.co"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_flags_without_file() {
        let cli = CliConfig::parse_from([
            "drivedesk",
            "--auth-endpoint",
            "http://localhost:54321",
            "--progress-endpoint",
            "http://localhost:7000",
            "--verbose",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.auth.endpoint.as_deref(), Some("http://localhost:54321"));
        assert_eq!(config.progress.endpoint.as_deref(), Some("http://localhost:7000"));
        assert!(config.logging.verbose);
    }
}
