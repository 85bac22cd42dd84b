use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "rewired", about = "Server for a community e-waste education site")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database (enables the database tier)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Treat this deployment as production (writes refuse to land on ephemeral disk)
    #[arg(long)]
    pub production: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub deployment: DeploymentConfig,
    pub admin: AdminConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// When set, content is stored in this SQLite database first.
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DeploymentConfig {
    pub production: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required for admin writes. Outside production, writes are
    /// open when no token is configured (local development).
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref database) = cli.database {
            config.database.path = Some(database.clone());
        }
        if cli.production {
            config.deployment.production = true;
        }

        // Environment overrides beat both file and CLI
        config.apply_env_overrides();

        Ok(config)
    }

    /// REWIRED_DATABASE, REWIRED_PRODUCTION and REWIRED_ADMIN_TOKEN mirror the
    /// switches a managed deployment injects; a non-empty value wins.
    fn apply_env_overrides(&mut self) {
        if let Some(path) = non_empty_env("REWIRED_DATABASE") {
            self.database.path = Some(PathBuf::from(path));
        }
        if non_empty_env("REWIRED_PRODUCTION").is_some() {
            self.deployment.production = true;
        }
        if let Some(token) = non_empty_env("REWIRED_ADMIN_TOKEN") {
            self.admin.token = Some(token);
        }
    }

    /// Resolve the data directory holding the JSON content files.
    ///
    /// Production deployments without an explicit override get an ephemeral
    /// path under the system temp dir; everything else persists under
    /// `~/.rewired`.
    pub fn data_dir(cli: &Cli) -> PathBuf {
        if let Some(ref dir) = cli.data_dir {
            return dir.clone();
        }
        if cli.production || non_empty_env("REWIRED_PRODUCTION").is_some() {
            return std::env::temp_dir().join("rewired");
        }
        dirs::home_dir()
            .expect("Could not determine home directory")
            .join(".rewired")
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.path.is_none());
        assert!(!config.deployment.production);
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn data_dir_uses_cli_override() {
        let cli = Cli {
            data_dir: Some(PathBuf::from("/tmp/test-rewired")),
            ..Cli::default()
        };
        assert_eq!(Config::data_dir(&cli), PathBuf::from("/tmp/test-rewired"));
    }

    #[test]
    fn data_dir_defaults_to_home_dot_rewired() {
        let cli = Cli::default();
        let dir = Config::data_dir(&cli);
        assert!(dir.ends_with(".rewired"));
    }

    #[test]
    fn production_data_dir_is_ephemeral() {
        let cli = Cli {
            production: true,
            ..Cli::default()
        };
        let dir = Config::data_dir(&cli);
        assert!(dir.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn load_with_no_config_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = Cli {
            data_dir: Some(tmp.path().to_path_buf()),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn load_applies_cli_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = Cli {
            host: Some("127.0.0.1".to_string()),
            port: Some(8080),
            data_dir: Some(tmp.path().to_path_buf()),
            database: Some(tmp.path().join("content.db")),
            production: true,
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, Some(tmp.path().join("content.db")));
        assert!(config.deployment.production);
    }

    #[test]
    fn load_reads_toml_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
host = "192.168.1.1"
port = 9000

[database]
path = "/var/lib/rewired/content.db"

[admin]
token = "s3cret"
"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(config_path),
            data_dir: Some(tmp.path().to_path_buf()),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/rewired/content.db"))
        );
        assert_eq!(config.admin.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn cli_overrides_beat_toml_values() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
host = "192.168.1.1"
port = 9000
"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(config_path),
            host: Some("10.0.0.1".to_string()),
            port: Some(4000),
            data_dir: Some(tmp.path().to_path_buf()),
            ..Cli::default()
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 4000);
    }
}
