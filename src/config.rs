use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(
    name = "a9s",
    about = "k9s-style terminal UI for scheduling Ansible playbooks on Uyuni minions"
)]
pub struct Cli {
    /// Uyuni server URL (e.g. https://uyuni.example.com)
    #[arg(long, env = "UYUNI_URL")]
    pub url: Option<String>,

    /// API user
    #[arg(long, env = "UYUNI_USER")]
    pub user: Option<String>,

    /// API password
    #[arg(long, env = "UYUNI_PASSWORD")]
    pub password: Option<String>,

    /// System id of the Ansible control node
    #[arg(long, env = "UYUNI_MINION_ID")]
    pub minion_id: Option<i64>,

    /// Skip TLS certificate verification (self-signed server certificates)
    #[arg(long)]
    pub insecure: bool,

    /// Log file path
    #[arg(long, env = "A9S_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub minion_id: Option<i64>,
    pub insecure: Option<bool>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("a9s").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }
}

/// Effective settings once CLI flags, environment and the config file are
/// merged; flags and environment win over the file.
#[derive(Debug)]
pub struct Settings {
    pub url: String,
    pub user: String,
    pub password: String,
    pub minion_id: i64,
    pub insecure: bool,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn resolve(cli: Cli, file: ConfigFile) -> Result<Self, String> {
        let url = cli
            .url
            .or(file.url)
            .ok_or("missing server URL (--url or UYUNI_URL)")?;
        let user = cli
            .user
            .or(file.user)
            .ok_or("missing API user (--user or UYUNI_USER)")?;
        let password = cli
            .password
            .or(file.password)
            .ok_or("missing API password (--password or UYUNI_PASSWORD)")?;
        let minion_id = cli
            .minion_id
            .or(file.minion_id)
            .ok_or("missing control node id (--minion-id or UYUNI_MINION_ID)")?;

        Ok(Self {
            url,
            user,
            password,
            minion_id,
            insecure: cli.insecure || file.insecure.unwrap_or(false),
            log_file: cli.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_file() -> ConfigFile {
        ConfigFile {
            url: Some("https://file.example.com".to_string()),
            user: Some("file-user".to_string()),
            password: Some("file-pass".to_string()),
            minion_id: Some(7),
            insecure: Some(true),
        }
    }

    #[test]
    fn flags_win_over_the_config_file() {
        let cli = Cli {
            url: Some("https://cli.example.com".to_string()),
            user: None,
            password: None,
            minion_id: Some(42),
            insecure: false,
            log_file: None,
        };

        let settings = Settings::resolve(cli, full_file()).unwrap();
        assert_eq!(settings.url, "https://cli.example.com");
        assert_eq!(settings.user, "file-user");
        assert_eq!(settings.minion_id, 42);
        assert!(settings.insecure);
    }

    #[test]
    fn missing_required_value_is_reported() {
        let err = Settings::resolve(Cli::default(), ConfigFile::default()).unwrap_err();
        assert!(err.contains("--url"));
    }
}
