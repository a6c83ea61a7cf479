use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const ENV_PREFIX: &str = "BLOGGY_";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub presence: PresenceSettings,
    pub site: SiteSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    /// Root of the auth service API, e.g. `https://auth.example.com/api/auth`.
    pub base_url: String,
    pub cookie_name: String,
    pub cookie_max_age_secs: u64,
    pub secure_cookie: bool,
}

#[derive(Deserialize, Clone)]
pub struct PresenceSettings {
    pub heartbeat_interval_secs: u64,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct SiteSettings {
    pub title: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load(Path::new("."), &run_mode, collect_env_vars(std::env::vars()))
    }

    fn load(
        dir: &Path,
        run_mode: &str,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let file = |name: String| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("environment not serializable: {}", e)))?;

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/bloggy.db")?
            .set_default("auth.base_url", "http://127.0.0.1:3001/api/auth")?
            .set_default("auth.cookie_name", "bloggy.session_token")?
            .set_default("auth.cookie_max_age_secs", 60 * 60 * 24 * 7)?
            .set_default("auth.secure_cookie", false)?
            .set_default("presence.heartbeat_interval_secs", 10)?
            .set_default("presence.timeout_secs", 30)?
            .set_default("site.title", "Bloggy")?
            .add_source(file("config".to_string()))
            .add_source(file(format!("config.{}", run_mode)))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }
}

/// `BLOGGY_AUTH__BASE_URL=...` becomes `auth.base_url`.
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        let vars = vec![
            ("BLOGGY_AUTH__BASE_URL".to_string(), "http://auth".to_string()),
            ("BLOGGY_SERVER__PORT".to_string(), "8080".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let map = collect_env_vars(vars.into_iter());
        assert_eq!(map.get("auth.base_url").map(String::as_str), Some("http://auth"));
        assert_eq!(map.get("server.port").map(String::as_str), Some("8080"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn config_file_layer_then_env() {
        let dir = std::env::temp_dir().join(format!("bloggy-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[database]\nurl = \"sqlite://from-file.db\"\n\n[site]\ntitle = \"Filed\"\n",
        )
        .unwrap();

        let settings = Settings::load(&dir, "test", HashMap::new()).unwrap();
        assert_eq!(settings.database.url, "sqlite://from-file.db");
        assert_eq!(settings.site.title, "Filed");
        assert_eq!(settings.server.port, 3000);

        let env = collect_env_vars(
            vec![("BLOGGY_SITE__TITLE".to_string(), "From Env".to_string())].into_iter(),
        );
        let settings = Settings::load(&dir, "test", env).unwrap();
        assert_eq!(settings.site.title, "From Env");
        assert_eq!(settings.database.url, "sqlite://from-file.db");

        std::fs::remove_dir_all(&dir).ok();
    }
}
