//! Configuration file handling for equilibrium.
//!
//! The configuration file is stored at `$EQUILIBRIUM_HOME/config.json` and holds the address of
//! the hosted transactions store, the table names to read, the exchange-rate endpoint and the
//! display locale. The store's anonymous API key lives next to it in `.secrets/anon_key`.

use crate::format::Locale;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

const APP_NAME: &str = "equilibrium";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const ANON_KEY: &str = "anon_key";
const CONFIG_JSON: &str = "config.json";
pub(crate) const DEFAULT_TRANSACTIONS_TABLE: &str = "control";
pub(crate) const DEFAULT_USERS_TABLE: &str = "User";
pub(crate) const DEFAULT_RATES_URL: &str = "https://api.bluelytics.com.ar/v2/latest";

/// When set and non-empty, its value is used as the store API key instead of the key file.
pub const ANON_KEY_ENV: &str = "EQUILIBRIUM_ANON_KEY";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EQUILIBRIUM_HOME` and from there it loads `$EQUILIBRIUM_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store_url: Url,
    rates_url: Url,
}

impl Config {
    /// Creates the data directory and its secrets subdirectory, then:
    /// - moves `anon_key_file` to `.secrets/anon_key`
    /// - writes an initial `config.json` pointing at `store_url`
    ///
    /// # Errors
    /// - Returns an error if `store_url` is not a valid URL or any file operation fails.
    pub async fn create(
        dir: impl Into<PathBuf>,
        anon_key_file: &Path,
        store_url: &str,
        locale: Locale,
    ) -> Result<Self> {
        let store = parse_url(store_url).context("Invalid store URL")?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the equilibrium home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;
        utils::rename(anon_key_file, secrets.join(ANON_KEY)).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            store_url: store.to_string(),
            locale,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Self::from_parts(root, config_path, config_file)
    }

    /// This will
    /// - validate that `home` exists and that the config file exists
    /// - load the config file
    /// - validate that the secrets directory exists
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Equilibrium home is missing, run 'equilibrium init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let config = Self::from_parts(root, config_path, config_file)?;
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            )
        }
        debug!("Loaded configuration from {}", config.config_path.display());
        Ok(config)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Result<Self> {
        let store_url = parse_url(&config_file.store_url).context("Invalid store_url")?;
        let rates_url = parse_url(&config_file.rates_url).context("Invalid rates_url")?;
        Ok(Self {
            secrets: root.join(SECRETS),
            root,
            config_path,
            config_file,
            store_url,
            rates_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn store_url(&self) -> &Url {
        &self.store_url
    }

    pub fn rates_url(&self) -> &Url {
        &self.rates_url
    }

    pub fn transactions_table(&self) -> &str {
        &self.config_file.transactions_table
    }

    pub fn users_table(&self) -> &str {
        &self.config_file.users_table
    }

    pub fn locale(&self) -> Locale {
        self.config_file.locale
    }

    /// Returns the stored `anon_key_path` if it is absolute, otherwise resolves it against the
    /// home directory.
    pub fn anon_key_path(&self) -> PathBuf {
        let p = self.config_file.anon_key_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Reads the store API key, preferring `EQUILIBRIUM_ANON_KEY` over the key file.
    pub async fn anon_key(&self) -> Result<String> {
        if let Some(key) = std::env::var(ANON_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            debug!("Using the store API key from {ANON_KEY_ENV}");
            return Ok(key.trim().to_string());
        }
        let path = self.anon_key_path();
        let key = utils::read(&path).await?.trim().to_string();
        anyhow::ensure!(!key.is_empty(), "The key file '{}' is empty", path.display());
        Ok(key)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "equilibrium",
///   "config_version": 1,
///   "store_url": "https://xyzcompany.supabase.co",
///   "transactions_table": "control",
///   "users_table": "User",
///   "rates_url": "https://api.bluelytics.com.ar/v2/latest",
///   "locale": "es-AR"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "equilibrium"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the hosted store, e.g. `https://xyzcompany.supabase.co`
    store_url: String,

    #[serde(default = "default_transactions_table")]
    transactions_table: String,

    #[serde(default = "default_users_table")]
    users_table: String,

    #[serde(default = "default_rates_url")]
    rates_url: String,

    #[serde(default)]
    locale: Locale,

    /// Path to the store API key (optional, relative to the home directory or absolute).
    /// Defaults to $EQUILIBRIUM_HOME/.secrets/anon_key if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anon_key_path: Option<PathBuf>,
}

fn default_transactions_table() -> String {
    DEFAULT_TRANSACTIONS_TABLE.to_string()
}

fn default_users_table() -> String {
    DEFAULT_USERS_TABLE.to_string()
}

fn default_rates_url() -> String {
    DEFAULT_RATES_URL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            store_url: String::new(),
            transactions_table: default_transactions_table(),
            users_table: default_users_table(),
            rates_url: default_rates_url(),
            locale: Locale::default(),
            anon_key_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path`, validating `app_name`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    pub fn anon_key_path(&self) -> PathBuf {
        self.anon_key_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SECRETS).join(ANON_KEY))
    }
}

/// Parses an absolute http(s) URL.
fn parse_url(s: &str) -> Result<Url> {
    let url = Url::parse(s.trim()).with_context(|| format!("Unable to parse URL '{s}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Unsupported URL scheme '{other}' in '{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STORE: &str = "https://xyzcompany.supabase.co";

    async fn key_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("key.txt");
        utils::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("equilibrium_home");
        let key = key_file(&dir, "secret-key\n").await;

        let config = Config::create(&home, &key, STORE, Locale::EnUs)
            .await
            .unwrap();

        assert_eq!(config.store_url().as_str(), "https://xyzcompany.supabase.co/");
        assert_eq!(config.transactions_table(), "control");
        assert_eq!(config.users_table(), "User");
        assert_eq!(config.rates_url().as_str(), DEFAULT_RATES_URL);
        assert_eq!(config.locale(), Locale::EnUs);
        assert!(config.secrets().is_dir());
        assert!(!key.exists());
        assert_eq!(
            utils::read(&config.anon_key_path()).await.unwrap(),
            "secret-key\n"
        );
    }

    #[tokio::test]
    async fn test_config_load_after_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let key = key_file(&dir, "k").await;
        let created = Config::create(&home, &key, STORE, Locale::EsAr)
            .await
            .unwrap();

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(loaded.root(), created.root());
    }

    #[tokio::test]
    async fn test_config_create_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let key = key_file(&dir, "k").await;
        let result = Config::create(dir.path().join("h"), &key, "not a url", Locale::EsAr).await;
        assert!(result.is_err());
        assert!(key.exists());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert!(err.to_string().contains("equilibrium init"));
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "equilibrium",
            "config_version": 1,
            "store_url": "https://minimal.supabase.co"
        }"#;
        utils::write(&path, json).await.unwrap();

        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config.transactions_table, "control");
        assert_eq!(config.users_table, "User");
        assert_eq!(config.rates_url, DEFAULT_RATES_URL);
        assert_eq!(config.locale, Locale::EsAr);
        assert_eq!(
            config.anon_key_path(),
            PathBuf::from(SECRETS).join(ANON_KEY)
        );
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{"app_name": "ledger", "config_version": 1, "store_url": "https://a.b"}"#;
        utils::write(&path, json).await.unwrap();

        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("anon_key_path"));
        assert!(json.contains("\"locale\":\"es-AR\""));
    }

    #[tokio::test]
    async fn test_anon_key_from_file_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let key = key_file(&dir, "  abc123 \n").await;
        let config = Config::create(dir.path().join("h"), &key, STORE, Locale::EsAr)
            .await
            .unwrap();
        // The env override is not set in tests.
        if std::env::var(ANON_KEY_ENV).is_err() {
            assert_eq!(config.anon_key().await.unwrap(), "abc123");
        }
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://a.supabase.co").is_ok());
        assert!(parse_url("http://localhost:54321").is_ok());
        assert!(parse_url("ftp://a.b").is_err());
        assert!(parse_url("").is_err());
    }
}
