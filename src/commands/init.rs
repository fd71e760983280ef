use crate::commands::Out;
use crate::format::Locale;
use crate::{Config, Result};
use std::path::Path;
use tracing::debug;

/// Creates `home`, moves the store API key into it and writes `config.json`.
pub async fn init(
    home: &Path,
    anon_key: &Path,
    store_url: &str,
    locale: Locale,
) -> Result<Out<()>> {
    debug!("Creating equilibrium home at {}", home.display());
    let config = Config::create(home, anon_key, store_url, locale).await?;
    Ok(format!(
        "Created the configuration at {}, reading from {}",
        config.config_path().display(),
        config.store_url()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().join("key");
        utils::write(&key, "abc").await.unwrap();
        let home = dir.path().join("home");

        let out = init(&home, &key, "https://xyz.supabase.co", Locale::EsAr)
            .await
            .unwrap();
        assert!(out.message().contains("config.json"));
        assert!(out.structure().is_none());
        assert!(Config::load(&home).await.is_ok());
    }
}
