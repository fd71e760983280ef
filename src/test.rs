//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::format::Locale;
use crate::{utils, Config};
use tempfile::TempDir;

/// Test environment that sets up an equilibrium home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub(crate) struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub(crate) async fn new(locale: Locale) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("equilibrium");
        let key_path = temp_dir.path().join("anon_key.txt");
        utils::write(&key_path, "test-anon-key").await.unwrap();

        let config = Config::create(&root, &key_path, "https://test.supabase.co", locale)
            .await
            .unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub(crate) fn config(&self) -> Config {
        self.config.clone()
    }
}

mod commands_end_to_end {
    use super::*;
    use crate::commands;
    use crate::ledger::{SortKey, SortOrder, ViewOptions};
    use crate::Mode;

    #[tokio::test]
    async fn test_dashboard_in_test_mode() {
        let env = TestEnv::new(Locale::EsAr).await;
        let out = commands::dashboard(env.config(), Mode::Test).await.unwrap();
        let dashboard = out.structure().unwrap();
        assert_eq!(dashboard.balance_text, "$168.158,75");
        assert_eq!(dashboard.recent.len(), 4);
        assert!(out.message().starts_with("BALANCE: $168.158,75"));
    }

    #[tokio::test]
    async fn test_table_in_test_mode() {
        let env = TestEnv::new(Locale::EnUs).await;
        let options = ViewOptions {
            sort: Some(SortKey::Date),
            order: SortOrder::Asc,
            ..Default::default()
        };
        let out = commands::table(env.config(), Mode::Test, options)
            .await
            .unwrap();
        let table = out.structure().unwrap();
        assert_eq!(table.rows.first().unwrap().id, 1);
        assert_eq!(table.rows.last().unwrap().id, 8);
        assert_eq!(table.balance_text, "$168,158.75");
    }

    #[tokio::test]
    async fn test_users_in_test_mode() {
        let env = TestEnv::new(Locale::EsAr).await;
        let out = commands::users(env.config(), Mode::Test).await.unwrap();
        assert_eq!(out.structure().unwrap()[1].user, "bruno");
    }
}
