use crate::api::{self, Mode, Store};
use crate::commands::{markdown_table, Out};
use crate::model::User;
use crate::{Config, Result};
use tracing::error;

/// Lists the rows of the users table. Like the transaction fetch, a failure is logged and yields
/// an empty list.
pub async fn users(config: Config, mode: Mode) -> Result<Out<Vec<User>>> {
    let store = api::store(&config, mode).await?;
    Ok(build(store.as_ref()).await)
}

async fn build(store: &dyn Store) -> Out<Vec<User>> {
    let users = store.users().await.unwrap_or_else(|e| {
        error!("Error fetching users: {e:#}");
        Vec::new()
    });
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| vec![u.id.to_string(), u.user.clone(), u.correo.clone()])
        .collect();
    Out::new(markdown_table(&["ID", "User", "Email"], &rows), users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestStore;

    #[tokio::test]
    async fn test_users() {
        let out = build(&TestStore::default()).await;
        assert_eq!(out.structure().unwrap().len(), 2);
        assert!(out.message().contains("| 1  | ana   | ana@example.com   |"));
    }

    #[tokio::test]
    async fn test_users_when_store_fails() {
        let out = build(&TestStore::failing()).await;
        assert!(out.structure().unwrap().is_empty());
    }
}
