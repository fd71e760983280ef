//! Implements the `Store` trait against a PostgREST endpoint, such as the one a Supabase project
//! exposes at `/rest/v1`.

use crate::api::{decode_rows, Store};
use crate::model::{Transaction, User};
use crate::{Config, Result};
use anyhow::Context;
use tracing::trace;
use url::Url;

pub(crate) struct PostgrestStore {
    client: reqwest::Client,
    base: Url,
    key: String,
    transactions_table: String,
    users_table: String,
}

impl PostgrestStore {
    pub(crate) fn new(config: &Config, key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self {
            client,
            base: rest_base(config.store_url())?,
            key,
            transactions_table: config.transactions_table().to_string(),
            users_table: config.users_table().to_string(),
        })
    }

    /// `GET /rest/v1/{table}` with the query pairs given, returning the raw body.
    async fn get(&self, table: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = table_url(&self.base, table, query)?;
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .with_context(|| format!("Failed to send request for table '{table}'"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            anyhow::bail!("Query of table '{table}' failed with status {status}: {body}");
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read the response for table '{table}'"))
    }
}

#[async_trait::async_trait]
impl Store for PostgrestStore {
    async fn transactions(&self) -> Result<Vec<Transaction>> {
        let body = self
            .get(
                &self.transactions_table,
                &[("select", "*"), ("order", "fecha.desc")],
            )
            .await?;
        decode_rows(&body, "transactions")
    }

    async fn users(&self) -> Result<Vec<User>> {
        let body = self
            .get(&self.users_table, &[("select", "id,user,correo")])
            .await?;
        decode_rows(&body, "users")
    }
}

/// The `rest/v1/` root below the project URL. A trailing slash is forced onto the project path
/// so that joining keeps any path prefix it has.
fn rest_base(store_url: &Url) -> Result<Url> {
    let mut base = store_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("rest/v1/")
        .with_context(|| format!("Unable to build the REST URL from '{store_url}'"))
}

fn table_url(base: &Url, table: &str, query: &[(&str, &str)]) -> Result<Url> {
    let mut url = base
        .join(table)
        .with_context(|| format!("Invalid table name '{table}'"))?;
    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_base() {
        let url = Url::parse("https://xyz.supabase.co").unwrap();
        assert_eq!(
            rest_base(&url).unwrap().as_str(),
            "https://xyz.supabase.co/rest/v1/"
        );

        let prefixed = Url::parse("http://localhost:8000/proxy").unwrap();
        assert_eq!(
            rest_base(&prefixed).unwrap().as_str(),
            "http://localhost:8000/proxy/rest/v1/"
        );
    }

    #[test]
    fn test_table_url() {
        let base = rest_base(&Url::parse("https://xyz.supabase.co/").unwrap()).unwrap();
        let url = table_url(&base, "control", &[("select", "*"), ("order", "fecha.desc")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://xyz.supabase.co/rest/v1/control?select=*&order=fecha.desc"
        );

        let url = table_url(&base, "User", &[("select", "id,user,correo")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://xyz.supabase.co/rest/v1/User?select=id%2Cuser%2Ccorreo"
        );
    }
}
