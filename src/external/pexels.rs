use anyhow::{bail, Result};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;

use crate::config::Config;

#[derive(Clone)]
pub struct PexelsClient {
    client: Client,
    base: String,
    api_key: Option<String>,
}

impl PexelsClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        // A missing key is not an error here; Pexels answers with 401 and the
        // caller treats that like any other image failure
        let api_key = cfg.get("PEXELS_API_KEY").filter(|s| !s.trim().is_empty());

        let base = cfg
            .get("PEXELS_API_BASE")
            .unwrap_or_else(|| "https://api.pexels.com".to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs()))
            .build()?;

        Ok(Self { client, base, api_key })
    }

    /// Fetch the first search hit's medium-size photo URL, empty when there is none.
    pub async fn search_image(&self, term: &str) -> Result<String> {
        let url = format!("{}/v1/search", self.base.trim_end_matches('/'));
        let mut req = self
            .client
            .get(&url)
            .query(&[("query", term), ("per_page", "1")]);
        if let Some(key) = &self.api_key {
            req = req.header(AUTHORIZATION, key);
        }
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::OK => {
                let value = resp.json::<Value>().await?;
                Ok(first_medium_url(&value))
            }
            status => {
                let text = resp.text().await.unwrap_or_default();
                bail!("Pexels search failed: {} - {}", status, text)
            }
        }
    }
}

fn first_medium_url(value: &Value) -> String {
    value
        .get("photos")
        .and_then(|p| p.get(0))
        .and_then(|p| p.pointer("/src/medium"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_medium_url() {
        let body = json!({
            "photos": [
                {"src": {"medium": "https://images.pexels.com/1/medium.jpg"}},
                {"src": {"medium": "https://images.pexels.com/2/medium.jpg"}}
            ]
        });
        assert_eq!(
            first_medium_url(&body),
            "https://images.pexels.com/1/medium.jpg"
        );
    }

    #[test]
    fn empty_when_no_photos_or_wrong_shape() {
        assert_eq!(first_medium_url(&json!({"photos": []})), "");
        assert_eq!(first_medium_url(&json!({})), "");
        assert_eq!(first_medium_url(&json!({"photos": [{"src": {}}]})), "");
    }
}
