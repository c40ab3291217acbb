//! HTTPS client for the upstream product API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::{ProductSource, UpstreamError};
use crate::domain::{Product, ProductId};

/// Client for `GET {base_url}/{id}/`.
///
/// Certificate and hostname verification are disabled for this client only:
/// the upstream host serves a certificate that does not validate. No other
/// outbound client in the service is built this way.
#[derive(Debug, Clone)]
pub struct HttpProductClient {
    client: Client,
    base_url: String,
}

impl HttpProductClient {
    /// Builds a client with a fixed per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the product resource for `id`.
    #[must_use]
    pub fn product_url(&self, id: ProductId) -> String {
        format!("{}/{id}/", self.base_url)
    }
}

#[async_trait]
impl ProductSource for HttpProductClient {
    async fn fetch(&self, id: ProductId) -> Result<Product, UpstreamError> {
        let url = self.product_url(id);
        tracing::debug!(product_id = %id, %url, "fetching product upstream");

        let response = self.client.get(&url).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type.as_deref().is_some_and(is_json) {
            return Err(UpstreamError::Unavailable { url, content_type });
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound { url });
        }
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::Malformed {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;

        decode_product(id, body).map_err(|reason| UpstreamError::Malformed { url, reason })
    }
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Turns a success body into a product for `requested`.
fn decode_product(requested: ProductId, body: serde_json::Value) -> Result<Product, String> {
    if !body.as_object().is_some_and(|o| o.contains_key("id")) {
        return Err("body is missing the product id".to_string());
    }

    let product: Product = serde_json::from_value(body).map_err(|e| e.to_string())?;
    if product.id != requested {
        return Err(format!(
            "requested product {requested}, received {}",
            product.id
        ));
    }
    product.validate().map_err(|e| e.to_string())?;
    Ok(product)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_has_trailing_slash_and_no_double_slash() {
        let Ok(client) = HttpProductClient::new("https://api.test/product/", Duration::from_secs(1))
        else {
            panic!("client build failed");
        };
        assert_eq!(
            client.product_url(ProductId::new(12)),
            "https://api.test/product/12/"
        );
    }

    #[test]
    fn json_content_types() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("text/html"));
        assert!(!is_json("text/plain; charset=utf-8"));
    }

    #[test]
    fn decode_accepts_well_formed_body() {
        let body = json!({"id": 1, "title": "Drug Work", "price": 4183.54, "image": "x"});
        let Ok(p) = decode_product(ProductId::new(1), body) else {
            panic!("decode failed");
        };
        assert_eq!(p.title, "Drug Work");
    }

    #[test]
    fn decode_rejects_missing_id() {
        let body = json!({"title": "Drug Work", "price": 1.0, "image": "x"});
        assert!(decode_product(ProductId::new(1), body).is_err());
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(decode_product(ProductId::new(1), json!([1, 2])).is_err());
        assert!(decode_product(ProductId::new(1), json!(null)).is_err());
    }

    #[test]
    fn decode_rejects_mismatched_id() {
        let body = json!({"id": 2, "title": "t", "price": 1.0, "image": "x"});
        assert!(decode_product(ProductId::new(1), body).is_err());
    }

    #[test]
    fn decode_rejects_negative_price() {
        let body = json!({"id": 1, "title": "t", "price": -3.0, "image": "x"});
        assert!(decode_product(ProductId::new(1), body).is_err());
    }
}
