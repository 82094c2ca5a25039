//! # Checkout Client
//!
//! Typed async client for the checkout HTTP API.
//!
//! ```rust,ignore
//! let client = CheckoutClient::new("http://localhost:8080")?.with_password("letmein");
//!
//! let quote = client.get_items_price(&["120P90".into(), "120P90".into()]).await?;
//! let receipt = client.purchase_items(&["120P90".into()]).await?;
//! ```
//!
//! Error statuses come back as [`ClientError::Api`] carrying the server's
//! `code` and `message`. `health` is the exception: a 503 still carries a
//! health report, so it is returned as `Ok`.

pub mod error;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use checkout_core::{Item, Order, PriceQuote, PurchaseReceipt};

pub use error::{ClientError, ClientResult};

/// Header carrying the write password.
pub const AUTH_HEADER: &str = "X-Auth-Password";

/// Request timeout of the default HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub service: String,
    pub version: String,
}

/// Body of `GET /health`. `failures` is empty when the service is healthy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub service: String,
    pub version: String,
    pub failures: Vec<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Serialize)]
struct SkuList<'a> {
    skus: &'a [String],
}

#[derive(Serialize)]
struct AddItems<'a> {
    items: &'a [Item],
}

#[derive(Deserialize)]
struct AddItemsAck {
    count: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

/// HTTP client for one checkout API server. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    base: Url,
    http: Client,
    password: Option<String>,
}

impl CheckoutClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(CheckoutClient {
            base,
            http,
            password: None,
        })
    }

    /// Replaces the underlying HTTP client.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Sends `password` in `X-Auth-Password` on every request.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// `GET /status`
    pub async fn status(&self) -> ClientResult<ServiceStatus> {
        self.fetch(self.request(Method::GET, &["status"])?).await
    }

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<HealthReport> {
        let response = self.request(Method::GET, &["health"])?.send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        decode(response).await
    }

    /// `POST /v0/inventory/items`: returns the number of items stored.
    pub async fn add_items(&self, items: &[Item]) -> ClientResult<usize> {
        let request = self
            .request(Method::POST, &["v0", "inventory", "items"])?
            .json(&AddItems { items });
        let ack: AddItemsAck = self.fetch(request).await?;
        Ok(ack.count)
    }

    /// `GET /v0/inventory/price/{key}`: `key` is a SKU or an item name.
    pub async fn get_item_price(&self, key: &str) -> ClientResult<PriceQuote> {
        self.fetch(self.request(Method::GET, &["v0", "inventory", "price", key])?)
            .await
    }

    /// `POST /v0/inventory/price`
    pub async fn get_items_price(&self, skus: &[String]) -> ClientResult<PriceQuote> {
        let request = self
            .request(Method::POST, &["v0", "inventory", "price"])?
            .json(&SkuList { skus });
        self.fetch(request).await
    }

    /// `POST /v0/inventory/items/purchase`
    pub async fn purchase_items(&self, skus: &[String]) -> ClientResult<PurchaseReceipt> {
        let request = self
            .request(Method::POST, &["v0", "inventory", "items", "purchase"])?
            .json(&SkuList { skus });
        self.fetch(request).await
    }

    /// `GET /v0/orders`: newest first.
    pub async fn get_orders(&self) -> ClientResult<Vec<Order>> {
        self.fetch(self.request(Method::GET, &["v0", "orders"])?)
            .await
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(password) = &self.password {
            request = request.header(AUTH_HEADER, password);
        }
        Ok(request)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => (None, text),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
