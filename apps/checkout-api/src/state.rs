//! Shared application state.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use checkout_db::Database;
use checkout_service::CheckoutPipeline;

/// State handed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: CheckoutPipeline<Database>,
    password: Arc<str>,
}

impl AppState {
    pub fn new(pipeline: CheckoutPipeline<Database>, password: impl Into<Arc<str>>) -> Self {
        AppState {
            pipeline,
            password: password.into(),
        }
    }

    /// Checks a presented `X-Auth-Password` value.
    ///
    /// With no configured password, a request without the header passes.
    /// Equal-length values are compared in constant time.
    pub fn password_matches(&self, presented: Option<&str>) -> bool {
        let presented = presented.unwrap_or("").as_bytes();
        presented.ct_eq(self.password.as_bytes()).into()
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}
