//! Merchant credentials and gateway environment selection

use serde::{Deserialize, Serialize};
use std::env;

use crate::{PaymentError, Result};

/// Gateway environment for API and widget-script endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// Test servers; no real money movement
    Sandbox,
    /// Live servers
    Production,
}

impl Environment {
    /// JSON API endpoint for this environment
    pub fn api_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://apitest.authorize.net/xml/v1/request.api",
            Environment::Production => "https://api.authorize.net/xml/v1/request.api",
        }
    }

    /// Hosted tokenization widget script URL for this environment
    pub fn accept_js_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://jstest.authorize.net/v3/AcceptUI.js",
            Environment::Production => "https://js.authorize.net/v3/AcceptUI.js",
        }
    }

    /// Whether this is the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

/// Merchant account credentials for the gateway.
///
/// Immutable after construction; clone freely and share across tasks.
/// An opaque token is only redeemable against the same login id that
/// rendered the widget which produced it — the crate cannot enforce
/// that across process boundaries, so keep one credential set per
/// merchant account.
#[derive(Clone)]
pub struct MerchantCredentials {
    api_login_id: String,
    transaction_key: String,
    environment: Environment,
}

impl std::fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("api_login_id", &self.api_login_id)
            .field("transaction_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

impl MerchantCredentials {
    /// Create credentials for the given environment
    pub fn new(
        api_login_id: impl Into<String>,
        transaction_key: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            api_login_id: api_login_id.into(),
            transaction_key: transaction_key.into(),
            environment,
        }
    }

    /// Create sandbox credentials
    pub fn sandbox(api_login_id: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self::new(api_login_id, transaction_key, Environment::Sandbox)
    }

    /// Create production credentials
    pub fn production(api_login_id: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self::new(api_login_id, transaction_key, Environment::Production)
    }

    /// Load credentials from `ANET_API_LOGIN_ID`, `ANET_TRANSACTION_KEY`
    /// and `ANET_ENVIRONMENT` (`sandbox` unless set to `production`).
    pub fn from_env() -> Result<Self> {
        let api_login_id = env::var("ANET_API_LOGIN_ID").map_err(|_| {
            PaymentError::validation("Missing credentials: ANET_API_LOGIN_ID must be set")
        })?;
        let transaction_key = env::var("ANET_TRANSACTION_KEY").map_err(|_| {
            PaymentError::validation("Missing credentials: ANET_TRANSACTION_KEY must be set")
        })?;

        let environment = match env::var("ANET_ENVIRONMENT") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Sandbox,
        };

        Ok(Self::new(api_login_id, transaction_key, environment))
    }

    /// The merchant API login id
    pub fn api_login_id(&self) -> &str {
        &self.api_login_id
    }

    /// The merchant transaction key
    pub fn transaction_key(&self) -> &str {
        &self.transaction_key
    }

    /// The selected gateway environment
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_endpoints() {
        assert_eq!(
            Environment::Sandbox.api_url(),
            "https://apitest.authorize.net/xml/v1/request.api"
        );
        assert_eq!(
            Environment::Production.api_url(),
            "https://api.authorize.net/xml/v1/request.api"
        );
        assert!(Environment::Sandbox.is_sandbox());
        assert!(!Environment::Production.is_sandbox());
    }

    #[test]
    fn test_widget_script_follows_environment() {
        assert_eq!(
            Environment::Sandbox.accept_js_url(),
            "https://jstest.authorize.net/v3/AcceptUI.js"
        );
        assert_eq!(
            Environment::Production.accept_js_url(),
            "https://js.authorize.net/v3/AcceptUI.js"
        );
    }

    #[test]
    fn test_debug_redacts_transaction_key() {
        let credentials = MerchantCredentials::sandbox("login123", "secret-key");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("login123"));
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
