//! Payment façade: widget rendering and charge submission

use rust_decimal::Decimal;

use crate::credentials::MerchantCredentials;
use crate::gateway::GatewayClient;
use crate::template::{self, button};
use crate::types::{ChargeRequest, ChargeResult, CorrelationId, PaymentMethod};
use crate::{PaymentError, Result};

/// One widget render: where the token is posted and how the button looks
#[derive(Debug, Clone)]
pub struct ButtonRequest {
    /// URL the form posts the opaque token fields to
    pub callback_url: String,
    /// Button text, embedded verbatim
    pub button_label: String,
    /// Inline CSS for the button, embedded verbatim
    pub style_override: String,
}

impl ButtonRequest {
    /// Create a render request with the default label and no styling
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
            button_label: "Pay Now".to_string(),
            style_override: String::new(),
        }
    }

    /// Set the button label
    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = label.into();
        self
    }

    /// Set the inline button styling
    pub fn with_style_override(mut self, style: impl Into<String>) -> Self {
        self.style_override = style.into();
        self
    }
}

/// Tokenized-card payment façade.
///
/// Renders the hosted tokenization widget and redeems the opaque
/// tokens it produces. Read-only after construction; share one
/// instance per merchant account across tasks.
#[derive(Debug, Clone)]
pub struct AcceptPayments {
    gateway: GatewayClient,
}

impl AcceptPayments {
    /// Create a façade for the given merchant credentials
    pub fn new(credentials: MerchantCredentials) -> Self {
        Self {
            gateway: GatewayClient::new(credentials),
        }
    }

    /// Create a façade over an explicit gateway client (custom
    /// endpoint, tests)
    pub fn with_gateway(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// The underlying gateway client
    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    /// Render the payment button markup for the given request.
    ///
    /// Fetches the merchant's public client key from the gateway (one
    /// round trip per render), then binds it together with the login
    /// id, callback URL, label and styling into the button template.
    /// Label and styling are inserted verbatim; sanitize them if they
    /// can be attacker-controlled.
    pub async fn render_button(&self, request: &ButtonRequest) -> Result<String> {
        let public_client_key = self.gateway.public_client_key().await?;
        let credentials = self.gateway.credentials();

        Ok(template::bind(
            button::get_button_template(),
            &[
                ("callbackUrl", request.callback_url.as_str()),
                ("apiLoginId", credentials.api_login_id()),
                ("publicClientKey", public_client_key.as_str()),
                ("buttonLabel", request.button_label.as_str()),
                ("styleOverride", request.style_override.as_str()),
                ("acceptJsUrl", credentials.environment().accept_js_url()),
            ],
        ))
    }

    /// Submit a charge for a previously tokenized card.
    ///
    /// Validates the request, stamps it with a fresh correlation id and
    /// submits it once. The correlation id does not make the call
    /// idempotent; retry policy belongs to the caller.
    pub async fn charge(&self, request: &ChargeRequest) -> Result<ChargeResult> {
        validate(request)?;
        let correlation_id = CorrelationId::generate();
        self.gateway.create_transaction(request, &correlation_id).await
    }
}

fn validate(request: &ChargeRequest) -> Result<()> {
    if request.amount <= Decimal::ZERO {
        return Err(PaymentError::validation("amount must be greater than zero"));
    }
    if request.currency.trim().is_empty() {
        return Err(PaymentError::validation("currency must be a non-empty ISO 4217 code"));
    }
    match &request.payment {
        PaymentMethod::Opaque(token) if token.is_empty() => Err(PaymentError::validation(
            "opaque token descriptor and value must be non-empty",
        )),
        PaymentMethod::Card(card)
            if card.card_number.is_empty() || card.expiration_date.is_empty() =>
        {
            Err(PaymentError::validation(
                "card number and expiration date must be non-empty",
            ))
        }
        _ => Ok(()),
    }
}
