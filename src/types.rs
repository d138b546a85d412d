//! Core types for tokenized-card charges

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque payment token produced by the hosted tokenization widget.
///
/// A descriptor/value pair standing in for raw card data, redeemable
/// once by the gateway for a charge. Treated as an opaque bearer
/// credential: never parsed, never stored by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueData {
    /// Token descriptor (e.g. `COMMON.ACCEPT.INAPP.PAYMENT`)
    #[serde(rename = "dataDescriptor")]
    pub data_descriptor: String,
    /// Token value
    #[serde(rename = "dataValue")]
    pub data_value: String,
}

impl OpaqueData {
    /// Create an opaque token from descriptor and value
    pub fn new(data_descriptor: impl Into<String>, data_value: impl Into<String>) -> Self {
        Self {
            data_descriptor: data_descriptor.into(),
            data_value: data_value.into(),
        }
    }

    /// Whether either token field is empty
    pub fn is_empty(&self) -> bool {
        self.data_descriptor.is_empty() || self.data_value.is_empty()
    }
}

/// Form fields posted by the rendered widget to the callback URL.
///
/// The hosting application deserializes the callback POST into this and
/// passes it to the charge operation explicitly, instead of the charge
/// path reading ambient request state.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackFields {
    #[serde(rename = "dataDescriptor")]
    pub data_descriptor: String,
    #[serde(rename = "dataValue")]
    pub data_value: String,
}

impl From<CallbackFields> for OpaqueData {
    fn from(fields: CallbackFields) -> Self {
        OpaqueData::new(fields.data_descriptor, fields.data_value)
    }
}

/// Raw card details for a card-present or directly keyed charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCard {
    /// Primary account number
    #[serde(rename = "cardNumber")]
    pub card_number: String,
    /// Expiration in `YYYY-MM` form
    #[serde(rename = "expirationDate")]
    pub expiration_date: String,
    /// Card verification code, if collected
    #[serde(rename = "cardCode", skip_serializing_if = "Option::is_none")]
    pub card_code: Option<String>,
}

impl RawCard {
    /// Create raw card details
    pub fn new(card_number: impl Into<String>, expiration_date: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            expiration_date: expiration_date.into(),
            card_code: None,
        }
    }

    /// Set the card verification code
    pub fn with_card_code(mut self, card_code: impl Into<String>) -> Self {
        self.card_code = Some(card_code.into());
        self
    }
}

/// How a charge is funded.
///
/// The widget flow always produces `Opaque`; `Card` exists so a future
/// direct-entry path is a real variant rather than a blank card object
/// smuggled past the gateway.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    /// Tokenized card data from the hosted widget
    Opaque(OpaqueData),
    /// Raw card details (PCI scope is the caller's problem)
    Card(RawCard),
}

/// Customer classification reported to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerType {
    #[serde(rename = "individual")]
    Individual,
    #[serde(rename = "business")]
    Business,
}

impl CustomerType {
    /// Wire form expected by the gateway
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Individual => "individual",
            CustomerType::Business => "business",
        }
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Individual
    }
}

/// A single charge attempt against a previously tokenized card
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    /// Amount in major currency units (e.g. 100.00)
    pub amount: Decimal,
    /// ISO 4217 currency code
    pub currency: String,
    /// Merchant-side customer identifier recorded on the transaction
    pub customer_id: String,
    /// Customer classification
    pub customer_type: CustomerType,
    /// Funding source
    pub payment: PaymentMethod,
}

impl ChargeRequest {
    /// Create a USD charge of an individual customer's tokenized card
    pub fn new(amount: Decimal, customer_id: impl Into<String>, token: OpaqueData) -> Self {
        Self {
            amount,
            currency: "USD".to_string(),
            customer_id: customer_id.into(),
            customer_type: CustomerType::default(),
            payment: PaymentMethod::Opaque(token),
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the customer type
    pub fn with_customer_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = customer_type;
        self
    }

    /// Set the funding source
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }
}

/// Normalized outcome of a charge submission
#[derive(Debug, Clone)]
pub struct ChargeResult {
    /// Whether the gateway approved the transaction
    pub success: bool,
    /// Gateway-assigned transaction id
    pub transaction_id: String,
    /// Authorization code, when the processor returned one
    pub auth_code: Option<String>,
    /// Gateway response code (`"1"` is approved)
    pub response_code: String,
    /// Merchant-side correlation id submitted with the charge
    pub correlation_id: String,
    /// The gateway's response payload, unmodified
    pub raw: Value,
}

/// Merchant-side correlation id attached to each charge for tracing.
///
/// Millisecond timestamp plus a random suffix; distinct per call in
/// practice and within the gateway's 20-character refId limit, which a
/// UUID would overflow. Collision avoidance is best-effort only — the
/// id does not make charge submission idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh correlation id
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("{}{:06}", millis, suffix))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
