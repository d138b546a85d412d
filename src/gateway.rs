//! JSON API client for the card gateway
//!
//! Speaks the two gateway operations this crate needs: the merchant
//! details lookup that yields the public client key, and transaction
//! creation against a tokenized card.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use crate::credentials::MerchantCredentials;
use crate::types::{ChargeRequest, ChargeResult, CorrelationId, OpaqueData, PaymentMethod, RawCard};
use crate::{PaymentError, Result};

/// Timeout applied to every gateway round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result code the gateway reports on success
const RESULT_CODE_OK: &str = "Ok";

/// Transaction response code for an approved charge
const RESPONSE_CODE_APPROVED: &str = "1";

/// Client for the gateway's JSON API
#[derive(Debug, Clone)]
pub struct GatewayClient {
    credentials: MerchantCredentials,
    endpoint: String,
    client: Client,
}

impl GatewayClient {
    /// Create a client against the environment the credentials select
    pub fn new(credentials: MerchantCredentials) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let endpoint = credentials.environment().api_url().to_string();
        Self {
            credentials,
            endpoint,
            client,
        }
    }

    /// Override the API endpoint (tests, merchant-side proxies)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The credentials this client authenticates with
    pub fn credentials(&self) -> &MerchantCredentials {
        &self.credentials
    }

    /// Fetch the merchant's short-lived public client key.
    ///
    /// One network round trip per call; the key is deliberately not
    /// cached because the gateway does not document a rotation window.
    pub async fn public_client_key(&self) -> Result<String> {
        let envelope = GetMerchantDetailsEnvelope {
            get_merchant_details_request: GetMerchantDetailsRequest {
                merchant_authentication: self.merchant_authentication(),
            },
        };

        let body = self.post(&envelope).await?;
        let details: MerchantDetailsResponse = serde_json::from_value(body)?;

        if details.messages.result_code != RESULT_CODE_OK {
            let (code, text) = details.messages.first();
            warn!("Merchant details lookup rejected: {}: {}", code, text);
            return Err(PaymentError::credential(code, text));
        }

        details.public_client_key.ok_or_else(|| {
            PaymentError::credential(
                "E00001",
                "Merchant details response did not include a public client key",
            )
        })
    }

    /// Submit a charge for the given request under the given
    /// correlation id. One attempt, no retries.
    pub async fn create_transaction(
        &self,
        request: &ChargeRequest,
        correlation_id: &CorrelationId,
    ) -> Result<ChargeResult> {
        let envelope = CreateTransactionEnvelope {
            create_transaction_request: CreateTransactionRequest {
                merchant_authentication: self.merchant_authentication(),
                ref_id: correlation_id.as_str(),
                transaction_request: TransactionRequestWire {
                    transaction_type: "authCaptureTransaction",
                    amount: request.amount.to_string(),
                    currency_code: &request.currency,
                    payment: PaymentWire::from_method(&request.payment),
                    customer: CustomerWire {
                        customer_type: request.customer_type.as_str(),
                        id: &request.customer_id,
                    },
                },
            },
        };

        info!(
            "Submitting charge of {} {} (correlation id {})",
            request.amount, request.currency, correlation_id
        );

        let raw = self.post(&envelope).await?;
        let parsed: CreateTransactionResponse = serde_json::from_value(raw.clone())?;

        if parsed.messages.result_code != RESULT_CODE_OK {
            let (code, text) = parsed
                .transaction_response
                .as_ref()
                .and_then(TransactionResponseWire::first_error)
                .unwrap_or_else(|| parsed.messages.first());
            warn!("Charge rejected by gateway: {}: {}", code, text);
            return Err(PaymentError::gateway(code, text));
        }

        let transaction = parsed.transaction_response.ok_or_else(|| {
            PaymentError::gateway(
                "E00001",
                "Gateway reported success without a transaction response",
            )
        })?;

        if transaction.response_code != RESPONSE_CODE_APPROVED {
            let (code, text) = transaction.first_error().unwrap_or_else(|| {
                (
                    transaction.response_code.clone(),
                    "Transaction was not approved".to_string(),
                )
            });
            warn!("Charge not approved: {}: {}", code, text);
            return Err(PaymentError::gateway(code, text));
        }

        Ok(ChargeResult {
            success: true,
            transaction_id: transaction.trans_id,
            auth_code: transaction.auth_code.filter(|code| !code.is_empty()),
            response_code: transaction.response_code,
            correlation_id: correlation_id.as_str().to_string(),
            raw,
        })
    }

    fn merchant_authentication(&self) -> MerchantAuthentication<'_> {
        MerchantAuthentication {
            name: self.credentials.api_login_id(),
            transaction_key: self.credentials.transaction_key(),
        }
    }

    async fn post<T: Serialize>(&self, envelope: &T) -> Result<Value> {
        let response = self.client.post(&self.endpoint).json(envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::gateway(
                status.as_str(),
                "Gateway returned a non-success HTTP status",
            ));
        }

        let text = response.text().await?;
        decode_body(&text)
    }
}

/// Decode a gateway response body, tolerating the UTF-8 BOM the
/// gateway prepends to its JSON.
fn decode_body(text: &str) -> Result<Value> {
    let trimmed = text.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(trimmed)?)
}

// --- Wire types ---
//
// Field declaration order matters: the gateway validates JSON bodies
// against its XML schema in element order.

#[derive(Serialize)]
struct MerchantAuthentication<'a> {
    name: &'a str,
    #[serde(rename = "transactionKey")]
    transaction_key: &'a str,
}

#[derive(Serialize)]
struct GetMerchantDetailsEnvelope<'a> {
    #[serde(rename = "getMerchantDetailsRequest")]
    get_merchant_details_request: GetMerchantDetailsRequest<'a>,
}

#[derive(Serialize)]
struct GetMerchantDetailsRequest<'a> {
    #[serde(rename = "merchantAuthentication")]
    merchant_authentication: MerchantAuthentication<'a>,
}

#[derive(Serialize)]
struct CreateTransactionEnvelope<'a> {
    #[serde(rename = "createTransactionRequest")]
    create_transaction_request: CreateTransactionRequest<'a>,
}

#[derive(Serialize)]
struct CreateTransactionRequest<'a> {
    #[serde(rename = "merchantAuthentication")]
    merchant_authentication: MerchantAuthentication<'a>,
    #[serde(rename = "refId")]
    ref_id: &'a str,
    #[serde(rename = "transactionRequest")]
    transaction_request: TransactionRequestWire<'a>,
}

#[derive(Serialize)]
struct TransactionRequestWire<'a> {
    #[serde(rename = "transactionType")]
    transaction_type: &'static str,
    amount: String,
    #[serde(rename = "currencyCode")]
    currency_code: &'a str,
    payment: PaymentWire<'a>,
    customer: CustomerWire<'a>,
}

#[derive(Serialize)]
struct PaymentWire<'a> {
    #[serde(rename = "creditCard", skip_serializing_if = "Option::is_none")]
    credit_card: Option<&'a RawCard>,
    #[serde(rename = "opaqueData", skip_serializing_if = "Option::is_none")]
    opaque_data: Option<&'a OpaqueData>,
}

impl<'a> PaymentWire<'a> {
    fn from_method(method: &'a PaymentMethod) -> Self {
        match method {
            PaymentMethod::Opaque(token) => Self {
                credit_card: None,
                opaque_data: Some(token),
            },
            PaymentMethod::Card(card) => Self {
                credit_card: Some(card),
                opaque_data: None,
            },
        }
    }
}

#[derive(Serialize)]
struct CustomerWire<'a> {
    #[serde(rename = "type")]
    customer_type: &'a str,
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesBlock {
    #[serde(rename = "resultCode")]
    result_code: String,
    #[serde(default)]
    message: Vec<GatewayMessage>,
}

impl MessagesBlock {
    fn first(&self) -> (String, String) {
        self.message
            .first()
            .map(|m| (m.code.clone(), m.text.clone()))
            .unwrap_or_else(|| {
                (
                    "E00001".to_string(),
                    "Gateway response carried no messages".to_string(),
                )
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GatewayMessage {
    #[serde(default)]
    code: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MerchantDetailsResponse {
    #[serde(rename = "publicClientKey")]
    public_client_key: Option<String>,
    messages: MessagesBlock,
}

#[derive(Debug, Deserialize)]
struct CreateTransactionResponse {
    #[serde(rename = "transactionResponse")]
    transaction_response: Option<TransactionResponseWire>,
    messages: MessagesBlock,
}

#[derive(Debug, Deserialize)]
struct TransactionResponseWire {
    #[serde(rename = "responseCode", default)]
    response_code: String,
    #[serde(rename = "authCode")]
    auth_code: Option<String>,
    #[serde(rename = "transId", default)]
    trans_id: String,
    #[serde(default)]
    errors: Vec<TransactionErrorWire>,
}

impl TransactionResponseWire {
    fn first_error(&self) -> Option<(String, String)> {
        self.errors
            .first()
            .map(|e| (e.error_code.clone(), e.error_text.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct TransactionErrorWire {
    #[serde(rename = "errorCode", default)]
    error_code: String,
    #[serde(rename = "errorText", default)]
    error_text: String,
}
