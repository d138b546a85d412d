//! # anet-accept - hosted card tokenization and charges
//!
//! A small façade over the Authorize.Net Accept suite: render the
//! hosted tokenization widget for a payment page, then redeem the
//! opaque token it posts back by submitting a charge. Raw card data
//! never transits this crate on the widget path; the browser-side
//! widget exchanges it with the gateway for a single-use
//! descriptor/value pair.
//!
//! ```no_run
//! use anet_accept::{AcceptPayments, ButtonRequest, ChargeRequest, MerchantCredentials, OpaqueData};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> anet_accept::Result<()> {
//! let payments = AcceptPayments::new(MerchantCredentials::sandbox("login-id", "txn-key"));
//!
//! // Embed this fragment in the payment page.
//! let markup = payments
//!     .render_button(&ButtonRequest::new("https://shop.example/payment/callback"))
//!     .await?;
//!
//! // Later, with the token the widget posted to the callback URL:
//! let token = OpaqueData::new("COMMON.ACCEPT.INAPP.PAYMENT", "opaque-value");
//! let result = payments
//!     .charge(&ChargeRequest::new(Decimal::new(1999, 2), "customer-42", token))
//!     .await?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod error;
pub mod facade;
pub mod gateway;
pub mod template;
pub mod types;

// Re-exports for convenience
pub use credentials::{Environment, MerchantCredentials};
pub use error::{PaymentError, Result};
pub use facade::{AcceptPayments, ButtonRequest};
pub use gateway::GatewayClient;
pub use types::*;

/// Current version of the anet-accept library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
