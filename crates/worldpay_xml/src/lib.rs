#![forbid(unsafe_code)]

//! Client for WorldPay's XML-over-HTTP payment service.
//!
//! The crate builds DTD-declared `paymentService` documents for
//! authorisation, capture, refund, cancellation and inquiry operations,
//! posts them with Basic authentication (preserving backend-node affinity
//! across 3-D Secure round trips via the `machine` cookie), masks sensitive
//! payment data before it reaches auditing observers, and classifies the
//! XML reply into a typed response with vendor status codes resolved to
//! readable messages.
//!
//! ```no_run
//! use masking::Secret;
//! use worldpay_xml::{MerchantAuth, PaymentRequest, Sender, TransactionKind};
//!
//! # async fn run() -> worldpay_xml::CustomResult<(), worldpay_xml::GatewayError> {
//! let auth = MerchantAuth {
//!     merchant_code: "MERCHANT".to_string(),
//!     password: Secret::new("password".to_string()),
//!     installation: None,
//! };
//! let mut request = PaymentRequest::new(
//!     auth,
//!     TransactionKind::Payment,
//!     "<submit><order orderCode=\"T1\">...</order></submit>",
//! );
//! request.set_test_mode(true);
//!
//! let response = Sender::default().send(&request).await?;
//! if response.is_redirect() {
//!     // Send the cardholder's browser to the issuer URL.
//! } else if response.is_successful() {
//!     let reference = response.transaction_reference();
//! }
//! # Ok(())
//! # }
//! ```

pub mod consts;
mod document;
pub mod errors;
pub mod filter;
pub mod observer;
pub mod response;
pub mod sender;
mod session;
mod status;
pub mod types;

pub use self::{
    errors::{CustomResult, GatewayError},
    observer::{Notification, Observer},
    response::{ModifyResponse, RedirectResponse, StandardResponse, WorldpayResponse, XmlNode},
    sender::Sender,
    types::{GatewayConfig, MerchantAuth, PaymentRequest, TransactionKind},
};
