//! Error types surfaced by the gateway.

/// Type alias for `Result` with an error-stack report as the error type.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures raised by the send pipeline and response handling.
///
/// A structurally valid but business-level-declined reply is not an error:
/// it is a [`WorldpayResponse`](crate::response::WorldpayResponse) whose
/// `is_successful` is `false`. A `GatewayError` from send means no response
/// is available for the exchange.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Merchant code or password is not configured")]
    MissingCredentials,
    #[error("Failed to parse the payment service endpoint URL")]
    UrlParsingFailed,
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Failed to encode the outbound payment service document")]
    RequestEncodingFailed,
    #[error("Request to the payment service timed out")]
    RequestTimedOut,
    #[error("Failed to send request to the payment service: {0}")]
    RequestNotSent(String),
    #[error("Empty or malformed response received from the payment service")]
    InvalidResponse,
    #[error("No message is mapped for ISO 8583 return code {0}")]
    UnmappedStatusCode(u16),
}
