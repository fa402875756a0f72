//! The send pipeline: one request/response exchange with the payment
//! service.

use base64::Engine;
use error_stack::{report, ResultExt};
use masking::PeekInterface;
use reqwest::header;
use url::Url;

use crate::{
    document,
    errors::{CustomResult, GatewayError},
    filter,
    observer::Notification,
    response::WorldpayResponse,
    session,
    types::{GatewayConfig, PaymentRequest},
};

/// Performs payment service exchanges against a configured pair of
/// endpoints.
///
/// Each call to [`send`](Self::send) is an independent exchange: one
/// document, one POST, one classified reply. There is no retry, no shared
/// connection pool and no cross-request state; the cookie store lives and
/// dies with the exchange.
#[derive(Clone, Debug, Default)]
pub struct Sender {
    config: GatewayConfig,
}

impl Sender {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Runs the full exchange for one request.
    ///
    /// Observers attached to the request see the masked outbound document
    /// before transmission and the raw inbound body after it, regardless of
    /// HTTP status. Transport failures are fatal to the exchange and
    /// propagate; classification of non-2xx bodies happens downstream like
    /// any other reply.
    #[tracing::instrument(skip_all, fields(transaction_kind = ?request.kind()))]
    pub async fn send(
        &self,
        request: &PaymentRequest,
    ) -> CustomResult<WorldpayResponse, GatewayError> {
        request.auth().validate()?;

        let endpoint = request.endpoint(&self.config);
        let url = Url::parse(endpoint).change_context(GatewayError::UrlParsingFailed)?;

        let payload = document::build_document(&request.auth().merchant_code, request.body())?;

        let authorisation = base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            request.auth().merchant_code,
            request.auth().password.peek()
        ));

        let jar = session::session_jar(request.redirect_cookie(), &url);
        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()
            .change_context(GatewayError::ClientConstructionFailed)?;

        // Sensitive payment data must never reach observers unmasked.
        let masked = filter::mask_pci_data(&payload);
        request.notify(Notification::Request(&masked));

        tracing::info!(endpoint = %url, "dispatching payment service request");

        let response = client
            .post(url)
            .header(header::AUTHORIZATION, format!("Basic {authorisation}"))
            .header(header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(payload)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    report!(GatewayError::RequestTimedOut)
                } else {
                    report!(GatewayError::RequestNotSent(error.to_string()))
                }
            })
            .attach_printable("unable to reach the payment service")?;

        let status_code = response.status();
        let body = response
            .text()
            .await
            .change_context(GatewayError::InvalidResponse)
            .attach_printable("failed to read the response body")?;
        tracing::info!(%status_code, "received payment service response");

        request.notify(Notification::Response(&body));

        WorldpayResponse::classify(request.kind(), &body)
    }
}
