//! Request model and gateway configuration.

use std::sync::Arc;

use masking::{PeekInterface, Secret};
use serde::Deserialize;

use crate::{
    consts,
    errors::{CustomResult, GatewayError},
    observer::{Notification, Observer, ObserverRegistry},
};

/// Transaction kinds understood by the payment service. The kind is fixed at
/// request construction and selects the reply shape during classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Payment,
    Modify,
    Cancel,
    Capture,
    Refund,
    BackOfficeCode,
    AuthorisationCode,
    Inquiry,
    IncreaseAuthorisation,
    Void,
}

impl TransactionKind {
    /// Modification kinds receive a bare acknowledgement reply and
    /// short-circuit classification. Increase authorisation is the
    /// exception: its reply carries a full order status.
    pub fn is_modification(self) -> bool {
        matches!(
            self,
            Self::Modify
                | Self::Cancel
                | Self::Capture
                | Self::Refund
                | Self::BackOfficeCode
                | Self::AuthorisationCode
                | Self::Void
        )
    }
}

/// Merchant account credentials for Basic authentication and the
/// `merchantCode` root attribute.
#[derive(Clone, Debug)]
pub struct MerchantAuth {
    pub merchant_code: String,
    pub password: Secret<String>,
    /// Installation id forwarded by concrete request bodies that need it.
    pub installation: Option<String>,
}

impl MerchantAuth {
    pub(crate) fn validate(&self) -> CustomResult<(), GatewayError> {
        if self.merchant_code.is_empty() || self.password.peek().is_empty() {
            return Err(GatewayError::MissingCredentials.into());
        }
        Ok(())
    }
}

/// Endpoint configuration. Defaults carry the two fixed WorldPay hosts;
/// overriding is only expected for tests and proxied deployments.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub live_url: String,
    pub test_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            live_url: format!("{}{}", consts::EP_HOST_LIVE, consts::EP_PATH),
            test_url: format!("{}{}", consts::EP_HOST_TEST, consts::EP_PATH),
        }
    }
}

/// One logical payment service operation.
///
/// The kind-specific XML body is assembled by the caller; this type carries
/// it together with the merchant account, the optional session token from a
/// prior 3-D Secure round trip, and the request's own observer list. Each
/// send is an independent exchange; requests are never pooled.
#[derive(Clone, Debug)]
pub struct PaymentRequest {
    auth: MerchantAuth,
    kind: TransactionKind,
    body: String,
    redirect_cookie: Option<Secret<String>>,
    test_mode: bool,
    observers: ObserverRegistry,
}

impl PaymentRequest {
    pub fn new(auth: MerchantAuth, kind: TransactionKind, body: impl Into<String>) -> Self {
        Self {
            auth,
            kind,
            body: body.into(),
            redirect_cookie: None,
            test_mode: false,
            observers: ObserverRegistry::default(),
        }
    }

    /// Sets the opaque session token returned by a prior 3-D Secure redirect.
    pub fn set_redirect_cookie(&mut self, token: Secret<String>) {
        self.redirect_cookie = Some(token);
    }

    /// Routes the exchange to the sandbox host instead of the live one.
    pub fn set_test_mode(&mut self, test_mode: bool) {
        self.test_mode = test_mode;
    }

    pub fn auth(&self) -> &MerchantAuth {
        &self.auth
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub(crate) fn redirect_cookie(&self) -> Option<&Secret<String>> {
        self.redirect_cookie.as_ref()
    }

    pub(crate) fn endpoint<'a>(&self, config: &'a GatewayConfig) -> &'a str {
        if self.test_mode {
            &config.test_url
        } else {
            &config.live_url
        }
    }

    /// Registers an exchange listener. See [`ObserverRegistry::attach`].
    pub fn attach(&mut self, observer: Arc<dyn Observer>) {
        self.observers.attach(observer);
    }

    /// Removes an exchange listener by identity. See
    /// [`ObserverRegistry::detach`].
    pub fn detach(&mut self, observer: &Arc<dyn Observer>) {
        self.observers.detach(observer);
    }

    /// Dispatches a payload to the attached listeners.
    pub fn notify(&self, notification: Notification<'_>) {
        self.observers.notify(self, notification);
    }
}
