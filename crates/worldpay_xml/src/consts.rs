//! Protocol constants for the WorldPay XML payment service.

/// Base URL of the live service.
pub const EP_HOST_LIVE: &str = "https://secure.worldpay.com";

/// Base URL of the sandbox service, used when test mode is enabled.
pub const EP_HOST_TEST: &str = "https://secure-test.worldpay.com";

/// Service path shared by both hosts.
pub const EP_PATH: &str = "/jsp/merchant/xml/paymentService.jsp";

/// WorldPay XML API version carried on the `paymentService` root element.
pub const WORLDPAY_VERSION: &str = "1.4";

/// XML declaration values for the outbound document.
pub const XML_VERSION: &str = "1.0";
pub const XML_ENCODING: &str = "utf-8";

/// DOCTYPE content declaring the payment service DTD. The service rejects
/// documents missing this declaration.
pub const WORLDPAY_DOC_TYPE: &str = r#"paymentService PUBLIC "-//WorldPay//DTD WorldPay PaymentService v1//EN" "http://dtd.worldpay.com/paymentService_v1.dtd""#;

/// Replacement text for card numbers in observer payloads.
pub const MASKED_CARD_NUMBER: &str = "**** **** **** ****";

/// Replacement text for card verification codes in observer payloads.
pub const MASKED_CVC: &str = "***";

/// Name of the session-affinity cookie. The vendor's load balancer pins a
/// 3-D Secure session to one application node via this cookie.
pub const MACHINE_COOKIE: &str = "machine";

/// Terminal state reported for an authorised payment.
pub const AUTHORISED: &str = "AUTHORISED";

/// Message reported while no terminal state has been reached.
pub const PENDING: &str = "PENDING";
