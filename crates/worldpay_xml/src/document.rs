//! Outbound document assembly.
//!
//! Every request travels as a `paymentService` document declared against the
//! vendor's public DTD. The kind-specific body arrives pre-rendered from the
//! concrete request; this module only wraps it in the envelope the service
//! expects.

use error_stack::ResultExt;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    consts,
    errors::{CustomResult, GatewayError},
};

/// Wraps the rendered body in a complete document: UTF-8 declaration, the
/// WorldPay DOCTYPE and the versioned `paymentService` root carrying the
/// merchant code.
pub(crate) fn build_document(
    merchant_code: &str,
    body: &str,
) -> CustomResult<String, GatewayError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new(
            consts::XML_VERSION,
            Some(consts::XML_ENCODING),
            None,
        )))
        .change_context(GatewayError::RequestEncodingFailed)?;
    writer
        .write_event(Event::DocType(BytesText::from_escaped(
            consts::WORLDPAY_DOC_TYPE,
        )))
        .change_context(GatewayError::RequestEncodingFailed)?;

    let mut root = BytesStart::new("paymentService");
    root.push_attribute(("version", consts::WORLDPAY_VERSION));
    root.push_attribute(("merchantCode", merchant_code));
    writer
        .write_event(Event::Start(root))
        .change_context(GatewayError::RequestEncodingFailed)?;

    // The body is already well-formed XML; write it through without
    // re-escaping.
    writer
        .write_event(Event::Text(BytesText::from_escaped(body)))
        .change_context(GatewayError::RequestEncodingFailed)?;
    writer
        .write_event(Event::End(BytesEnd::new("paymentService")))
        .change_context(GatewayError::RequestEncodingFailed)?;

    String::from_utf8(writer.into_inner()).change_context(GatewayError::RequestEncodingFailed)
}
