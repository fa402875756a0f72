//! Response parsing and classification.
//!
//! Replies share a `paymentService` envelope whose nesting depth varies:
//! most operation kinds add an operation-result wrapper that error replies
//! omit, so error envelopes sit one level shallower than success envelopes.
//! That asymmetry is a quirk of the wire protocol and is reproduced exactly
//! here.

use error_stack::{report, ResultExt};
use quick_xml::{events::Event, Reader};

use crate::{
    consts,
    errors::{CustomResult, GatewayError},
    status,
    types::TransactionKind,
};

/// A parsed XML element: a named node with attributes, text content and
/// child elements. Accessors return `None` for absent nodes so every
/// navigation step is an explicit presence check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text content of this element, surrounding whitespace
    /// trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element carrying the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn first_child(&self) -> Option<&XmlNode> {
        self.children.first()
    }

    /// Walks a chain of child names, yielding `None` as soon as any link is
    /// missing.
    pub fn descend(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }
}

/// Parses a reply body into its root node. Malformed XML and bodies without
/// a root element fail with [`GatewayError::InvalidResponse`].
pub(crate) fn parse_document(body: &str) -> CustomResult<XmlNode, GatewayError> {
    let mut reader = Reader::from_str(body);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader
            .read_event()
            .change_context(GatewayError::InvalidResponse)?
        {
            Event::Start(start) => {
                let node = element_from_start(&start)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = element_from_start(&start)?;
                attach(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                // The reader has already verified that this end tag matches.
                let node = stack.pop().ok_or(GatewayError::InvalidResponse)?;
                attach(node, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .change_context(GatewayError::InvalidResponse)?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(value.trim());
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    node.text
                        .push_str(String::from_utf8_lossy(&data.into_inner()).as_ref());
                }
            }
            Event::Eof => break,
            // Declarations, the DOCTYPE, comments and processing
            // instructions carry no response data.
            _ => {}
        }
    }

    root.ok_or_else(|| report!(GatewayError::InvalidResponse))
        .attach_printable("response body contains no root element")
}

fn element_from_start(
    start: &quick_xml::events::BytesStart<'_>,
) -> CustomResult<XmlNode, GatewayError> {
    let mut node = XmlNode {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..XmlNode::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute.change_context(GatewayError::InvalidResponse)?;
        let value = attribute
            .unescape_value()
            .change_context(GatewayError::InvalidResponse)?;
        node.attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(node)
}

fn attach(node: XmlNode, stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            // Keep the first root; a second one would have failed the reader.
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

/// Reply to a payment, inquiry or increase-authorisation operation.
#[derive(Clone, Debug)]
pub struct StandardResponse {
    data: XmlNode,
}

/// Reply carrying a 3-D Secure challenge: the cardholder's browser must be
/// sent to the issuer before authorisation completes.
#[derive(Clone, Debug)]
pub struct RedirectResponse {
    data: XmlNode,
}

impl RedirectResponse {
    /// Issuer URL for the 3-D Secure challenge, when the full
    /// `requestInfo/request3DSecure/issuerURL` chain is present.
    pub fn issuer_url(&self) -> Option<&str> {
        self.data
            .descend(&["requestInfo", "request3DSecure", "issuerURL"])
            .map(XmlNode::text)
    }
}

/// Acknowledgement reply to a modification operation.
#[derive(Clone, Debug)]
pub struct ModifyResponse {
    data: XmlNode,
}

/// Classified reply from the payment service.
#[derive(Clone, Debug)]
pub enum WorldpayResponse {
    Standard(StandardResponse),
    Redirect(RedirectResponse),
    Modify(ModifyResponse),
}

impl WorldpayResponse {
    /// Parses and classifies a reply body in the context of the originating
    /// request's transaction kind.
    pub fn classify(kind: TransactionKind, body: &str) -> CustomResult<Self, GatewayError> {
        if body.trim().is_empty() {
            return Err(report!(GatewayError::InvalidResponse))
                .attach_printable("empty response body");
        }

        let envelope = parse_document(body)?;
        // Drop the outer protocol wrapper common to every reply.
        let reply = envelope
            .first_child()
            .ok_or(GatewayError::InvalidResponse)?;

        if kind.is_modification() {
            return Ok(Self::Modify(ModifyResponse {
                data: reply.clone(),
            }));
        }

        // Error replies omit the operation-result wrapper, leaving them one
        // level shallower than success replies.
        let resolved = if reply.child("error").is_some() {
            reply.clone()
        } else {
            reply
                .first_child()
                .ok_or(GatewayError::InvalidResponse)?
                .clone()
        };

        if resolved.child("requestInfo").is_some() {
            Ok(Self::Redirect(RedirectResponse { data: resolved }))
        } else {
            Ok(Self::Standard(StandardResponse { data: resolved }))
        }
    }

    /// Resolved reply node backing this response.
    pub fn node(&self) -> &XmlNode {
        match self {
            Self::Standard(response) => &response.data,
            Self::Redirect(response) => &response.data,
            Self::Modify(response) => &response.data,
        }
    }

    /// True when the reply carries the complete
    /// `requestInfo/request3DSecure/issuerURL` chain. A broken chain means
    /// not-a-redirect, never an error.
    pub fn is_redirect(&self) -> bool {
        self.node()
            .descend(&["requestInfo", "request3DSecure", "issuerURL"])
            .is_some()
    }

    /// True when `payment/lastEvent` reports the authorised terminal state.
    pub fn is_successful(&self) -> bool {
        self.node()
            .descend(&["payment", "lastEvent"])
            .is_some_and(|event| event.text().eq_ignore_ascii_case(consts::AUTHORISED))
    }

    /// Human-readable outcome derived from the reply: an `error` node wins,
    /// then the ISO 8583 return-code table, then the authorised terminal
    /// state, then `PENDING`.
    pub fn message(&self) -> CustomResult<String, GatewayError> {
        status::resolve_message(self.node(), self.is_successful())
    }

    /// Value of the `orderCode` attribute on the resolved node, when present.
    pub fn transaction_reference(&self) -> Option<&str> {
        self.node().attribute("orderCode")
    }
}
