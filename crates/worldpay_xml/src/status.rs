//! ISO 8583 return-code mapping and message resolution.

use std::{collections::HashMap, sync::LazyLock};

use error_stack::ResultExt;

use crate::{
    consts,
    errors::{CustomResult, GatewayError},
    response::XmlNode,
};

/// Vendor mapping of ISO 8583 return codes to authorisation outcomes.
/// Read-only for the lifetime of the process.
static ISO8583_MESSAGES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (0, "AUTHORISED"),
        (2, "REFERRED"),
        (3, "INVALID ACCEPTOR"),
        (4, "HOLD CARD"),
        (5, "REFUSED"),
        (8, "APPROVE AFTER IDENTIFICATION"),
        (12, "INVALID TRANSACTION"),
        (13, "INVALID AMOUNT"),
        (14, "INVALID ACCOUNT"),
        (15, "INVALID CARD ISSUER"),
        (17, "ANNULATION BY CLIENT"),
        (19, "REPEAT OF LAST TRANSACTION"),
        (20, "ACQUIRER ERROR"),
        (21, "REVERSAL NOT PROCESSED, MISSING AUTHORISATION"),
        (24, "UPDATE OF FILE IMPOSSIBLE"),
        (25, "REFERENCE NUMBER CANNOT BE FOUND"),
        (26, "DUPLICATE REFERENCE NUMBER"),
        (27, "ERROR IN REFERENCE NUMBER FIELD"),
        (28, "ACCESS DENIED"),
        (29, "IMPOSSIBLE REFERENCE NUMBER"),
        (30, "FORMAT ERROR"),
        (31, "UNKNOWN ACQUIRER ACCOUNT CODE"),
        (33, "CARD EXPIRED"),
        (34, "FRAUD SUSPICION"),
        (38, "SECURITY CODE EXPIRED"),
        (40, "REQUESTED FUNCTION NOT SUPPORTED"),
        (41, "LOST CARD"),
        (43, "STOLEN CARD, PICK UP"),
        (51, "LIMIT EXCEEDED"),
        (55, "INVALID SECURITY CODE"),
        (56, "UNKNOWN CARD"),
        (57, "ILLEGAL TRANSACTION"),
        (58, "TRANSACTION NOT PERMITTED"),
        (62, "RESTRICTED CARD"),
        (63, "SECURITY RULES VIOLATED"),
        (64, "AMOUNT HIGHER THAN PREVIOUS TRANSACTION AMOUNT"),
        (68, "TRANSACTION TIMED OUT"),
        (75, "SECURITY CODE INVALID"),
        (76, "CARD BLOCKED"),
        (80, "AMOUNT NO LONGER AVAILABLE, AUTHORISATION EXPIRED"),
        (85, "REJECTED BY CARD ISSUER"),
        (91, "CREDITCARD ISSUER TEMPORARILY NOT REACHABLE"),
        (92, "CREDITCARD TYPE NOT PROCESSED BY ACQUIRER"),
        (94, "DUPLICATE REQUEST ERROR"),
        (97, "SECURITY BREACH"),
    ])
});

/// Resolves the human-readable outcome for a reply node.
///
/// Lookup order: an `error` child wins outright; otherwise a
/// `payment/ISO8583ReturnCode` code attribute is looked up in the fixed
/// table (an unmapped code is a fatal mapping error, never a silent
/// default); otherwise a successful reply reads `AUTHORISED`; otherwise the
/// outcome is still `PENDING`.
pub(crate) fn resolve_message(
    data: &XmlNode,
    successful: bool,
) -> CustomResult<String, GatewayError> {
    if let Some(error) = data.child("error") {
        return Ok(format!("ERROR: {}", error.text()));
    }

    let mut message = consts::PENDING.to_string();

    if let Some(return_code) = data.descend(&["payment", "ISO8583ReturnCode"]) {
        if let Some(code) = return_code.attribute("code") {
            let code = code
                .parse::<u16>()
                .change_context(GatewayError::InvalidResponse)
                .attach_printable("non-numeric ISO 8583 return code")?;
            message = (*ISO8583_MESSAGES
                .get(&code)
                .ok_or(GatewayError::UnmappedStatusCode(code))?)
            .to_string();
        }
    }

    if successful {
        message = consts::AUTHORISED.to_string();
    }

    Ok(message)
}
