//! PCI masking of outbound documents before they reach observers.

use std::sync::LazyLock;

use regex::Regex;

use crate::consts;

static CARD_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<cardNumber>[0-9]{10,}</cardNumber>").expect("card number pattern is valid")
});

static CVC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<cvc>[0-9]{3,4}</cvc>").expect("cvc pattern is valid"));

/// Replaces card numbers (10+ digits) and verification codes (3-4 digits)
/// in the given XML payload with fixed placeholders. Everything else,
/// including whitespace and the encoding declaration, passes through
/// unchanged; payloads without matches come back byte-identical.
pub fn mask_pci_data(payload: &str) -> String {
    let card_replacement = format!("<cardNumber>{}</cardNumber>", consts::MASKED_CARD_NUMBER);
    let cvc_replacement = format!("<cvc>{}</cvc>", consts::MASKED_CVC);

    let masked = CARD_NUMBER_PATTERN.replace_all(payload, card_replacement.as_str());
    CVC_PATTERN
        .replace_all(&masked, cvc_replacement.as_str())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_card_number_and_cvc() {
        let payload = "<paymentDetails><CARD-SSL><cardNumber>4111111111111111</cardNumber>\
                       <cvc>123</cvc></CARD-SSL></paymentDetails>";
        let masked = mask_pci_data(payload);

        assert!(!masked.contains("4111111111111111"));
        assert!(!masked.contains("<cvc>123</cvc>"));
        assert!(masked.contains("<cardNumber>**** **** **** ****</cardNumber>"));
        assert!(masked.contains("<cvc>***</cvc>"));
    }

    #[test]
    fn masks_four_digit_cvc() {
        assert_eq!(mask_pci_data("<cvc>1234</cvc>"), "<cvc>***</cvc>");
    }

    #[test]
    fn leaves_unmatched_payloads_byte_identical() {
        let payload = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                       <paymentService version=\"1.4\" merchantCode=\"M\">\n  \
                       <inquiry><orderInquiry orderCode=\"T1\"/></inquiry>\n\
                       </paymentService>";
        assert_eq!(mask_pci_data(payload), payload);
    }

    #[test]
    fn ignores_values_outside_the_digit_ranges() {
        // Nine digits is below the card number floor; five above the cvc cap.
        let payload = "<cardNumber>411111111</cardNumber><cvc>12345</cvc>";
        assert_eq!(mask_pci_data(payload), payload);
    }

    #[test]
    fn masks_every_occurrence() {
        let payload = "<cardNumber>4111111111111111</cardNumber>\
                       <cardNumber>5555555555554444</cardNumber>";
        let masked = mask_pci_data(payload);
        assert_eq!(masked.matches(consts::MASKED_CARD_NUMBER).count(), 2);
    }
}
