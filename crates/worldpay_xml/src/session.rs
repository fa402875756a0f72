//! Session-affinity cookie handling.

use std::sync::Arc;

use masking::{PeekInterface, Secret};
use reqwest::cookie::Jar;
use url::Url;

use crate::consts;

/// Builds the cookie store for one exchange. When a prior 3-D Secure round
/// trip handed back a session token, a `machine` cookie scoped to the
/// endpoint host (path `/`) pins this request to the same backend node.
pub(crate) fn session_jar(redirect_cookie: Option<&Secret<String>>, endpoint: &Url) -> Arc<Jar> {
    let jar = Jar::default();
    if let Some(token) = redirect_cookie {
        let cookie = format!("{}={}; Path=/", consts::MACHINE_COOKIE, token.peek());
        jar.add_cookie_str(&cookie, endpoint);
    }
    Arc::new(jar)
}

#[cfg(test)]
mod tests {
    use reqwest::cookie::CookieStore;

    use super::*;

    #[test]
    fn carries_machine_cookie_for_the_endpoint_host() {
        let endpoint: Url = "https://secure-test.worldpay.com/jsp/merchant/xml/paymentService.jsp"
            .parse()
            .expect("endpoint parses");
        let token = Secret::new("node-7".to_string());

        let jar = session_jar(Some(&token), &endpoint);
        let header = jar.cookies(&endpoint).expect("cookie present");
        assert_eq!(header.to_str().expect("ascii header"), "machine=node-7");
    }

    #[test]
    fn empty_without_session_token() {
        let endpoint: Url = "https://secure.worldpay.com/jsp/merchant/xml/paymentService.jsp"
            .parse()
            .expect("endpoint parses");
        assert!(session_jar(None, &endpoint).cookies(&endpoint).is_none());
    }
}
