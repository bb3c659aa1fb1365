//! "Sign in with LinkedIn": builds the OAuth authorization URL and nothing
//! more. No token exchange happens; the redirect back lands on the home page.

pub mod handlers;

use uuid::Uuid;

pub const AUTHORIZATION_ENDPOINT: &str = "https://www.linkedin.com/oauth/v2/authorization";
/// Already encoded, space as `%20`.
const SCOPE: &str = "r_liteprofile%20r_emailaddress";

/// A fresh `state` nonce for one authorization attempt.
pub fn new_state() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn authorization_url(client_id: &str, base_url: &str, state: &str) -> String {
    let redirect_uri = format!("{}/", base_url.trim_end_matches('/'));
    format!(
        "{AUTHORIZATION_ENDPOINT}?response_type=code&client_id={}&redirect_uri={}&state={}&scope={SCOPE}",
        encode_uri_component(client_id),
        encode_uri_component(&redirect_uri),
        encode_uri_component(state),
    )
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_uri_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
