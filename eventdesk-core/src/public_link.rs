//! Shareable links for public self-registration.

use crate::event::Event;

/// Fragment route under which the public registration page lives.
pub const PUBLIC_ROUTE: &str = "#/event/public/";

/// Full shareable URL for an event, e.g.
/// `https://host/app/#/event/public/<token>`.
pub fn public_url(base_url: &str, event: &Event) -> String {
    let base = base_url.split('#').next().unwrap_or_default();
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    format!("{}{}{}", base, PUBLIC_ROUTE, event.public_token)
}

/// Extract the token from a shared link, or return the input when it is
/// already a bare token. Returns `None` for blank input.
pub fn parse_public_token(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let token = match link.find(PUBLIC_ROUTE) {
        Some(pos) => &link[pos + PUBLIC_ROUTE.len()..],
        None => link,
    };
    let token = token.trim_end_matches('/');

    if token.is_empty() || token.contains('/') {
        return None;
    }
    Some(token.to_string())
}
