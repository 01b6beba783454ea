use url::Url;

use crate::form::form_model::FormOrigin;

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Decide the match key for a request.
///
/// Native apps are keyed by package. Browsers are keyed by the web page
/// when the tree reports web domains: a single origin on the page is
/// trusted for every field, several origins are only trusted when all
/// fields to fill agree on one.
pub fn resolve_origin(
    package: &str,
    is_browser: bool,
    page_origins: &[String],
    field_origins: &[Option<&str>],
) -> Option<FormOrigin> {
    if !is_browser || page_origins.is_empty() {
        return Some(FormOrigin::App(package.to_string()));
    }

    if let [single] = page_origins {
        return web_origin_to_form_origin(single);
    }

    let first = field_origins.first().copied().flatten()?;
    if field_origins.iter().any(|o| *o != Some(first)) {
        tracing::debug!(package, "fields span several web origins");
        return None;
    }
    web_origin_to_form_origin(first)
}

pub fn web_origin_to_form_origin(origin: &str) -> Option<FormOrigin> {
    let url = Url::parse(origin).ok()?;
    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        tracing::debug!(origin, "unsupported web origin scheme");
        return None;
    }
    let host = url.host_str()?;
    Some(FormOrigin::Web(canonical_domain(host)))
}

/// Lowercased host without a leading `www.`.
pub fn canonical_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => host,
    }
}
