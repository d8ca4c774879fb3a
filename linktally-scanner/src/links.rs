// Same-domain link counting over raw HTML

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Absolute http(s) links inside a double-quoted `href` attribute.
///
/// The attribute name and the scheme match case-insensitively, the rest of
/// the captured URL is taken as written.
static HREF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i:href)\s*=\s*"((?i:https?)://[^"]+)""#).unwrap()
});

/// Count the links in `html` whose host ends with `base_domain`.
///
/// Links that fail to parse are skipped, as are links without a host.
pub fn count_internal_links(html: &str, base_domain: &str) -> usize {
    let mut count = 0;

    for captures in HREF_PATTERN.captures_iter(html) {
        let link = &captures[1];
        match written_host(link) {
            Some(host) if is_internal(host, base_domain) => count += 1,
            Some(_) => {}
            None => debug!("Skipping link without a usable host: {}", link),
        }
    }

    count
}

/// Host of `url` exactly as written, without userinfo or port.
///
/// `url` must still parse with [`Url::parse`], but the comparison uses the
/// original text, so case is preserved. Anything containing whitespace is
/// rejected outright.
pub fn written_host(url: &str) -> Option<&str> {
    if url.chars().any(char::is_whitespace) {
        return None;
    }
    Url::parse(url).ok()?.host_str()?;

    let rest = &url[url.find("://")? + 3..];
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    let host = if host_port.starts_with('[') {
        &host_port[..=host_port.find(']')?]
    } else {
        host_port
            .rsplit_once(':')
            .map_or(host_port, |(host, _)| host)
    };

    (!host.is_empty()).then_some(host)
}

/// Suffix match on the host, not equality: `sub.example.com` and
/// `badexample.com` both count as internal to `example.com`.
pub fn is_internal(host: &str, base_domain: &str) -> bool {
    !host.is_empty() && host.ends_with(base_domain)
}
