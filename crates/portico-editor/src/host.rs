//! Subsite body class
//!
//! Multi-site installs serve subsites from an extra host label
//! (`store.example.com`). The editor body gets a class naming that
//! label so per-subsite styles apply inside the editing frame. Plain
//! two-label hosts and IP addresses produce none.

use url::{Host, Url};

/// Body class for the editing frame, derived from the page host.
/// Ports are ignored; the comparison is on host labels only.
pub fn body_class_for_host(host: &str) -> Option<String> {
    let host = host.trim();
    if host.is_empty() {
        return None;
    }

    // Let the URL parser handle ports, brackets and normalization
    let parsed = Url::parse(&format!("http://{}", host)).ok()?;

    let domain = match parsed.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        // IP hosts have no subsite label
        _ => return None,
    };

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() <= 2 {
        return None;
    }

    let subsite = labels[0];
    if subsite.is_empty() {
        return None;
    }

    Some(format!("subsite-{}", subsite.to_ascii_lowercase()))
}
