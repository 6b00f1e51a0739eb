use crate::model::{Query, ResourceKind, Route};

/// Turns a server hyperlink into an in-app route for `kind`.
///
/// Only the link's query string survives; its scheme, host and path are
/// dropped so navigation stays inside the console instead of following the
/// service URL.
pub fn resolve_link(href: &str, kind: ResourceKind) -> Route {
    let query = match href.split_once('?') {
        Some((_, qs)) => Query::from_query_string(strip_fragment(qs)),
        None => Query::new(),
    };
    Route::new(kind, query)
}

/// Joins a possibly relative `href` onto the service base URL.
pub fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}

fn strip_fragment(qs: &str) -> &str {
    qs.split_once('#').map(|(q, _)| q).unwrap_or(qs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_query_and_drops_host_and_path() {
        let route = resolve_link(
            "https://genie.example.com:8443/api/v3/commands?name=spark&page=1&size=25",
            ResourceKind::Commands,
        );
        assert_eq!(route.to_string(), "commands?name=spark&page=1&size=25");
    }

    #[test]
    fn relative_link_resolves_the_same() {
        let route = resolve_link("/api/v3/jobs?page=3&size=10#top", ResourceKind::Jobs);
        assert_eq!(route.query.get("page"), Some("3"));
        assert_eq!(route.to_string(), "jobs?page=3&size=10");
    }

    #[test]
    fn link_without_query_is_bare_path() {
        let route = resolve_link("http://genie/api/v3/clusters", ResourceKind::Clusters);
        assert!(route.query.is_empty());
        assert_eq!(route.to_string(), "clusters");
    }

    #[test]
    fn absolute_url_joins_relative_hrefs() {
        assert_eq!(absolute_url("http://genie:8080/", "/api/v3/commands/1"), "http://genie:8080/api/v3/commands/1");
        assert_eq!(absolute_url("http://genie:8080", "api/v3/x"), "http://genie:8080/api/v3/x");
        assert_eq!(absolute_url("http://genie:8080", "https://other/x"), "https://other/x");
    }
}
