use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ResourceKind;

pub const SIZE_PARAM: &str = "size";
pub const SORT_PARAM: &str = "sort";

/// Search parameters for one collection request.
///
/// Holds filter fields, `size`, `sort` and whatever else a server navigation
/// link carried (typically `page`). Empty values are kept so a search form
/// can round-trip them, but never reach the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: u32) -> Self {
        let mut q = Self::new();
        q.set(SIZE_PARAM, size.to_string());
        q
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Value for `key`, treating an empty string as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn size(&self) -> Option<u32> {
        self.get(SIZE_PARAM).and_then(|s| s.trim().parse().ok())
    }

    pub fn sort(&self) -> Option<&str> {
        self.get(SORT_PARAM)
    }

    /// Fills in `size` when the query does not carry a usable one.
    pub fn with_default_size(mut self, size: u32) -> Self {
        if self.size().is_none() {
            self.set(SIZE_PARAM, size.to_string());
        }
        self
    }

    /// Parameters as they go out on the wire: empty values dropped, keys sorted.
    pub fn request_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.request_params().is_empty()
    }

    /// Parses `a=1&b=two`, with or without a leading `?`. Malformed pairs are skipped.
    pub fn from_query_string(qs: &str) -> Self {
        let mut q = Self::new();
        for pair in qs.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let k = decode(k);
            if k.is_empty() {
                continue;
            }
            q.set(k, decode(v));
        }
        q
    }

    pub fn to_query_string(&self) -> String {
        self.request_params()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|c| c.into_owned())
        .unwrap_or(s)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown resource type '{0}' (expected clusters, commands, applications or jobs)")]
pub struct ParseRouteError(pub String);

/// In-app location: which collection is shown and with which query.
///
/// This is the only input a list page reads to decide what to fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub kind: ResourceKind,
    pub query: Query,
}

impl Route {
    pub fn new(kind: ResourceKind, query: Query) -> Self {
        Self { kind, query }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qs = self.query.to_query_string();
        if qs.is_empty() {
            write!(f, "{}", self.kind.path())
        } else {
            write!(f, "{}?{}", self.kind.path(), qs)
        }
    }
}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, qs) = s.trim().split_once('?').unwrap_or((s.trim(), ""));
        let kind = ResourceKind::from_path(path).ok_or_else(|| ParseRouteError(path.to_string()))?;
        Ok(Route::new(kind, Query::from_query_string(qs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_empty_fields_send_only_size() {
        let mut q = Query::with_size(25);
        for field in ["name", "user", "status", "tag", "sort"] {
            q.set(field, "");
        }
        assert_eq!(q.request_params(), vec![("size".to_string(), "25".to_string())]);
    }

    #[test]
    fn default_size_only_fills_missing() {
        let q = Query::from_query_string("name=spark").with_default_size(25);
        assert_eq!(q.size(), Some(25));

        let q = Query::from_query_string("size=10").with_default_size(25);
        assert_eq!(q.size(), Some(10));

        let q = Query::from_query_string("size=").with_default_size(25);
        assert_eq!(q.size(), Some(25));
    }

    #[test]
    fn query_string_decodes_and_encodes() {
        let q = Query::from_query_string("?name=spark%20sql&tag=type:yarn&user=a+b");
        assert_eq!(q.get("name"), Some("spark sql"));
        assert_eq!(q.get("tag"), Some("type:yarn"));
        assert_eq!(q.get("user"), Some("a b"));
        assert_eq!(q.to_query_string(), "name=spark%20sql&tag=type%3Ayarn&user=a%20b");
    }

    #[test]
    fn route_parses_and_prints() {
        let route: Route = "commands?name=spark&size=25".parse().unwrap();
        assert_eq!(route.kind, ResourceKind::Commands);
        assert_eq!(route.query.get("name"), Some("spark"));
        assert_eq!(route.to_string(), "commands?name=spark&size=25");

        let bare: Route = "/jobs".parse().unwrap();
        assert!(bare.query.is_empty());
        assert_eq!(bare.to_string(), "jobs");
    }

    #[test]
    fn route_rejects_unknown_kind() {
        assert_eq!(
            "hosts?x=1".parse::<Route>(),
            Err(ParseRouteError("hosts".to_string()))
        );
    }
}
