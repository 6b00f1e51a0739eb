use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;
use super::ResourceKind;

pub const REL_SELF: &str = "self";
pub const REL_FIRST: &str = "first";
pub const REL_PREV: &str = "prev";
pub const REL_NEXT: &str = "next";
pub const REL_LAST: &str = "last";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Relation name -> hyperlink, as found in a `_links` object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavLinks(BTreeMap<String, Link>);

impl NavLinks {
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let Value::Object(map) = value else {
            return Err(FetchError::malformed("_links is not an object"));
        };
        let mut links = BTreeMap::new();
        for (rel, raw) in map {
            // HAL allows an array of links per relation; the first one is the canonical target.
            let raw = match raw {
                Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
                other => other,
            };
            let link: Link = serde_json::from_value(raw)
                .map_err(|e| FetchError::malformed(format!("link '{}': {}", rel, e)))?;
            links.insert(rel, link);
        }
        Ok(Self(links))
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    pub fn href(&self, rel: &str) -> Option<&str> {
        self.get(rel).map(|l| l.href.as_str())
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    pub fn insert(&mut self, rel: impl Into<String>, href: impl Into<String>) {
        self.0.insert(rel.into(), Link { href: href.into() });
    }
}

/// One catalog entity: opaque server fields plus its hyperlinks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    pub fields: Map<String, Value>,
    pub links: NavLinks,
}

impl Resource {
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let Value::Object(mut fields) = value else {
            return Err(FetchError::malformed("resource is not an object"));
        };
        let links = match fields.remove("_links") {
            Some(raw) => NavLinks::from_value(raw)?,
            None => NavLinks::default(),
        };
        Ok(Self { fields, links })
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Field rendered as display text. Arrays are joined with ", ", null and missing are empty.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
            Some(other) => scalar_text(other),
        }
    }

    /// Field as a list of display strings; a scalar becomes a one-element list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
            Some(other) => vec![scalar_text(other)],
        }
    }
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pagination metadata of a collection response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

/// One page of a collection.
///
/// `Default` is the "no results" envelope: no page, no links, no items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageEnvelope {
    pub page: Option<PageMeta>,
    pub links: NavLinks,
    pub items: Vec<Resource>,
}

impl PageEnvelope {
    pub fn has_results(&self) -> bool {
        !self.items.is_empty()
    }

    /// Parses a collection response for `kind`.
    ///
    /// A body without `_embedded` is the service's way of saying "nothing
    /// matched" and yields the default envelope. Anything else that does not
    /// fit the envelope shape is `FetchError::Malformed`.
    pub fn parse(kind: ResourceKind, value: Value) -> Result<Self, FetchError> {
        let Value::Object(mut body) = value else {
            return Err(FetchError::malformed("collection response is not an object"));
        };
        let Some(embedded) = body.remove("_embedded") else {
            return Ok(Self::default());
        };

        let raw_items = embedded_array(embedded, Some(kind.embedded_key()))?;
        let page: PageMeta = match body.remove("page") {
            Some(raw) => serde_json::from_value(raw)
                .map_err(|e| FetchError::malformed(format!("page: {}", e)))?,
            None => return Err(FetchError::malformed("embedded collection without page metadata")),
        };
        if page.size == 0 {
            return Err(FetchError::malformed("page size is zero"));
        }
        if raw_items.len() as u64 > page.size {
            return Err(FetchError::malformed(format!(
                "{} items on a page of size {}",
                raw_items.len(),
                page.size
            )));
        }
        if !raw_items.is_empty() {
            let offset = page
                .number
                .checked_mul(page.size)
                .ok_or_else(|| FetchError::malformed(format!("page {} of size {} overflows", page.number, page.size)))?;
            if offset >= page.total_elements {
                return Err(FetchError::malformed(format!(
                    "page {} of size {} lies past {} total entries",
                    page.number, page.size, page.total_elements
                )));
            }
        }
        let links = match body.remove("_links") {
            Some(raw) => NavLinks::from_value(raw)?,
            None => NavLinks::default(),
        };
        let items = raw_items
            .into_iter()
            .map(Resource::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { page: Some(page), links, items })
    }
}

/// Parses the response of a single-resource or related-collection link.
///
/// Accepts a bare array, an envelope with an embedded collection, or a lone
/// resource object (returned as a one-element list).
pub fn parse_resources(value: Value) -> Result<Vec<Resource>, FetchError> {
    match value {
        Value::Array(items) => items.into_iter().map(Resource::from_value).collect(),
        Value::Object(mut body) => match body.remove("_embedded") {
            Some(embedded) => embedded_array(embedded, None)?
                .into_iter()
                .map(Resource::from_value)
                .collect(),
            None => Ok(vec![Resource::from_value(Value::Object(body))?]),
        },
        _ => Err(FetchError::malformed("expected a resource or a list of resources")),
    }
}

fn embedded_array(embedded: Value, key: Option<&str>) -> Result<Vec<Value>, FetchError> {
    let Value::Object(mut sections) = embedded else {
        return Err(FetchError::malformed("_embedded is not an object"));
    };
    let picked = key.and_then(|k| sections.remove(k));
    let section = match picked {
        Some(v) => v,
        None if sections.is_empty() => return Ok(Vec::new()),
        None if sections.len() == 1 => sections
            .into_iter()
            .next()
            .map(|(_, v)| v)
            .unwrap_or(Value::Null),
        None => {
            return Err(FetchError::malformed(format!(
                "cannot pick the resource list among {} embedded sections",
                sections.len()
            )))
        }
    };
    match section {
        Value::Array(items) => Ok(items),
        _ => Err(FetchError::malformed("embedded section is not an array")),
    }
}
