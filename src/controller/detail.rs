//! Detail panel shown under an expanded row.
//!
//! Each resource kind declares which fields it shows and which hyperlinks it
//! follows; the panel fans those fetches out and folds their completions in
//! one slot at a time.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{Resource, ResourceKind, REL_SELF};

use super::fetch_group::{FetchGroup, SlotState};

/// How a field of the resource itself is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldShape {
    Text,
    /// One bullet per array element.
    List,
}

#[derive(Clone, Copy, Debug)]
pub struct DetailField {
    pub label: &'static str,
    pub key: &'static str,
    pub shape: FieldShape,
}

/// How a related hyperlink's payload is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelatedDisplay {
    /// Nested table of resources of the given kind.
    Table(ResourceKind),
    /// A single field read from the first related resource, printed right
    /// after the panel field named by `after`.
    Field { key: &'static str, after: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct RelatedSpec {
    pub rel: &'static str,
    pub label: &'static str,
    pub display: RelatedDisplay,
}

/// Layout and fetch plan of one kind's detail panel.
#[derive(Debug)]
pub struct DetailSpec {
    pub fields: &'static [DetailField],
    pub related: &'static [RelatedSpec],
}

const fn text(label: &'static str, key: &'static str) -> DetailField {
    DetailField { label, key, shape: FieldShape::Text }
}

const fn list(label: &'static str, key: &'static str) -> DetailField {
    DetailField { label, key, shape: FieldShape::List }
}

static CLUSTER_DETAIL: DetailSpec = DetailSpec {
    fields: &[
        text("Description", "description"),
        text("Setup File", "setupFile"),
        list("Config", "configs"),
    ],
    related: &[RelatedSpec {
        rel: "commands",
        label: "Commands",
        display: RelatedDisplay::Table(ResourceKind::Commands),
    }],
};

static COMMAND_DETAIL: DetailSpec = DetailSpec {
    fields: &[
        text("Description", "description"),
        text("Check Delay", "checkDelay"),
        text("Setup File", "setupFile"),
        text("Executable", "executable"),
        list("Config", "configs"),
    ],
    related: &[
        RelatedSpec {
            rel: "clusters",
            label: "Clusters",
            display: RelatedDisplay::Table(ResourceKind::Clusters),
        },
        RelatedSpec {
            rel: "applications",
            label: "Applications",
            display: RelatedDisplay::Table(ResourceKind::Applications),
        },
    ],
};

static APPLICATION_DETAIL: DetailSpec = DetailSpec {
    fields: &[
        text("Description", "description"),
        text("Setup File", "setupFile"),
        list("Config", "configs"),
        list("Dependencies", "dependencies"),
    ],
    related: &[RelatedSpec {
        rel: "commands",
        label: "Commands",
        display: RelatedDisplay::Table(ResourceKind::Commands),
    }],
};

static JOB_DETAIL: DetailSpec = DetailSpec {
    fields: &[
        text("Description", "description"),
        text("Archive Location", "archiveLocation"),
        text("Status Message", "statusMsg"),
    ],
    related: &[RelatedSpec {
        rel: "request",
        label: "Command Args",
        display: RelatedDisplay::Field { key: "commandArgs", after: "description" },
    }],
};

pub fn detail_spec(kind: ResourceKind) -> &'static DetailSpec {
    match kind {
        ResourceKind::Clusters => &CLUSTER_DETAIL,
        ResourceKind::Commands => &COMMAND_DETAIL,
        ResourceKind::Applications => &APPLICATION_DETAIL,
        ResourceKind::Jobs => &JOB_DETAIL,
    }
}

/// One fetch the owner must dispatch on behalf of a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailFetch {
    pub slot: &'static str,
    pub href: String,
}

/// Hyperlinks a panel was mounted with, keyed by slot.
fn inputs(kind: ResourceKind, row: &Resource) -> Vec<DetailFetch> {
    let spec = detail_spec(kind);
    std::iter::once(REL_SELF)
        .chain(spec.related.iter().map(|r| r.rel))
        .filter_map(|slot| {
            row.links.href(slot).map(|href| DetailFetch { slot, href: href.to_string() })
        })
        .collect()
}

/// Lazily loaded detail of one row.
pub struct DetailPanel {
    kind: ResourceKind,
    group: FetchGroup,
    input: Vec<DetailFetch>,
    resource: Option<Resource>,
    related: BTreeMap<&'static str, Vec<Resource>>,
}

impl DetailPanel {
    /// Mounts a panel for `row` and returns the fetches to run in parallel.
    pub fn mount(kind: ResourceKind, row: &Resource) -> (Self, Vec<DetailFetch>) {
        let mut panel = Self {
            kind,
            group: FetchGroup::default(),
            input: Vec::new(),
            resource: None,
            related: BTreeMap::new(),
        };
        let fetches = panel.update(row);
        (panel, fetches)
    }

    /// Re-targets the panel at `row`. Refetches only when its hyperlinks changed.
    pub fn update(&mut self, row: &Resource) -> Vec<DetailFetch> {
        let next = inputs(self.kind, row);
        if next == self.input && !self.input.is_empty() {
            return Vec::new();
        }
        debug!(kind = %self.kind, slots = next.len(), "detail fetch fan-out");
        self.group.start(next.iter().map(|f| (f.slot, f.href.clone())));
        self.input = next.clone();
        self.resource = None;
        self.related.clear();
        next
    }

    /// Folds one completed fetch into the panel.
    ///
    /// Returns `false` and leaves state untouched if the completion is stale.
    pub fn apply(&mut self, slot: &str, href: &str, result: Result<Vec<Resource>, FetchError>) -> bool {
        if !self.group.is_current(slot, href) {
            debug!(slot, href, "dropping stale detail response");
            return false;
        }
        match result {
            Ok(mut resources) => {
                let Some(slot) = self.input.iter().map(|f| f.slot).find(|s| *s == slot) else {
                    return false;
                };
                if slot == REL_SELF {
                    if resources.is_empty() {
                        return self.group.complete(slot, href, Err("empty response".to_string()));
                    }
                    self.resource = Some(resources.swap_remove(0));
                } else {
                    self.related.insert(slot, resources);
                }
                self.group.complete(slot, href, Ok(()))
            }
            Err(e) => {
                warn!(slot, href, error = %e, "detail fetch failed");
                self.group.complete(slot, href, Err(e.to_string()))
            }
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn spec(&self) -> &'static DetailSpec {
        detail_spec(self.kind)
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Resolved items of a related slot; empty while pending or after failure.
    pub fn related(&self, rel: &str) -> &[Resource] {
        self.related.get(rel).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn slot_state(&self, slot: &str) -> Option<&SlotState> {
        self.group.state(slot)
    }

    pub fn is_loading(&self) -> bool {
        !self.group.is_settled()
    }
}
