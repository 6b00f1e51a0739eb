use std::fmt;

/// Resource collections exposed by the catalog service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Clusters,
    Commands,
    Applications,
    Jobs,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Clusters,
        ResourceKind::Commands,
        ResourceKind::Applications,
        ResourceKind::Jobs,
    ];

    /// Path segment used both by the service (`/api/v3/<segment>`) and by in-app routes.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Clusters => "clusters",
            ResourceKind::Commands => "commands",
            ResourceKind::Applications => "applications",
            ResourceKind::Jobs => "jobs",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        let segment = segment.trim_matches('/');
        Self::ALL.into_iter().find(|k| k.path() == segment)
    }

    /// Key of the resource array inside a collection response's `_embedded` section.
    pub fn embedded_key(self) -> &'static str {
        match self {
            ResourceKind::Clusters => "clusterList",
            ResourceKind::Commands => "commandList",
            ResourceKind::Applications => "applicationList",
            ResourceKind::Jobs => "jobSearchResultList",
        }
    }

    /// Text inputs offered by the search form, in display order.
    pub fn filter_fields(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Clusters => &["name", "status", "tag"],
            ResourceKind::Commands => &["name", "user", "status", "tag"],
            ResourceKind::Applications => &["name", "user", "status", "tag", "type"],
            ResourceKind::Jobs => &["id", "name", "user", "status", "tag", "clusterName", "commandName"],
        }
    }

    pub fn sort_fields(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Clusters => &["name", "status", "tag"],
            ResourceKind::Commands | ResourceKind::Applications => &["name", "user", "status", "tag"],
            ResourceKind::Jobs => &["name", "user", "status", "started"],
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Clusters | ResourceKind::Commands => {
                &["Id", "Name", "User", "Status", "Version", "Tags", "Created", "Updated"]
            }
            ResourceKind::Applications => {
                &["Id", "Name", "User", "Status", "Version", "Type", "Created", "Updated"]
            }
            ResourceKind::Jobs => {
                &["Id", "Name", "User", "Status", "Cluster", "Command", "Started", "Finished"]
            }
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Clusters => write!(f, "Clusters"),
            ResourceKind::Commands => write!(f, "Commands"),
            ResourceKind::Applications => write!(f, "Applications"),
            ResourceKind::Jobs => write!(f, "Jobs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_accepts_leading_slash() {
        assert_eq!(ResourceKind::from_path("/commands"), Some(ResourceKind::Commands));
        assert_eq!(ResourceKind::from_path("jobs"), Some(ResourceKind::Jobs));
        assert_eq!(ResourceKind::from_path("hosts"), None);
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(ResourceKind::Jobs.next(), ResourceKind::Clusters);
        assert_eq!(ResourceKind::Clusters.prev(), ResourceKind::Jobs);
    }
}
