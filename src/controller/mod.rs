//! Catalog browsing state: one list page per resource kind and the current route.

pub mod detail;
pub mod dispatch;
pub mod fetch_group;
pub mod list;
pub mod search;
pub mod table;

use tracing::debug;

use crate::model::{Query, ResourceKind, Route};

pub use detail::{detail_spec, DetailFetch, DetailPanel, DetailSpec, FieldShape, RelatedDisplay};
pub use dispatch::{Dispatcher, FetchOutcome, FetchRequest};
pub use fetch_group::{FetchGroup, SlotState};
pub use list::{CollectionFetch, ListPage, ListPhase};
pub use search::{FormField, SearchForm};
pub use table::{Expansion, TableBody, TableRow};

/// Owns every list page and knows which one the route points at.
pub struct Browser {
    pages: Vec<ListPage>,
    route: Route,
}

impl Browser {
    pub fn new(default_size: u32, initial: ResourceKind) -> Self {
        Self {
            pages: ResourceKind::ALL
                .into_iter()
                .map(|kind| ListPage::new(kind, default_size))
                .collect(),
            route: Route::new(initial, Query::new()),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self, kind: ResourceKind) -> &ListPage {
        let idx = ResourceKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
        &self.pages[idx]
    }

    pub fn page_mut(&mut self, kind: ResourceKind) -> &mut ListPage {
        let idx = ResourceKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
        &mut self.pages[idx]
    }

    pub fn current(&self) -> &ListPage {
        self.page(self.route.kind)
    }

    pub fn current_mut(&mut self) -> &mut ListPage {
        self.page_mut(self.route.kind)
    }

    /// Makes `route` current; the target page fetches if its query changed.
    pub fn navigate(&mut self, route: Route) -> Vec<FetchRequest> {
        debug!(%route, "navigate");
        let fetch = self.page_mut(route.kind).navigate(route.query.clone());
        self.route = route;
        // The page may have filled in a default size.
        self.route.query = self.current().route().query;
        fetch.map(FetchRequest::Collection).into_iter().collect()
    }

    /// Switches tab, restoring the target page's last query.
    pub fn switch_tab(&mut self, forward: bool) -> Vec<FetchRequest> {
        let kind = if forward { self.route.kind.next() } else { self.route.kind.prev() };
        let route = self.page(kind).route();
        self.navigate(route)
    }

    /// Follows a pagination relation of the current page, if present.
    pub fn follow(&mut self, rel: &str) -> Vec<FetchRequest> {
        match self.current().link_route(rel) {
            Some(route) => self.navigate(route),
            None => Vec::new(),
        }
    }

    pub fn submit_search(&mut self) -> Vec<FetchRequest> {
        let route = self.current().submit_search();
        self.navigate(route)
    }

    pub fn refresh(&mut self) -> Vec<FetchRequest> {
        vec![FetchRequest::Collection(self.current_mut().refresh())]
    }

    pub fn toggle_selected_row(&mut self) -> Vec<FetchRequest> {
        let page = self.current_mut();
        let kind = page.kind();
        page.toggle_selected_row()
            .into_iter()
            .map(|fetch| FetchRequest::Detail { kind, fetch })
            .collect()
    }

    /// Close control of the current page's detail panel.
    pub fn close_detail(&mut self) -> bool {
        let table = &mut self.current_mut().table;
        if table.expanded().is_some() {
            table.collapse();
            return true;
        }
        false
    }

    /// Routes a finished fetch to its page. Returns `true` if state changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Collection { kind, query, result } => self.page_mut(kind).apply(&query, result),
            FetchOutcome::Detail { kind, slot, href, result } => {
                self.page_mut(kind).apply_detail(slot, &href, result)
            }
        }
    }
}
