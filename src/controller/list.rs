//! List page: query state, collection fetches and the table below them.

use tracing::{debug, info, warn};

use crate::api::resolve_link;
use crate::error::FetchError;
use crate::model::{NavLinks, PageEnvelope, PageMeta, Query, Resource, ResourceKind, Route};

use super::detail::DetailFetch;
use super::search::SearchForm;
use super::table::TableBody;

/// Where the page is in its fetch cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListPhase {
    /// Never fetched.
    Idle,
    Loading,
    Loaded,
    /// The service reported no matches.
    Empty,
    /// Last fetch failed; whatever was loaded before is still shown.
    Failed(FetchError),
}

/// A collection fetch the owner must dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionFetch {
    pub kind: ResourceKind,
    pub query: Query,
}

pub struct ListPage {
    kind: ResourceKind,
    default_size: u32,
    query: Option<Query>,
    phase: ListPhase,
    items: Vec<Resource>,
    page: Option<PageMeta>,
    links: NavLinks,
    pub table: TableBody,
    pub search: SearchForm,
    show_search_form: bool,
}

impl ListPage {
    pub fn new(kind: ResourceKind, default_size: u32) -> Self {
        Self {
            kind,
            default_size,
            query: None,
            phase: ListPhase::Idle,
            items: Vec::new(),
            page: None,
            links: NavLinks::default(),
            table: TableBody::new(kind),
            search: SearchForm::new(kind, &Query::new()),
            show_search_form: true,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    pub fn page(&self) -> Option<&PageMeta> {
        self.page.as_ref()
    }

    pub fn links(&self) -> &NavLinks {
        &self.links
    }

    pub fn show_search_form(&self) -> bool {
        self.show_search_form
    }

    /// Route this page currently stands for.
    pub fn route(&self) -> Route {
        let query = self
            .query
            .clone()
            .unwrap_or_else(|| Query::with_size(self.default_size));
        Route::new(self.kind, query)
    }

    /// Adopts the route's query. Returns the fetch to run if the query changed
    /// or nothing was fetched yet.
    pub fn navigate(&mut self, query: Query) -> Option<CollectionFetch> {
        let query = query.with_default_size(self.default_size);
        if self.query.as_ref() == Some(&query) && self.phase != ListPhase::Idle {
            return None;
        }
        if self.search_terms_changed(&query) {
            self.search = SearchForm::new(self.kind, &query);
        }
        Some(self.begin(query))
    }

    /// Do the form's fields read differently in `query` than in the current query?
    /// Paging and size changes leave unsubmitted form edits alone.
    fn search_terms_changed(&self, query: &Query) -> bool {
        let current = self.query.clone().unwrap_or_default();
        self.search
            .fields
            .iter()
            .any(|field| current.get(field.name) != query.get(field.name))
    }

    /// Re-issues the current query.
    pub fn refresh(&mut self) -> CollectionFetch {
        let query = self
            .query
            .clone()
            .unwrap_or_else(|| Query::with_size(self.default_size));
        self.begin(query)
    }

    fn begin(&mut self, query: Query) -> CollectionFetch {
        info!(kind = %self.kind, query = %query.to_query_string(), "loading collection");
        self.table.reset();
        self.query = Some(query.clone());
        self.phase = ListPhase::Loading;
        CollectionFetch { kind: self.kind, query }
    }

    /// Folds a collection response in. Returns `false` for a stale response,
    /// i.e. one issued for a query that is no longer current.
    pub fn apply(&mut self, query: &Query, result: Result<PageEnvelope, FetchError>) -> bool {
        if self.query.as_ref() != Some(query) {
            debug!(kind = %self.kind, query = %query.to_query_string(), "dropping stale collection response");
            return false;
        }
        match result {
            Ok(envelope) if envelope.has_results() => {
                self.items = envelope.items;
                self.page = envelope.page;
                self.links = envelope.links;
                self.phase = ListPhase::Loaded;
                self.table.reset();
            }
            Ok(_) => {
                self.items.clear();
                self.phase = ListPhase::Empty;
                self.table.reset();
            }
            Err(e) => {
                warn!(kind = %self.kind, error = %e, "collection fetch failed");
                self.phase = ListPhase::Failed(e);
            }
        }
        true
    }

    /// Route behind one of the `first`/`prev`/`next`/`last` links, if present.
    pub fn link_route(&self, rel: &str) -> Option<Route> {
        self.links.href(rel).map(|href| resolve_link(href, self.kind))
    }

    pub fn toggle_search_form(&mut self) {
        self.show_search_form = !self.show_search_form;
    }

    /// Route the search form submits to. The caller navigates to it.
    pub fn submit_search(&self) -> Route {
        let size = self.query.as_ref().and_then(Query::size).or(Some(self.default_size));
        Route::new(self.kind, self.search.to_query(size))
    }

    pub fn toggle_row(&mut self, index: usize) -> Vec<DetailFetch> {
        self.table.toggle(index, &self.items)
    }

    pub fn toggle_selected_row(&mut self) -> Vec<DetailFetch> {
        self.table.toggle_selected(&self.items)
    }

    pub fn apply_detail(
        &mut self,
        slot: &str,
        href: &str,
        result: Result<Vec<Resource>, FetchError>,
    ) -> bool {
        match self.table.detail_mut() {
            Some(panel) => panel.apply(slot, href, result),
            None => false,
        }
    }
}
