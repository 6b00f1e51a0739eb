// Re-export all model types from submodules.

pub use app::Focus;
pub use kind::ResourceKind;
pub use page::{
    parse_resources, Link, NavLinks, PageEnvelope, PageMeta, Resource, REL_FIRST, REL_LAST,
    REL_NEXT, REL_PREV, REL_SELF,
};
pub use query::{ParseRouteError, Query, Route, SIZE_PARAM, SORT_PARAM};

mod app;
mod kind;
mod page;
mod query;
