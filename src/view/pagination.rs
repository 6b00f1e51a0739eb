use std::io::{self, Write};

use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use crate::api::resolve_link;
use crate::model::{NavLinks, PageMeta, ResourceKind, Route, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};

use super::shared::writeln;

/// A navigation control and where it leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControl {
    pub rel: &'static str,
    pub label: &'static str,
    pub key: char,
    pub route: Route,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationBar {
    pub start: u64,
    pub end: u64,
    pub total: u64,
    pub controls: Vec<PageControl>,
}

impl PaginationBar {
    pub fn summary(&self) -> String {
        format!("Showing {} to {} of {} entries", self.start, self.end, self.total)
    }
}

const CONTROLS: [(&str, &str, char); 4] = [
    (REL_FIRST, "«", '{'),
    (REL_PREV, "Previous", '['),
    (REL_NEXT, "Next", ']'),
    (REL_LAST, "»", '}'),
];

/// Range summary and controls for one page of `kind`.
///
/// Without a `next` link this is the last page, which may be short, so the
/// range ends at the total instead of a full page.
pub fn pagination_bar(page: &PageMeta, links: &NavLinks, kind: ResourceKind) -> PaginationBar {
    let start = page.number.saturating_mul(page.size).saturating_add(1);
    let end = if links.contains(REL_NEXT) {
        start.saturating_add(page.size).saturating_sub(1)
    } else {
        page.total_elements
    };
    let controls = CONTROLS
        .iter()
        .filter_map(|&(rel, label, key)| {
            links.href(rel).map(|href| PageControl {
                rel,
                label,
                key,
                route: resolve_link(href, kind),
            })
        })
        .collect();
    PaginationBar { start, end, total: page.total_elements, controls }
}

pub fn render_pagination(out: &mut impl Write, bar: &PaginationBar) -> io::Result<()> {
    let controls = bar
        .controls
        .iter()
        .map(|c| format!("{} [{}]", c.label, c.key))
        .collect::<Vec<_>>()
        .join("   ");
    writeln(out, &format!("  {}", bar.summary()))?;
    if !controls.is_empty() {
        queue!(out, SetForegroundColor(Color::Cyan))?;
        writeln(out, &format!("  {}", controls))?;
        queue!(out, ResetColor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(rels: &[&str]) -> NavLinks {
        let mut links = NavLinks::default();
        for rel in rels {
            links.insert(*rel, format!("http://genie:8080/api/v3/commands?name=spark&page=9&size=25&rel={}", rel));
        }
        links
    }

    #[test]
    fn first_page_of_sixty() {
        let page = PageMeta { number: 0, size: 25, total_elements: 60 };
        let bar = pagination_bar(&page, &links(&["self", "next", "last"]), ResourceKind::Commands);
        assert_eq!(bar.summary(), "Showing 1 to 25 of 60 entries");
        let labels: Vec<_> = bar.controls.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Next", "»"]);
        assert_eq!(
            bar.controls[0].route.to_string(),
            "commands?name=spark&page=9&rel=next&size=25"
        );
    }

    #[test]
    fn short_last_page_ends_at_total() {
        let page = PageMeta { number: 2, size: 25, total_elements: 60 };
        let bar = pagination_bar(&page, &links(&["first", "prev"]), ResourceKind::Commands);
        assert_eq!((bar.start, bar.end), (51, 60));
        let rels: Vec<_> = bar.controls.iter().map(|c| c.rel).collect();
        assert_eq!(rels, vec!["first", "prev"]);
    }

    #[test]
    fn huge_page_number_saturates() {
        let page = PageMeta { number: u64::MAX / 2, size: 25, total_elements: 60 };
        let bar = pagination_bar(&page, &links(&["next"]), ResourceKind::Commands);
        assert_eq!(bar.start, u64::MAX);
        assert_eq!(bar.end, u64::MAX - 1);
    }

    #[test]
    fn controls_keep_fixed_order() {
        let page = PageMeta { number: 1, size: 25, total_elements: 100 };
        let bar = pagination_bar(&page, &links(&["last", "next", "prev", "first"]), ResourceKind::Jobs);
        let rels: Vec<_> = bar.controls.iter().map(|c| c.rel).collect();
        assert_eq!(rels, vec!["first", "prev", "next", "last"]);
        assert_eq!(bar.end, 50);
        assert!(bar.controls.iter().all(|c| c.route.kind == ResourceKind::Jobs));
    }
}
