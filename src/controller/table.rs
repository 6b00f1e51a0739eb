use crate::model::{Resource, ResourceKind};

use super::detail::{DetailFetch, DetailPanel};

/// Which row, if any, is expanded. At most one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: Option<usize>,
}

impl Expansion {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Same index collapses; any other index becomes the only expanded row.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
        self.expanded
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }
}

/// A rendered line of the table body.
pub enum TableRow<'a> {
    Item {
        index: usize,
        resource: &'a Resource,
        expanded: bool,
        selected: bool,
    },
    /// Spliced in directly below the expanded item.
    Detail(&'a DetailPanel),
}

/// Row cursor, expansion state and the single detail panel of one list.
pub struct TableBody {
    kind: ResourceKind,
    expansion: Expansion,
    detail: Option<DetailPanel>,
    pub selected_index: usize,
}

impl TableBody {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            expansion: Expansion::default(),
            detail: None,
            selected_index: 0,
        }
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expansion.expanded()
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailPanel> {
        self.detail.as_mut()
    }

    /// Expands or collapses row `index` of `items`; returns fetches for a newly mounted panel.
    pub fn toggle(&mut self, index: usize, items: &[Resource]) -> Vec<DetailFetch> {
        let Some(row) = items.get(index) else {
            return Vec::new();
        };
        self.selected_index = index;
        match self.expansion.toggle(index) {
            None => {
                self.detail = None;
                Vec::new()
            }
            Some(_) => match self.detail.as_mut() {
                Some(panel) => panel.update(row),
                None => {
                    let (panel, fetches) = DetailPanel::mount(self.kind, row);
                    self.detail = Some(panel);
                    fetches
                }
            },
        }
    }

    pub fn toggle_selected(&mut self, items: &[Resource]) -> Vec<DetailFetch> {
        self.toggle(self.selected_index, items)
    }

    /// Close control of the detail panel.
    pub fn collapse(&mut self) {
        self.expansion.collapse();
        self.detail = None;
    }

    /// The row list changed; old indices mean nothing anymore.
    pub fn reset(&mut self) {
        self.collapse();
        self.selected_index = 0;
    }

    pub fn select_prev(&mut self) -> bool {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            return true;
        }
        false
    }

    pub fn select_next(&mut self, len: usize) -> bool {
        if self.selected_index + 1 < len {
            self.selected_index += 1;
            return true;
        }
        false
    }

    /// Item rows in order with the detail panel spliced in after the expanded one.
    pub fn rows<'a>(&'a self, items: &'a [Resource]) -> Vec<TableRow<'a>> {
        let mut rows = Vec::with_capacity(items.len() + 1);
        for (index, resource) in items.iter().enumerate() {
            let expanded = self.expansion.expanded() == Some(index);
            rows.push(TableRow::Item {
                index,
                resource,
                expanded,
                selected: index == self.selected_index,
            });
            if expanded {
                if let Some(panel) = &self.detail {
                    rows.push(TableRow::Detail(panel));
                }
            }
        }
        rows
    }
}
