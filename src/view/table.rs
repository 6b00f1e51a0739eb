use crate::controller::{DetailPanel, TableRow};
use crate::model::{Resource, ResourceKind};

use super::detail::detail_lines;
use super::shared::{cell, format_timestamp};

/// Renders one resource as table cells, in header order.
pub trait RowRenderer: Sync {
    fn widths(&self) -> &'static [usize];
    fn cells(&self, resource: &Resource) -> Vec<String>;
}

/// Clusters and commands share a column layout.
pub struct EntityRow;

impl RowRenderer for EntityRow {
    fn widths(&self) -> &'static [usize] {
        &[14, 22, 12, 10, 10, 24, 19, 19]
    }

    fn cells(&self, r: &Resource) -> Vec<String> {
        vec![
            r.text("id"),
            r.text("name"),
            r.text("user"),
            r.text("status"),
            r.text("version"),
            r.text("tags"),
            format_timestamp(&r.text("created")),
            format_timestamp(&r.text("updated")),
        ]
    }
}

pub struct ApplicationRow;

impl RowRenderer for ApplicationRow {
    fn widths(&self) -> &'static [usize] {
        &[14, 22, 12, 10, 10, 12, 19, 19]
    }

    fn cells(&self, r: &Resource) -> Vec<String> {
        vec![
            r.text("id"),
            r.text("name"),
            r.text("user"),
            r.text("status"),
            r.text("version"),
            r.text("type"),
            format_timestamp(&r.text("created")),
            format_timestamp(&r.text("updated")),
        ]
    }
}

pub struct JobRow;

impl RowRenderer for JobRow {
    fn widths(&self) -> &'static [usize] {
        &[14, 22, 12, 10, 16, 16, 19, 19]
    }

    fn cells(&self, r: &Resource) -> Vec<String> {
        vec![
            r.text("id"),
            r.text("name"),
            r.text("user"),
            r.text("status"),
            r.text("clusterName"),
            r.text("commandName"),
            format_timestamp(&r.text("started")),
            format_timestamp(&r.text("finished")),
        ]
    }
}

pub fn row_renderer(kind: ResourceKind) -> &'static dyn RowRenderer {
    match kind {
        ResourceKind::Clusters | ResourceKind::Commands => &EntityRow,
        ResourceKind::Applications => &ApplicationRow,
        ResourceKind::Jobs => &JobRow,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Header,
    Row,
    Selected,
    Detail,
}

/// One terminal line of the rendered table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableLine {
    pub text: String,
    pub style: LineStyle,
}

fn join_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| cell(c, *w))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Header plus body lines; the detail panel's lines follow the expanded row.
pub fn table_lines(kind: ResourceKind, rows: &[TableRow<'_>], renderer: &dyn RowRenderer) -> Vec<TableLine> {
    let widths = renderer.widths();
    let headers: Vec<String> = kind.headers().iter().map(|h| h.to_uppercase()).collect();
    let mut lines = vec![TableLine {
        text: format!("    {}", join_cells(&headers, widths)),
        style: LineStyle::Header,
    }];

    for row in rows {
        match row {
            TableRow::Item { resource, expanded, selected, .. } => {
                let indicator = if *expanded { "▼" } else { "▶" };
                lines.push(TableLine {
                    text: format!("  {} {}", indicator, join_cells(&renderer.cells(resource), widths)),
                    style: if *selected { LineStyle::Selected } else { LineStyle::Row },
                });
            }
            TableRow::Detail(panel) => lines.extend(detail_table_lines(panel)),
        }
    }
    lines
}

fn detail_table_lines(panel: &DetailPanel) -> Vec<TableLine> {
    detail_lines(panel)
        .into_iter()
        .map(|text| TableLine { text: format!("      {}", text), style: LineStyle::Detail })
        .collect()
}

/// First line to show so that line `focus` stays inside `height` lines.
pub fn scroll_offset(total: usize, focus: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    let max = total - height;
    focus.saturating_sub(height / 2).min(max)
}
