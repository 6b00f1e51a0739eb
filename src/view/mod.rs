mod detail;
mod pagination;
mod search;
mod shared;
mod tab_bar;
mod table;

use std::io::{self, Write};
use crossterm::{cursor, execute, queue, style::{Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor}, terminal};

use crate::controller::{Browser, ListPage, ListPhase};
use crate::model::Focus;

pub use detail::detail_lines;
pub use pagination::{pagination_bar, PageControl, PaginationBar};
pub use shared::{cell, format_timestamp, truncate_str};
pub use table::{row_renderer, scroll_offset, table_lines, LineStyle, RowRenderer, TableLine};

use shared::{write_colored, writeln};

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 16;

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard() -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let mut out = std::io::stdout();
            execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            out.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn render_tab_bar(out: &mut impl Write, browser: &Browser, service: &str, width: u16) -> io::Result<()> {
        tab_bar::render_tab_bar(out, browser, service, width)
    }

    /// Renders the current list page below the tab bar.
    pub fn render_list_page(
        out: &mut impl Write,
        page: &ListPage,
        focus: Focus,
        size: (u16, u16),
    ) -> io::Result<()> {
        let (width, height) = (size.0 as usize, size.1 as usize);
        queue!(out, cursor::MoveTo(0, 2))?;

        let mut used = 2;
        if page.show_search_form() {
            search::render_search_form(out, &page.search, focus == Focus::SearchForm)?;
            used += page.search.fields.len() + 2;
        } else {
            search::render_search_bar(out, page.query())?;
            used += 1;
        }
        writeln(out, "")?;
        used += 1;

        let has_rows = !page.items().is_empty();
        match page.phase() {
            ListPhase::Empty => {
                writeln(out, "  No results found.")?;
                writeln(out, "")?;
                writeln(out, "  Try widening the search: fewer filters or a different tag.")?;
            }
            ListPhase::Idle => writeln(out, "  Loading...")?,
            ListPhase::Loading | ListPhase::Failed(_) if !has_rows => {
                if let ListPhase::Failed(e) = page.phase() {
                    write_colored(out, &format!("  Could not load {}: {}", page.kind(), e), Color::Yellow)?;
                    writeln(out, "  r: Retry")?;
                } else {
                    writeln(out, "  Loading...")?;
                }
            }
            _ => {
                // Footer, status and pagination lines.
                let reserved = used + 5;
                let body_height = height.saturating_sub(reserved).max(3);
                render_table(out, page, body_height, width)?;

                if let Some(meta) = page.page() {
                    writeln(out, "")?;
                    let bar = pagination_bar(meta, page.links(), page.kind());
                    pagination::render_pagination(out, &bar)?;
                }
                match page.phase() {
                    ListPhase::Loading => write_colored(out, "  Loading...", Color::DarkGrey)?,
                    ListPhase::Failed(e) => write_colored(out, &format!("  {} (r: retry)", e), Color::Yellow)?,
                    _ => {}
                }
            }
        }

        let help = match focus {
            Focus::SearchForm => "Enter: Search | Esc: Back to table | Ctrl-C: Quit",
            Focus::Table => "q: Quit | Tab: Switch | ↑/↓: Navigate | Enter/→: Expand | ←/Esc: Close | /: Search | [ ]: Prev/Next | { }: First/Last | r: Refresh",
        };
        let help_y = size.1.saturating_sub(1);
        queue!(
            out,
            cursor::MoveTo(1, help_y),
            SetForegroundColor(Color::DarkGrey),
            crossterm::style::Print(truncate_str(help, width.saturating_sub(2))),
            ResetColor
        )?;

        out.flush()?;
        Ok(())
    }
}

fn render_table(out: &mut impl Write, page: &ListPage, height: usize, width: usize) -> io::Result<()> {
    let rows = page.table.rows(page.items());
    let lines = table_lines(page.kind(), &rows, row_renderer(page.kind()));
    let Some((header, body)) = lines.split_first() else {
        return Ok(());
    };

    queue!(out, SetAttribute(Attribute::Bold))?;
    writeln(out, &truncate_str(&header.text, width))?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    let visible = height.saturating_sub(1);
    let focus = body.iter().position(|l| l.style == LineStyle::Selected).unwrap_or(0);
    let start = scroll_offset(body.len(), focus, visible);
    for line in body.iter().skip(start).take(visible) {
        let text = truncate_str(&line.text, width);
        match line.style {
            LineStyle::Selected => {
                queue!(out, SetBackgroundColor(Color::DarkGrey), SetForegroundColor(Color::White))?;
                write!(out, "{:<width$}", text, width = width)?;
                queue!(out, ResetColor)?;
                write!(out, "\r\n")?;
            }
            LineStyle::Detail => write_colored(out, &text, Color::Cyan)?,
            LineStyle::Header | LineStyle::Row => writeln(out, &text)?,
        }
    }
    Ok(())
}
