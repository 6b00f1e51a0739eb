use std::io::{self, Write};

use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use crate::controller::SearchForm;
use crate::model::Query;

use super::shared::{cell, write_bold, write_selectable, writeln};

/// Full search form: one line per field, the focused one highlighted when `active`.
pub fn render_search_form(out: &mut impl Write, form: &SearchForm, active: bool) -> io::Result<()> {
    write_bold(out, "  Search")?;
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = active && idx == form.focused;
        let value = match &field.options {
            Some(_) if field.value.is_empty() => "< any >".to_string(),
            Some(_) => format!("< {} >", field.value),
            None if focused => format!("{}_", field.value),
            None => field.value.clone(),
        };
        let line = format!("    {} {}", cell(&format!("{}:", field.label), 14), value);
        write_selectable(out, &line, focused)?;
    }
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    if active {
        writeln(out, "    Enter: Search | Tab/↑/↓: Field | ←/→: Sort | Esc: Hide form")?;
    } else {
        writeln(out, "    /: Edit search")?;
    }
    queue!(out, ResetColor)?;
    Ok(())
}

/// Compact one-line stand-in for the form.
pub fn render_search_bar(out: &mut impl Write, query: Option<&Query>) -> io::Result<()> {
    let current = query.map(|q| q.to_query_string()).unwrap_or_default();
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    let text = if current.is_empty() {
        "  Search: (all) | /: Show search form".to_string()
    } else {
        format!("  Search: {} | /: Show search form", current.replace('&', "  "))
    };
    writeln(out, &text)?;
    queue!(out, ResetColor)?;
    Ok(())
}
