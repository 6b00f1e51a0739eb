use std::io::{self, Write};
use crossterm::{
    cursor, queue,
    style::{Color, SetForegroundColor, SetBackgroundColor, ResetColor},
};

use crate::controller::{Browser, ListPhase};
use crate::model::ResourceKind;

fn tab_label(browser: &Browser, kind: ResourceKind) -> String {
    let page = browser.page(kind);
    match (page.phase(), page.page()) {
        (ListPhase::Empty, _) => format!(" {} (0) ", kind),
        (ListPhase::Loaded, Some(meta)) => format!(" {} ({}) ", kind, meta.total_elements),
        _ => format!(" {} ", kind),
    }
}

pub fn render_tab_bar(out: &mut impl Write, browser: &Browser, service: &str, width: u16) -> io::Result<()> {
    write!(out, "  ")?;

    for kind in ResourceKind::ALL {
        if kind == browser.route().kind {
            queue!(out, SetBackgroundColor(Color::DarkBlue), SetForegroundColor(Color::White))?;
        } else {
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
        }
        write!(out, "{}", tab_label(browser, kind))?;
        queue!(out, ResetColor)?;
        write!(out, "  ")?;
    }

    // Right-align the service address
    let right = format!("genie - {} ", service);
    let col = (width as usize).saturating_sub(right.chars().count());
    queue!(out, cursor::MoveTo(col as u16, 0))?;
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}", right)?;
    queue!(out, ResetColor)?;

    write!(out, "\r\n")?;
    let sep: String = "─".repeat(width as usize);
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}\r\n", sep)?;
    queue!(out, ResetColor)?;

    Ok(())
}
