use std::io;

use crossterm::{execute, cursor::MoveTo, terminal::{self, Clear, ClearType}};

use crate::view::Presenter;

use super::App;

pub fn render(app: &mut App) -> io::Result<()> {
    let size = terminal::size()?;
    let mut out = io::stdout();

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Presenter::render_tab_bar(&mut out, &app.browser, &app.service, size.0)?;
    Presenter::render_list_page(&mut out, app.browser.current(), app.focus, size)?;

    Ok(())
}
