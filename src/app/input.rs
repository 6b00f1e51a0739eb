use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{Focus, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};

use super::App;

/// Result of handling a key: Quit the app, or key was consumed (needs render).
/// None means the key was not handled.
pub enum InputResult {
    Quit,
    Consumed,
}

/// Handle a key event. Returns Some(Quit) to exit, Some(Consumed) if key was handled and
/// a render is needed, None if the key was not handled.
pub fn handle_key(app: &mut App, key_event: KeyEvent) -> Option<InputResult> {
    let KeyEvent { code, modifiers, kind, .. } = key_event;

    if kind == KeyEventKind::Release {
        return None;
    }
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputResult::Quit);
    }

    match app.focus {
        Focus::Table => handle_table(app, code),
        Focus::SearchForm => handle_search_form(app, code),
    }
}

fn handle_table(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('q') => return Some(InputResult::Quit),
        KeyCode::Tab => {
            let reqs = app.browser.switch_tab(true);
            app.dispatch(reqs);
        }
        KeyCode::BackTab => {
            let reqs = app.browser.switch_tab(false);
            app.dispatch(reqs);
        }
        KeyCode::Up => {
            if !app.browser.current_mut().table.select_prev() {
                return None;
            }
        }
        KeyCode::Down => {
            let page = app.browser.current_mut();
            let len = page.items().len();
            if !page.table.select_next(len) {
                return None;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let reqs = app.browser.toggle_selected_row();
            app.dispatch(reqs);
        }
        KeyCode::Right => {
            let page = app.browser.current();
            if page.table.expanded() == Some(page.table.selected_index) {
                return None;
            }
            let reqs = app.browser.toggle_selected_row();
            app.dispatch(reqs);
        }
        KeyCode::Left | KeyCode::Esc => {
            if !app.browser.close_detail() {
                return None;
            }
        }
        KeyCode::Char('/') => {
            let page = app.browser.current_mut();
            if !page.show_search_form() {
                page.toggle_search_form();
            }
            app.focus = Focus::SearchForm;
        }
        KeyCode::Char('s') => app.browser.current_mut().toggle_search_form(),
        KeyCode::Char('r') => {
            let reqs = app.browser.refresh();
            app.dispatch(reqs);
        }
        KeyCode::Char(c) => {
            let rel = match c {
                '{' => REL_FIRST,
                '[' => REL_PREV,
                ']' => REL_NEXT,
                '}' => REL_LAST,
                _ => return None,
            };
            let reqs = app.browser.follow(rel);
            if reqs.is_empty() {
                return None;
            }
            app.dispatch(reqs);
        }
        _ => return None,
    }
    Some(InputResult::Consumed)
}

fn handle_search_form(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Enter => {
            let reqs = app.browser.submit_search();
            app.dispatch(reqs);
            app.focus = Focus::Table;
        }
        KeyCode::Esc => {
            app.browser.current_mut().toggle_search_form();
            app.focus = Focus::Table;
        }
        _ => {
            let form = &mut app.browser.current_mut().search;
            match code {
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                KeyCode::Left => form.cycle_option(false),
                KeyCode::Right => form.cycle_option(true),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.input_char(c),
                _ => return None,
            }
        }
    }
    Some(InputResult::Consumed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures_util::future::{self, BoxFuture};
    use serde_json::Value;

    use super::*;
    use crate::api::Fetcher;
    use crate::controller::FetchOutcome;
    use crate::error::FetchError;
    use crate::model::{NavLinks, PageEnvelope, PageMeta, Resource, ResourceKind};

    struct Offline;

    impl Fetcher for Offline {
        fn get(&self, _url: &str, _params: Vec<(String, String)>) -> BoxFuture<'static, Result<Value, FetchError>> {
            Box::pin(future::ready(Err(FetchError::Transport("offline".into()))))
        }
    }

    fn press(app: &mut App, c: char) -> Option<InputResult> {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn loaded_app(rt: &tokio::runtime::Runtime, links: NavLinks) -> App {
        let mut app = App::new(
            Arc::new(Offline),
            rt.handle().clone(),
            "http://genie",
            25,
            "commands".parse().unwrap(),
        );
        let query = app.browser.current().query().cloned().unwrap();
        app.browser.apply(FetchOutcome::Collection {
            kind: ResourceKind::Commands,
            query,
            result: Ok(PageEnvelope {
                page: Some(PageMeta { number: 0, size: 25, total_elements: 30 }),
                links,
                items: vec![Resource::default()],
            }),
        });
        app
    }

    // The runtime is never driven, so dispatched fetches stay in flight.
    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread().build().unwrap()
    }

    #[test]
    fn paging_keys_without_link_do_nothing() {
        let rt = runtime();
        let mut app = loaded_app(&rt, NavLinks::default());
        let before = app.dispatcher.in_flight();
        for key in ['{', '[', ']', '}'] {
            assert!(press(&mut app, key).is_none(), "key {key}");
        }
        assert_eq!(app.dispatcher.in_flight(), before);
        assert_eq!(app.browser.route().to_string(), "commands?size=25");
    }

    #[test]
    fn next_key_follows_next_link() {
        let rt = runtime();
        let mut links = NavLinks::default();
        links.insert("next", "http://genie/api/v3/commands?page=1&size=25");
        let mut app = loaded_app(&rt, links);
        let before = app.dispatcher.in_flight();

        assert!(press(&mut app, '[').is_none());
        assert!(matches!(press(&mut app, ']'), Some(InputResult::Consumed)));
        assert_eq!(app.dispatcher.in_flight(), before + 1);
        assert_eq!(app.browser.route().to_string(), "commands?page=1&size=25");
    }
}
