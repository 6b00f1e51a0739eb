mod event_loop;
mod render;
mod input;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, Clear, ClearType},
};
use tracing::info;

use crate::api::{Fetcher, HttpFetcher};
use crate::config::Config;
use crate::controller::{Browser, Dispatcher, FetchRequest};
use crate::model::{Focus, Route};

pub use input::{handle_key, InputResult};

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Main application state.
pub struct App {
    pub browser: Browser,
    pub dispatcher: Dispatcher,
    pub focus: Focus,
    pub service: String,
}

impl App {
    /// Builds the app and starts loading `initial`.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        handle: tokio::runtime::Handle,
        service: impl Into<String>,
        default_size: u32,
        initial: Route,
    ) -> Self {
        let mut app = Self {
            browser: Browser::new(default_size, initial.kind),
            dispatcher: Dispatcher::new(fetcher, handle),
            focus: Focus::Table,
            service: service.into(),
        };
        app.navigate(initial);
        app
    }

    pub fn navigate(&mut self, route: Route) {
        let requests = self.browser.navigate(route);
        self.dispatch(requests);
    }

    pub fn dispatch(&mut self, requests: Vec<FetchRequest>) {
        self.dispatcher.dispatch(requests);
    }
}

/// Run the application. Sets up terminal, runs the main loop, restores terminal on exit.
pub fn run(config: &Config, should_quit: Arc<AtomicBool>) -> io::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()?;

    let fetcher = HttpFetcher::new(&config.url, config.request_timeout()).map_err(io::Error::other)?;
    let service = fetcher.base_url().to_string();
    info!(%service, route = %config.route, "starting console");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;

    let mut app = App::new(
        Arc::new(fetcher),
        rt.handle().clone(),
        service,
        config.page_size,
        config.route.clone(),
    );
    let result = main_loop(&mut app, &should_quit);

    restore_terminal();
    rt.shutdown_timeout(Duration::from_millis(200));
    result
}

fn main_loop(app: &mut App, should_quit: &AtomicBool) -> io::Result<()> {
    let mut needs_render = true;

    loop {
        if should_quit.load(Ordering::Relaxed) {
            break;
        }

        if app.poll_fetches() {
            needs_render = true;
        }

        if needs_render {
            if crate::view::Presenter::render_size_guard()? {
                needs_render = false;
                if crossterm::event::poll(Duration::from_millis(100))? {
                    if let crossterm::event::Event::Resize(_, _) = crossterm::event::read()? {
                        needs_render = true;
                    }
                }
                continue;
            }
            render::render(app)?;
            needs_render = false;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key_event) => match input::handle_key(app, key_event) {
                    Some(InputResult::Quit) => break,
                    Some(InputResult::Consumed) => needs_render = true,
                    None => {}
                },
                crossterm::event::Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }

    Ok(())
}
