use tracing::debug;

use super::App;

impl App {
    /// Folds every completed fetch into the browser. Returns true if anything changed.
    pub fn poll_fetches(&mut self) -> bool {
        let mut needs_render = false;
        for outcome in self.dispatcher.poll() {
            if self.browser.apply(outcome) {
                needs_render = true;
            } else {
                debug!("discarded stale fetch outcome");
            }
        }
        needs_render
    }

    /// True while any dispatched fetch has not reported back.
    pub fn is_busy(&self) -> bool {
        self.dispatcher.in_flight() > 0
    }
}
