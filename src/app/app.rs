use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;
use tracing::{debug, info};

use pc_base::PromptClient;
use pc_base::constants::{EVENT_POLL_MS, SPINNER_INTERVAL_MS};

use crate::app::actions::{ActionResult, apply_action, apply_response};
use crate::app::events::handle_event;
use crate::infra::worker::{ApiRequest, ApiResponse, spawn_request};
use crate::state::{State, View};
use crate::ui;

pub struct App {
    pub state: State,
    client: Arc<PromptClient>,
    tx: Sender<ApiResponse>,
    rx: Receiver<ApiResponse>,
    /// Last spinner animation update
    last_spinner: Instant,
}

impl App {
    pub fn new(state: State, client: PromptClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { state, client: Arc::new(client), tx, rx, last_spinner: Instant::now() }
    }

    /// Queue the initial list load, and open `path` in the invoke view if given
    pub fn start(&mut self, path: Option<&str>) {
        let request = self.state.library.begin_refresh();
        self.dispatch(request);
        if let Some(path) = path {
            self.state.view = View::Invoke;
            let request = self.state.invoke.open(path);
            self.dispatch(request);
        }
    }

    fn dispatch(&mut self, request: ApiRequest) {
        debug!(request = request.label(), "dispatching");
        self.state.in_flight += 1;
        self.state.dirty = true;
        spawn_request(Arc::clone(&self.client), request, self.tx.clone());
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        info!(base_url = self.client.base_url(), "console started");
        loop {
            // === INPUT FIRST ===
            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    info!("console closed");
                    break;
                };
                if let ActionResult::Request(request) = apply_action(&mut self.state, action) {
                    self.dispatch(request);
                }
            }

            // === WORKER RESPONSES ===
            while let Ok(response) = self.rx.try_recv() {
                if let ActionResult::Request(request) = apply_response(&mut self.state, response) {
                    self.dispatch(request);
                }
            }

            // === SPINNER ===
            if self.state.in_flight > 0 && self.last_spinner.elapsed() >= Duration::from_millis(SPINNER_INTERVAL_MS) {
                self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                self.last_spinner = Instant::now();
                self.state.dirty = true;
            }

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &self.state))?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }
}
