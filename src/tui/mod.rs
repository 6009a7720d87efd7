//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders `BrowseState` and translates keyboard
//! events into `BrowseController` intents.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each tick: draw if something changed, poll the terminal (short timeout
//! while a load or debounce is outstanding so results show up promptly),
//! handle every pending key, then `drain()` the controller so background
//! completions are applied on this thread.

mod detail;
mod event;
mod ui;

use log::{info, warn};
use ratatui::widgets::ListState;

use crate::api::ApiClient;
use crate::core::config::ResolvedConfig;
use crate::core::notes::{JsonNoteStore, MemoryNoteStore, NoteStore};
use crate::core::{BrowseController, BrowseState};
use crate::resource::Repositories;
use crate::tui::detail::{DetailEvent, DetailState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the search text. Down moves into the list.
    Search,
    /// Arrow keys move the highlight. Typing jumps back to Search.
    List,
}

/// TUI-specific presentation state (not part of core browse logic)
pub struct TuiState {
    pub focus: Focus,
    pub list_state: ListState,
    pub detail: Option<DetailState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Search, // User expects to type immediately
            list_state: ListState::default(),
            detail: None,
        }
    }

    /// Keeps the highlight inside the list after the items change.
    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            if self.focus == Focus::List {
                self.focus = Focus::Search;
            }
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0).min(len - 1);
        self.list_state.select(Some(selected));
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens the configured note store, falling back to an in-memory one.
fn open_note_store(config: &ResolvedConfig) -> Box<dyn NoteStore> {
    match &config.notes_path {
        Some(path) => match JsonNoteStore::open(path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(
                    "Could not open notes at {}: {}; notes will not persist",
                    path.display(),
                    e
                );
                Box::new(MemoryNoteStore::default())
            }
        },
        None => Box::new(MemoryNoteStore::default()),
    }
}

/// Routes one key event. Returns true when the user asked to quit.
fn handle_event(
    event: TuiEvent,
    controller: &mut BrowseController,
    tui: &mut TuiState,
    notes: &mut dyn NoteStore,
) -> bool {
    if event == TuiEvent::ForceQuit {
        return true;
    }

    // Detail overlay captures everything while open
    if let Some(detail) = tui.detail.as_mut() {
        match detail.handle_event(&event) {
            Some(DetailEvent::Save) => detail.save(notes),
            Some(DetailEvent::Dismiss) => tui.detail = None,
            None => {}
        }
        return false;
    }

    match event {
        TuiEvent::Escape => return true,
        TuiEvent::NextResource => {
            controller.select_resource(controller.state().selected.next());
            tui.list_state.select(None);
        }
        TuiEvent::PrevResource => {
            controller.select_resource(controller.state().selected.prev());
            tui.list_state.select(None);
        }
        TuiEvent::NextPage => controller.next_page(),
        TuiEvent::PrevPage => controller.prev_page(),
        TuiEvent::Retry => controller.retry(),
        TuiEvent::Save | TuiEvent::Resize | TuiEvent::ForceQuit => {}
        _ => match tui.focus {
            Focus::Search => handle_search_event(event, controller, tui),
            Focus::List => handle_list_event(event, controller, tui, notes),
        },
    }
    false
}

fn handle_search_event(event: TuiEvent, controller: &mut BrowseController, tui: &mut TuiState) {
    match event {
        TuiEvent::InputChar(c) => {
            let mut text = controller.state().search_text.clone();
            text.push(c);
            controller.set_search_text(text);
        }
        TuiEvent::Backspace => {
            let mut text = controller.state().search_text.clone();
            if text.pop().is_some() {
                controller.set_search_text(text);
            }
        }
        TuiEvent::Submit => controller.submit_search(),
        TuiEvent::CursorDown if controller.state().visible_len() > 0 => {
            tui.focus = Focus::List;
            tui.clamp_selection(controller.state().visible_len());
        }
        _ => {}
    }
}

fn handle_list_event(
    event: TuiEvent,
    controller: &mut BrowseController,
    tui: &mut TuiState,
    notes: &dyn NoteStore,
) {
    let len = controller.state().visible_len();
    match event {
        TuiEvent::CursorUp => match tui.list_state.selected() {
            Some(0) | None => tui.focus = Focus::Search,
            Some(i) => tui.list_state.select(Some(i - 1)),
        },
        TuiEvent::CursorDown => {
            let next = tui.list_state.selected().map_or(0, |i| i + 1);
            if next < len {
                tui.list_state.select(Some(next));
            }
        }
        TuiEvent::InputChar(']') => controller.next_page(),
        TuiEvent::InputChar('[') => controller.prev_page(),
        TuiEvent::Submit => {
            if let Some(index) = tui.list_state.selected() {
                tui.detail = DetailState::for_item(controller.state(), index, notes);
            }
        }
        // Typing auto-switches to Search and forwards the event
        TuiEvent::InputChar(_) | TuiEvent::Backspace => {
            tui.focus = Focus::Search;
            handle_search_event(event, controller, tui);
        }
        _ => {}
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = ApiClient::new(config.base_url.clone(), config.request_timeout);
    let repositories = Repositories::http(client);
    let state = BrowseState::new(config.initial_resource, config.initial_search.clone());
    let mut controller = BrowseController::new(repositories, state, config.debounce);
    let mut notes = open_note_store(&config);
    let mut tui = TuiState::new();

    info!(
        "Browsing {} at {}",
        config.initial_resource.label(),
        config.base_url
    );

    let mut terminal = ratatui::init();
    controller.first_load();

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            tui.clamp_selection(controller.state().visible_len());
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, controller.state(), &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Short poll while work is outstanding, long when idle
        let timeout = if controller.state().is_busy() {
            std::time::Duration::from_millis(50)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(event, &mut controller, &mut tui, notes.as_mut()) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break Ok(());
        }

        // Apply background completions (loads, debounce timers)
        if controller.drain() > 0 {
            needs_redraw = true;
        }
    };

    ratatui::restore();
    info!("Session ended");
    result
}
