//! # Browse Controller
//!
//! The I/O shell around `update()`. It owns the `BrowseState`, executes the
//! `Effect`s the reducer asks for, and funnels every background completion
//! back in as an `Action`.
//!
//! ```text
//!  intent ──► dispatch() ──► update() ──► Effect::Load ──► tokio task ──► repository
//!                 ▲                                             │
//!                 └──────── Action::LoadFinished ◄── channel ◄──┘
//! ```
//!
//! Background tasks never touch state. Only the controller's owner applies
//! their results, via `drain()` (UI loop) or `process_next()` / `settle()`
//! (async callers), so all mutation stays on one sequential context.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

use crate::api::ResourceKind;
use crate::core::action::{Action, Effect, LoadRequest, update};
use crate::core::state::BrowseState;
use crate::resource::Repositories;

/// Quiet period after the last keystroke before a search load is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct BrowseController {
    state: BrowseState,
    repositories: Repositories,
    debounce: Duration,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    active_load: Option<AbortHandle>,
    pending_debounce: Option<AbortHandle>,
}

impl BrowseController {
    /// Must be called from within a tokio runtime; loads run on spawned tasks.
    pub fn new(repositories: Repositories, state: BrowseState, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            repositories,
            debounce,
            tx,
            rx,
            active_load: None,
            pending_debounce: None,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn first_load(&mut self) {
        self.dispatch(Action::FirstLoad);
    }

    pub fn select_resource(&mut self, kind: ResourceKind) {
        self.dispatch(Action::SelectResource(kind));
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetSearchText(text.into()));
    }

    pub fn submit_search(&mut self) {
        self.dispatch(Action::SubmitSearch);
    }

    pub fn next_page(&mut self) {
        self.dispatch(Action::NextPage);
    }

    pub fn prev_page(&mut self) {
        self.dispatch(Action::PrevPage);
    }

    pub fn retry(&mut self) {
        self.dispatch(Action::Retry);
    }

    /// Runs one action through the reducer and performs its effect.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatch: {:?}", DebugAction(&action));
        let effect = update(&mut self.state, action);
        match effect {
            Effect::None => {}
            Effect::Load(request) => self.spawn_load(request),
            Effect::ScheduleDebounce { generation } => self.spawn_debounce(generation),
        }
        // A submit (or the timer itself) disarms the debounce
        if !self.state.debounce_pending
            && let Some(handle) = self.pending_debounce.take()
        {
            handle.abort();
        }
    }

    /// Applies every completion that has already arrived without waiting.
    /// Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next background completion and applies it.
    ///
    /// Only call this while `state().is_busy()`; otherwise nothing will arrive.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies completions until no load or debounce timer is outstanding.
    pub async fn settle(&mut self) {
        while self.state.is_busy() {
            if !self.process_next().await {
                break;
            }
        }
    }

    fn spawn_load(&mut self, request: LoadRequest) {
        if let Some(handle) = self.active_load.take() {
            debug!("Aborting superseded load");
            handle.abort();
        }

        info!(
            "Load {}: {} page {} name={:?}",
            request.generation,
            request.kind.label(),
            request.page,
            request.name
        );

        let repository = self.repositories.get(request.kind);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = repository
                .fetch_page(Some(request.page), request.name.as_deref())
                .await;
            if tx
                .send(Action::LoadFinished {
                    generation: request.generation,
                    result,
                })
                .is_err()
            {
                warn!(
                    "Failed to deliver load {}: controller dropped",
                    request.generation
                );
            }
        });
        self.active_load = Some(handle.abort_handle());
    }

    fn spawn_debounce(&mut self, generation: u64) {
        if let Some(handle) = self.pending_debounce.take() {
            handle.abort();
        }

        let tx = self.tx.clone();
        let delay = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing to do
            let _ = tx.send(Action::DebounceElapsed { generation });
        });
        self.pending_debounce = Some(handle.abort_handle());
    }
}

impl Drop for BrowseController {
    fn drop(&mut self) {
        for handle in [self.active_load.take(), self.pending_debounce.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

/// Keeps whole pages out of the debug log.
struct DebugAction<'a>(&'a Action);

impl std::fmt::Debug for DebugAction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::LoadFinished { generation, result } => match result {
                Ok(page) => write!(
                    f,
                    "LoadFinished {{ generation: {}, items: {} }}",
                    generation,
                    page.items.len()
                ),
                Err(e) => write!(f, "LoadFinished {{ generation: {}, error: {} }}", generation, e),
            },
            other => write!(f, "{:?}", other),
        }
    }
}
