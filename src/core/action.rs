//! # Actions
//!
//! Everything that can happen while browsing becomes an `Action`.
//! User switches tab? That's `Action::SelectResource(kind)`.
//! A page arrives? That's `Action::LoadFinished { generation, result }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns the `Effect` the shell must perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Loads and debounce timers carry a generation number. `update` only honors
//! the completion whose generation is current, which is what keeps a slow,
//! superseded response from overwriting a newer one.

use log::{debug, warn};

use crate::api::{FetchError, ResourceKind};
use crate::core::state::{BrowseState, LoadPhase};
use crate::resource::ResourcePage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial load on mount. Only acts from `Idle`.
    FirstLoad,
    SelectResource(ResourceKind),
    SetSearchText(String),
    /// Explicit submit: skips the debounce.
    SubmitSearch,
    NextPage,
    PrevPage,
    Retry,
    /// A debounce timer ran out.
    DebounceElapsed { generation: u64 },
    /// A repository call completed.
    LoadFinished {
        generation: u64,
        result: Result<ResourcePage, FetchError>,
    },
}

/// A repository call the shell must start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub kind: ResourceKind,
    pub page: u32,
    pub name: Option<String>,
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Abort any in-flight load and start this one.
    Load(LoadRequest),
    /// Abort any armed debounce timer and arm a new one for `generation`.
    ScheduleDebounce { generation: u64 },
}

pub fn update(state: &mut BrowseState, action: Action) -> Effect {
    match action {
        Action::FirstLoad => {
            if state.load_phase == LoadPhase::Idle {
                begin_load(state, 1)
            } else {
                Effect::None
            }
        }
        Action::SelectResource(kind) => {
            if kind == state.selected {
                return Effect::None;
            }
            state.selected = kind;
            // Invalidate whatever is in flight before resetting
            state.load_generation += 1;
            state.clear_unselected();
            state.current_page = 1;
            state.info = None;
            state.load_phase = LoadPhase::Idle;
            begin_load(state, 1)
        }
        Action::SetSearchText(text) => {
            if text == state.search_text {
                return Effect::None;
            }
            state.search_text = text;
            state.search_generation += 1;
            state.debounce_pending = true;
            Effect::ScheduleDebounce {
                generation: state.search_generation,
            }
        }
        Action::SubmitSearch => {
            state.search_generation += 1;
            state.debounce_pending = false;
            begin_load(state, 1)
        }
        Action::DebounceElapsed { generation } => {
            if !state.debounce_pending || generation != state.search_generation {
                debug!(
                    "Ignoring superseded debounce timer {} (current {})",
                    generation, state.search_generation
                );
                return Effect::None;
            }
            state.debounce_pending = false;
            begin_load(state, 1)
        }
        Action::NextPage => match &state.info {
            Some(info) if info.has_next() => {
                let mut target = state.current_page.saturating_add(1);
                if info.pages > 0 {
                    target = target.min(info.pages);
                }
                begin_load(state, target)
            }
            _ => Effect::None,
        },
        Action::PrevPage => match &state.info {
            Some(info) if info.has_prev() => {
                let target = state.current_page.saturating_sub(1).max(1);
                begin_load(state, target)
            }
            _ => Effect::None,
        },
        Action::Retry => match state.load_phase {
            LoadPhase::Failed(_) | LoadPhase::Idle => {
                let page = state.current_page.max(1);
                begin_load(state, page)
            }
            LoadPhase::Loading | LoadPhase::Loaded => Effect::None,
        },
        Action::LoadFinished { generation, result } => {
            if generation != state.load_generation {
                debug!(
                    "Discarding stale load {} (current {})",
                    generation, state.load_generation
                );
                return Effect::None;
            }
            match result {
                Ok(page) => {
                    if page.items.kind() != state.selected {
                        warn!(
                            "Dropping {} page while {} is selected",
                            page.items.kind().label(),
                            state.selected.label()
                        );
                        return Effect::None;
                    }
                    state.info = Some(page.info);
                    state.replace_items(page.items);
                    state.load_phase = LoadPhase::Loaded;
                }
                Err(e) if e.is_cancelled() => {
                    // Nothing replaced this load; fall back to what is on screen
                    debug!("Load {} cancelled", generation);
                    state.load_phase = if state.info.is_some() {
                        LoadPhase::Loaded
                    } else {
                        LoadPhase::Idle
                    };
                }
                Err(e) => {
                    warn!("Load {} failed: {}", generation, e);
                    state.load_phase = LoadPhase::Failed(e.to_string());
                }
            }
            Effect::None
        }
    }
}

/// Supersedes any in-flight load and requests `page` for the selected resource.
fn begin_load(state: &mut BrowseState, page: u32) -> Effect {
    state.load_generation += 1;
    state.load_phase = LoadPhase::Loading;
    state.current_page = page;
    Effect::Load(LoadRequest {
        generation: state.load_generation,
        kind: state.selected,
        page,
        name: state.current_filter(),
    })
}
