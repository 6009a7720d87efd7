//! # Browse State
//!
//! Everything the browse screen shows, in one place.
//!
//! ```text
//! BrowseState
//! ├── selected: ResourceKind        // active tab
//! ├── search_text: String           // exactly what the user typed
//! ├── current_page: u32             // 1-based
//! ├── load_phase: LoadPhase         // Idle / Loading / Loaded / Failed
//! ├── info: Option<PageInfo>        // last committed pagination info
//! ├── characters / episodes / locations
//! ├── load_generation: u64          // id of the only load allowed to commit
//! └── search_generation: u64        // id of the only debounce timer allowed to fire
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{Character, Episode, Location, PageInfo, ResourceKind};
use crate::resource::ResourceItems;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    pub selected: ResourceKind,
    pub search_text: String,
    pub current_page: u32,
    pub load_phase: LoadPhase,
    pub info: Option<PageInfo>,
    pub characters: Vec<Character>,
    pub episodes: Vec<Episode>,
    pub locations: Vec<Location>,
    /// Generation of the load whose result may still be committed.
    pub load_generation: u64,
    /// Bumped on every keystroke; a debounce timer only fires for the latest one.
    pub search_generation: u64,
    /// True while a debounce timer is armed and not yet superseded.
    pub debounce_pending: bool,
}

impl BrowseState {
    pub fn new(selected: ResourceKind, search_text: impl Into<String>) -> Self {
        Self {
            selected,
            search_text: search_text.into(),
            current_page: 1,
            ..Default::default()
        }
    }

    /// The name filter to send: trimmed search text, or `None` when blank.
    pub fn current_filter(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_phase == LoadPhase::Loading
    }

    /// Whether a load or a debounce timer is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.debounce_pending
    }

    pub fn can_go_next(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_next)
    }

    pub fn can_go_prev(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_prev)
    }

    /// Number of items visible for the selected resource.
    pub fn visible_len(&self) -> usize {
        match self.selected {
            ResourceKind::Characters => self.characters.len(),
            ResourceKind::Episodes => self.episodes.len(),
            ResourceKind::Locations => self.locations.len(),
        }
    }

    /// Replaces the items of the kind the page belongs to.
    pub(crate) fn replace_items(&mut self, items: ResourceItems) {
        match items {
            ResourceItems::Characters(v) => self.characters = v,
            ResourceItems::Episodes(v) => self.episodes = v,
            ResourceItems::Locations(v) => self.locations = v,
        }
    }

    /// Drops the items of every kind except the selected one.
    pub(crate) fn clear_unselected(&mut self) {
        match self.selected {
            ResourceKind::Characters => {
                self.episodes.clear();
                self.locations.clear();
            }
            ResourceKind::Episodes => {
                self.characters.clear();
                self.locations.clear();
            }
            ResourceKind::Locations => {
                self.characters.clear();
                self.episodes.clear();
            }
        }
    }
}
