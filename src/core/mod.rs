//! # Core Browse Logic
//!
//! This module contains rickdex's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • BrowseState          │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • BrowseController     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Repository │      │ NoteStore  │
//!     │  Adapter   │      │ (resource) │      │  (notes)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `BrowseState`, everything the browse screen shows
//! - [`action`]: `Action`, `Effect` and the pure `update()`
//! - [`controller`]: runs effects on tokio and feeds completions back
//! - [`config`]: layered configuration
//! - [`notes`]: per-entity note persistence

pub mod action;
pub mod config;
pub mod controller;
pub mod notes;
pub mod state;

pub use action::{Action, Effect, LoadRequest, update};
pub use controller::{BrowseController, DEFAULT_DEBOUNCE};
pub use state::{BrowseState, LoadPhase};
