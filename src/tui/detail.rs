//! # Detail Overlay
//!
//! Full field view of the highlighted entity plus an editable note.
//! Opened with Enter from the result list, dismissed with Esc.
//!
//! Follows the persistent state pattern: `DetailState` lives in `TuiState`
//! and is rendered each frame from there.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::api::ResourceKind;
use crate::core::BrowseState;
use crate::core::notes::{NoteKey, NoteStore};
use crate::tui::event::TuiEvent;

pub struct DetailState {
    pub key: NoteKey,
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
    pub note: String,
    pub dirty: bool,
    pub status: Option<String>,
}

/// What the overlay wants the event loop to do.
#[derive(Debug, PartialEq, Eq)]
pub enum DetailEvent {
    Save,
    Dismiss,
}

impl DetailState {
    /// Builds the overlay for item `index` of the selected resource.
    pub fn for_item(state: &BrowseState, index: usize, notes: &dyn NoteStore) -> Option<Self> {
        let (id, title, fields) = match state.selected {
            ResourceKind::Characters => {
                let c = state.characters.get(index)?;
                (
                    c.id,
                    c.name.clone(),
                    vec![
                        ("Status", c.status.clone()),
                        ("Species", c.species.clone()),
                        ("Episodes", c.episodes.len().to_string()),
                        ("Image", c.image.clone()),
                    ],
                )
            }
            ResourceKind::Episodes => {
                let e = state.episodes.get(index)?;
                (
                    e.id,
                    e.name.clone(),
                    vec![("Code", e.code.clone()), ("Air date", e.air_date.clone())],
                )
            }
            ResourceKind::Locations => {
                let l = state.locations.get(index)?;
                (
                    l.id,
                    l.name.clone(),
                    vec![
                        ("Type", l.location_type.clone()),
                        ("Dimension", l.dimension.clone()),
                        ("Residents", l.residents.len().to_string()),
                    ],
                )
            }
        };
        let key = NoteKey::new(state.selected, id);
        Some(Self {
            key,
            title,
            fields,
            note: notes.get(key).unwrap_or_default(),
            dirty: false,
            status: None,
        })
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape => Some(DetailEvent::Dismiss),
            TuiEvent::Save => Some(DetailEvent::Save),
            TuiEvent::InputChar(c) => {
                self.note.push(*c);
                self.dirty = true;
                None
            }
            TuiEvent::Submit => {
                self.note.push('\n');
                self.dirty = true;
                None
            }
            TuiEvent::Backspace => {
                self.dirty |= self.note.pop().is_some();
                None
            }
            _ => None,
        }
    }

    /// Writes the note through `store` and records the outcome for display.
    pub fn save(&mut self, store: &mut dyn NoteStore) {
        match store.set(self.key, &self.note) {
            Ok(()) => {
                self.dirty = false;
                self.status = Some("Saved".to_string());
            }
            Err(e) => {
                log::warn!("Failed to save note {}: {}", self.key, e);
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered(area, 70, 80);
        frame.render_widget(Clear, popup);

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .title_bottom(" Ctrl+S save · Esc close ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let field_height = self.fields.len() as u16 + 1;
        let [fields_area, note_area] =
            Layout::vertical([Constraint::Length(field_height), Constraint::Min(3)]).areas(inner);

        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::raw(value.as_str()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), fields_area);

        let mut note_title = String::from(" My Notes ");
        if self.dirty {
            note_title.push_str("(unsaved) ");
        } else if let Some(status) = &self.status {
            note_title.push_str(&format!("({status}) "));
        }
        let note = Paragraph::new(self.note.as_str())
            .block(Block::bordered().title(note_title))
            .wrap(Wrap { trim: false });
        frame.render_widget(note, note_area);
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
