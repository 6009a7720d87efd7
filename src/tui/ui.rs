use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Tabs, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::api::ResourceKind;
use crate::core::{BrowseState, LoadPhase};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, state: &BrowseState, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let area = frame.area();
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [tabs_area, search_area, main_area, footer_area] = layout.areas(area);

    draw_tabs(frame, tabs_area, state.selected);
    draw_search(frame, search_area, state, tui);
    draw_results(frame, main_area, state, tui);
    draw_footer(frame, footer_area, state);

    if let Some(detail) = &tui.detail {
        detail.render(frame, area);
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, selected: ResourceKind) {
    let titles: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.label()).collect();
    let index = ResourceKind::ALL
        .iter()
        .position(|k| *k == selected)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(index)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(tabs, area);
}

fn draw_search(frame: &mut Frame, area: Rect, state: &BrowseState, tui: &TuiState) {
    let focused = tui.focus == Focus::Search && tui.detail.is_none();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let input = Paragraph::new(state.search_text.as_str())
        .block(Block::bordered().title(" Search name ").border_style(border_style));
    frame.render_widget(input, area);

    if focused {
        let text_width = state.search_text.width() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + text_width).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn draw_results(frame: &mut Frame, area: Rect, state: &BrowseState, tui: &mut TuiState) {
    let has_items = state.visible_len() > 0;

    match &state.load_phase {
        LoadPhase::Idle | LoadPhase::Loading if !has_items => {
            draw_centered(frame, area, vec![Line::from("Loading...")]);
        }
        LoadPhase::Failed(message) if !has_items => {
            draw_centered(
                frame,
                area,
                vec![
                    Line::styled("Something went wrong", Style::default().add_modifier(Modifier::BOLD)),
                    Line::styled(message.as_str(), Style::default().fg(Color::Red)),
                    Line::from(""),
                    Line::from("Press Ctrl+R to retry"),
                ],
            );
        }
        LoadPhase::Loaded if !has_items => {
            draw_centered(
                frame,
                area,
                vec![
                    Line::styled("No results", Style::default().add_modifier(Modifier::BOLD)),
                    Line::from("Try a different name or clear the search."),
                ],
            );
        }
        _ => draw_list(frame, area, state, tui),
    }
}

fn draw_list(frame: &mut Frame, area: Rect, state: &BrowseState, tui: &mut TuiState) {
    let items = list_items(state);
    // Stale rows stay visible but dimmed while the next page is on its way
    let style = if state.is_loading() {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let highlight = if tui.focus == Focus::List {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(Block::bordered().title(format!(" {} ", state.selected.label())))
        .style(style)
        .highlight_style(highlight)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut tui.list_state);
}

fn list_items(state: &BrowseState) -> Vec<ListItem<'_>> {
    let secondary = Style::default().fg(Color::Gray);
    match state.selected {
        ResourceKind::Characters => state
            .characters
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(c.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {} · {}", c.species, c.status), secondary),
                ]))
            })
            .collect(),
        ResourceKind::Episodes => state
            .episodes
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(e.code.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {}", e.name)),
                    Span::styled(format!("  {}", e.air_date), secondary),
                ]))
            })
            .collect(),
        ResourceKind::Locations => state
            .locations
            .iter()
            .map(|l| {
                ListItem::new(Line::from(vec![
                    Span::styled(l.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!(
                            "  {} · {} · Residents: {}",
                            l.location_type,
                            l.dimension,
                            l.residents.len()
                        ),
                        secondary,
                    ),
                ]))
            })
            .collect(),
    }
}

fn draw_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines)
        .block(Block::bordered())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowseState) {
    frame.render_widget(Line::from(footer_spans(state)), area);
}

/// Pager and status line. Disabled controls are dimmed.
fn footer_spans(state: &BrowseState) -> Vec<Span<'static>> {
    let enabled = Style::default();
    let disabled = Style::default().add_modifier(Modifier::DIM);
    let mut spans = vec![
        Span::styled(
            "[PgUp] Prev ",
            if state.can_go_prev() { enabled } else { disabled },
        ),
        Span::styled(
            "[PgDn] Next ",
            if state.can_go_next() { enabled } else { disabled },
        ),
    ];

    if let Some(info) = &state.info {
        spans.push(Span::raw(format!(
            "| Page {}/{} | {} results ",
            state.current_page,
            info.pages.max(1),
            info.count
        )));
    }

    let status = match &state.load_phase {
        LoadPhase::Idle => Span::raw(""),
        LoadPhase::Loading => Span::styled("| Loading...", Style::default().fg(Color::Yellow)),
        LoadPhase::Loaded => Span::raw(""),
        LoadPhase::Failed(msg) => {
            Span::styled(format!("| Error: {msg} (Ctrl+R)"), Style::default().fg(Color::Red))
        }
    };
    spans.push(status);
    spans
}
