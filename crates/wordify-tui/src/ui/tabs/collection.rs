use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use wordify_core::models::TermKind;
use wordify_core::utils::truncate_string;

use crate::app::{App, AppState};
use crate::ui::styles;

use super::define::meaning_lines;

/// Width of the term column in the list
const TERM_COLUMN_WIDTH: usize = 22;

pub fn render(frame: &mut Frame, app: &App, area: Rect, kind: TermKind) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(frame, app, chunks[0], kind);
    render_detail(frame, app, chunks[1], kind);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect, kind: TermKind) {
    let entries = app.visible_entries();
    let summary_width = (area.width as usize).saturating_sub(TERM_COLUMN_WIDTH + 8);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let checked = app.selection.contains(&entry.text);
            let mark = Span::styled(if checked { "[x] " } else { "[ ] " }, styles::mark_style(checked));
            let text = if app.is_deleting(&entry.id) {
                format!("{} (deleting)", entry.text)
            } else {
                entry.text.clone()
            };
            let line = Line::from(vec![
                mark,
                Span::raw(format!(
                    "{:<width$} ",
                    truncate_string(&text, TERM_COLUMN_WIDTH),
                    width = TERM_COLUMN_WIDTH
                )),
                Span::styled(
                    truncate_string(entry.summary(), summary_width),
                    styles::faded_style(),
                ),
            ]);

            ListItem::new(line).style(styles::row_style(i == app.list_cursor))
        })
        .collect();

    let collection = app.collection(kind);
    let mut title = format!(" My {} ({}) ", capitalized(kind.collection_path()), collection.len());
    if !app.selection.is_empty() {
        title.push_str(&format!("- {} selected ", app.selection.len()));
    }
    if app.is_list_loading(kind) {
        title.push_str("- loading ");
    }

    let mut block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::frame_style(true));

    if app.state == AppState::Searching || !app.search_query.is_empty() {
        let cursor = if app.state == AppState::Searching { "▌" } else { "" };
        block = block.title_bottom(Line::from(Span::styled(
            format!(" /{}{} ", app.search_query, cursor),
            styles::filter_style(),
        )));
    }

    if items.is_empty() {
        let message = if !app.search_query.is_empty() {
            format!("No {} match \"{}\"", kind.collection_path(), app.search_query)
        } else if !collection.is_loaded() {
            "Loading...".to_string()
        } else {
            format!(
                "No saved {} yet. Look one up on the Define tab and press [s].",
                kind.collection_path()
            )
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, styles::faded_style())))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.list_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect, kind: TermKind) {
    let (title, lines) = match app.current_entry() {
        Some(entry) => {
            let mut lines = vec![
                Line::from(Span::styled(entry.text.clone(), styles::term_style())),
                Line::from(Span::styled(
                    format!("Saved {}", entry.saved_display()),
                    styles::faded_style(),
                )),
                Line::from(""),
            ];

            let total = entry.meanings.len();
            for (i, meaning) in entry.meanings.iter().enumerate() {
                lines.extend(meaning_lines(kind, meaning, i + 1, total, i == app.meaning_index));
                lines.push(Line::from(""));
            }
            if total == 0 {
                lines.push(Line::from(Span::styled("No meanings saved", styles::faded_style())));
                lines.push(Line::from(""));
            }

            lines.push(Line::from(Span::styled(
                "[space] select with ▶ meaning  ←/→ meaning  [g] sentences  [c] clear  [d] delete",
                styles::faded_style(),
            )));
            (format!(" {} ", entry.text), lines)
        }
        None => (
            " Details ".to_string(),
            vec![Line::from(Span::styled(
                format!("Select a {} from the list", kind),
                styles::faded_style(),
            ))],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::frame_style(false));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
