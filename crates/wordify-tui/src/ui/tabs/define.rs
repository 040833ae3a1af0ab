use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use wordify_core::models::{Meaning, TermKind};

use crate::app::{App, AppState};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_lookup_box(frame, app, chunks[0]);
    render_definition(frame, app, chunks[1]);
}

fn render_lookup_box(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.state == AppState::Editing;
    let cursor = if editing { "▌" } else { "" };

    let mut spans = vec![
        Span::styled(format!(" {} ", app.lookup_kind), styles::kind_badge_style()),
        Span::styled(" › ", styles::faded_style()),
        Span::styled(format!("{}{}", app.lookup_input, cursor), styles::text_style()),
    ];
    if app.lookup_input.is_empty() && !editing {
        spans.push(Span::styled(
            "press Enter to type a term",
            styles::faded_style(),
        ));
    }

    let title = match app.lookup_kind {
        TermKind::Word => " Look up a word ",
        TermKind::Phrase => " Look up a phrase ",
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::frame_style(editing));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_definition(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if app.is_looking_up() {
        lines.push(Line::from(Span::styled("Looking up...", styles::faded_style())));
        lines.push(Line::from(""));
    }

    if let Some(ref error) = app.definition_error {
        lines.push(Line::from(Span::styled(error.clone(), styles::error_style())));
        lines.push(Line::from(""));
    }

    let title = match app.definition {
        Some(ref definition) => {
            let saved = app.collection(definition.kind).contains_text(&definition.text);
            let mut heading = vec![Span::styled(definition.text.clone(), styles::term_style())];
            if saved {
                heading.push(Span::styled(
                    format!("  (in your {})", definition.kind.collection_path()),
                    styles::saved_badge_style(),
                ));
            }
            lines.push(Line::from(heading));
            lines.push(Line::from(""));

            if definition.meanings.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No meanings returned",
                    styles::faded_style(),
                )));
            }
            for (i, meaning) in definition.meanings.iter().enumerate() {
                let current = i == app.meaning_index;
                lines.extend(meaning_lines(
                    definition.kind,
                    meaning,
                    i + 1,
                    definition.meanings.len(),
                    current,
                ));
                lines.push(Line::from(""));
            }

            let hint = if app.is_saving() {
                "Saving..."
            } else {
                "[s] save  [t] word/phrase  [Enter] new lookup"
            };
            lines.push(Line::from(Span::styled(hint, styles::faded_style())));

            format!(" {} ", definition.text)
        }
        None => {
            if !app.is_looking_up() && app.definition_error.is_none() {
                lines.push(Line::from(Span::styled(
                    "Type a word or phrase and press Enter. [t] switches between words and phrases.",
                    styles::faded_style(),
                )));
            }
            " Definition ".to_string()
        }
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

/// Lines describing one meaning. Shared by the lookup and collection views.
pub fn meaning_lines(
    kind: TermKind,
    meaning: &Meaning,
    number: usize,
    total: usize,
    current: bool,
) -> Vec<Line<'static>> {
    let marker = if current { "▶ " } else { "  " };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{}{}/{} ", marker, number, total), styles::number_style(current)),
        Span::styled(format!("{}: ", kind.category_label()), styles::faded_style()),
        Span::styled(meaning.category_display().to_string(), styles::category_style()),
    ])];
    lines.push(Line::from(Span::styled(
        format!("    {}", meaning.definition),
        styles::text_style(),
    )));

    for example in &meaning.examples {
        lines.push(Line::from(Span::styled(
            format!("    \u{201c}{}\u{201d}", example),
            styles::example_style(),
        )));
    }

    if !meaning.related.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(format!("    {}: ", kind.related_label()), styles::faded_style()),
            Span::styled(meaning.related.join(", "), styles::text_style()),
        ]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meaning() -> Meaning {
        Meaning {
            definition: "a greeting".to_string(),
            category: "interjection".to_string(),
            examples: vec!["Hello there".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_meaning_heading_marks_current_number_and_category() {
        let current = meaning_lines(TermKind::Word, &meaning(), 1, 2, true);
        let other = meaning_lines(TermKind::Word, &meaning(), 2, 2, false);

        let heading = &current[0].spans;
        assert_eq!(heading[0].content, "▶ 1/2 ");
        assert_eq!(heading[0].style, styles::number_style(true));
        assert_eq!(heading[2].content, "interjection");
        assert_eq!(heading[2].style, styles::category_style());
        assert_eq!(other[0].spans[0].style, styles::number_style(false));
        assert_ne!(styles::number_style(true), styles::number_style(false));
    }

    #[test]
    fn test_examples_use_example_style() {
        let lines = meaning_lines(TermKind::Word, &meaning(), 1, 1, true);
        let example = lines
            .iter()
            .find(|line| line.spans.iter().any(|s| s.content.contains("Hello there")))
            .unwrap();
        assert_eq!(example.spans[0].style, styles::example_style());
    }
}
