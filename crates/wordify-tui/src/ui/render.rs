use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, AuthMode, LoginFocus, Tab};

use super::styles;
use super::tabs::{collection, define};

const LOGO: [&str; 3] = [
    "   ╦ ╦╔═╗╦═╗╔╦╗╦╔═╗╦ ╦",
    "   ║║║║ ║╠╦╝ ║║║╠╣ ╚╦╝",
    "   ╚╩╝╚═╝╩╚══╩╝╩╚   ╩ ",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        AppState::ShowingSentences => render_sentences_overlay(frame, app),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Wordify";
    let user = app
        .session()
        .map(|s| format!("{}  ", s.greeting_name()))
        .unwrap_or_default();
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + user.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(user, styles::account_style()),
        Span::styled(help_hint, styles::faded_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::faded_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [Tab::Define, Tab::Words, Tab::Phrases];

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::faded_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        spans.push(Span::styled(label, styles::tab_style(*tab == app.current_tab)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::faded_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab.kind() {
        None => define::render(frame, app, area),
        Some(kind) => collection::render(frame, app, area, kind),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.current_tab.kind().map(|k| app.is_list_loading(k)).unwrap_or(false) {
        " Refreshing... ".to_string()
    } else {
        match app.current_tab.kind() {
            Some(kind) => format!(" Updated {} ", app.cache_ages.age_for(kind)),
            None => format!(" Updated {} ", app.cache_ages.last_updated()),
        }
    };

    let shortcuts = "[u]pdate | [L]ogout | [q]uit";
    let right_text = match app.health_summary {
        Some(ref health) => format!(" {} | {} ", health, shortcuts),
        None => format!(" {} ", shortcuts),
    };

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::faded_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::faded_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, styles::key_style()),
        Span::styled(desc, styles::text_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 32, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = logo_lines();
    help_text.push(Line::from(Span::styled(
        format!("              version {}", version),
        styles::faded_style(),
    )));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Navigation", styles::heading_style())));
    help_text.push(help_line("  1-3       ", "Switch tabs"));
    help_text.push(help_line("  Tab       ", "Next tab"));
    help_text.push(help_line("  ←/→       ", "Previous/next meaning"));
    help_text.push(help_line("  ↑/↓       ", "Navigate list"));
    help_text.push(help_line("  Esc       ", "Dismiss message / go back"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Define", styles::heading_style())));
    help_text.push(help_line("  Enter     ", "Type a term, Enter again to look up"));
    help_text.push(help_line("  t         ", "Switch between word and phrase"));
    help_text.push(help_line("  s         ", "Save the definition"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" My Words / My Phrases", styles::heading_style())));
    help_text.push(help_line("  space     ", "Select term with the shown meaning"));
    help_text.push(help_line("  g         ", "Generate sentences for selection"));
    help_text.push(help_line("  c         ", "Clear selection"));
    help_text.push(help_line("  d         ", "Delete (asks first)"));
    help_text.push(help_line("  /         ", "Search"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Account", styles::heading_style())));
    help_text.push(help_line("  u         ", "Refresh saved lists"));
    help_text.push(help_line("  L         ", "Log out"));
    help_text.push(help_line("  q         ", "Quit"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("       Press ", styles::faded_style()),
        Span::styled("?", styles::key_style()),
        Span::styled(" or ", styles::faded_style()),
        Span::styled("Esc", styles::key_style()),
        Span::styled(" to close", styles::faded_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn form_field<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let style = styles::row_style(focused);
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(label, styles::faded_style()),
        Span::styled(" [", styles::faded_style()),
        Span::styled(format!("{:<24}{}", value, cursor), style),
        Span::styled("]", styles::faded_style()),
    ])
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let signup = app.auth_mode == AuthMode::Signup;
    let mut height = if signup { 14 } else { 13 };
    if app.login_error.is_some() {
        height += 2;
    }
    let area = centered_rect_fixed(50, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));

    // Show the tail of long addresses so the cursor stays visible
    let email: String = {
        let chars: Vec<char> = app.login_email.chars().collect();
        chars[chars.len().saturating_sub(24)..].iter().collect()
    };
    lines.push(form_field("Email:   ", email, app.login_focus == LoginFocus::Email));
    let masked = "*".repeat(app.login_password.chars().count().min(24));
    lines.push(form_field("Password:", masked, app.login_focus == LoginFocus::Password));
    if signup {
        lines.push(form_field(
            "Name:    ",
            app.login_name.chars().take(24).collect(),
            app.login_focus == LoginFocus::Name,
        ));
    }

    lines.push(Line::from(""));
    let button_focused = app.login_focus == LoginFocus::Button;
    let label = if app.authenticating {
        "Please wait...".to_string()
    } else if button_focused {
        format!("▶ {} ◀", app.auth_mode.title())
    } else {
        app.auth_mode.title().to_string()
    };
    let button_style = styles::row_style(button_focused);
    lines.push(Line::from(vec![
        Span::raw("             ["),
        Span::styled(format!(" {:^16} ", label), button_style),
        Span::raw("]"),
    ]));
    let other = app.auth_mode.toggle().title();
    lines.push(Line::from(Span::styled(
        format!("      ←/→ on the button: {} instead", other.to_lowercase()),
        styles::faded_style(),
    )));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", app.auth_mode.title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::frame_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Create a centered rectangle sized as a percentage of the frame
fn centered_rect_percent(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let height = r.height * percent_y / 100;
    centered_rect_fixed(width, height, r)
}

fn confirm_lines(question: String) -> Vec<Line<'static>> {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {}", question),
        styles::heading_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::faded_style()),
        Span::styled("[Y]", styles::key_style()),
        Span::styled(" to confirm, ", styles::faded_style()),
        Span::styled("[N]", styles::key_style()),
        Span::styled(" to cancel", styles::faded_style()),
    ]));
    lines
}

fn render_confirm(frame: &mut Frame, question: String) {
    let area = centered_rect_fixed(50, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(confirm_lines(question))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm(frame, "Are you sure you want to quit?".to_string());
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let Some(ref entry) = app.pending_delete else {
        return;
    };
    render_confirm(
        frame,
        format!("Delete \"{}\" from your {}?", entry.text, entry.kind.collection_path()),
    );
}

fn render_sentences_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_percent(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    if app.is_generating() {
        lines.push(Line::from(Span::styled(
            format!("Generating sentences for {} selected...", app.selection.len()),
            styles::faded_style(),
        )));
    }
    if let Some(ref error) = app.sentences_error {
        lines.push(Line::from(Span::styled(error.clone(), styles::error_style())));
    }

    for set in &app.sentences {
        let mut heading = vec![Span::styled(set.term.clone(), styles::term_style())];
        if !set.category.is_empty() {
            heading.push(Span::styled(format!("  ({})", set.category), styles::category_style()));
        }
        lines.push(Line::from(heading));
        if !set.meaning.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", set.meaning),
                styles::faded_style(),
            )));
        }
        for (i, sentence) in set.sentences.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", i + 1), styles::number_style(true)),
                Span::styled(sentence.clone(), styles::text_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(" Practice sentences ")
        .title_style(styles::title_style())
        .title_bottom(Line::from(Span::styled(
            " ↑/↓ scroll  Esc close ",
            styles::faded_style(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::frame_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.sentences_scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_clamps_to_frame() {
        let frame = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(50, 14, frame);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);

        let rect = centered_rect_fixed(20, 4, frame);
        assert_eq!((rect.x, rect.y), (10, 3));
    }

    #[test]
    fn test_centered_rect_percent() {
        let rect = centered_rect_percent(80, 50, Rect::new(0, 0, 100, 40));
        assert_eq!((rect.width, rect.height), (80, 20));
        assert_eq!((rect.x, rect.y), (10, 10));
    }
}
