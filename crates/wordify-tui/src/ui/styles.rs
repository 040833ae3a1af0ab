use ratatui::style::{Color, Modifier, Style};

// Palette: warm ink on a dark page, violet chrome
pub const INK: Color = Color::Rgb(226, 222, 210);
pub const FADED: Color = Color::Rgb(122, 124, 136);
pub const BRAND: Color = Color::Rgb(138, 116, 214);
/// Part of speech and phrase type labels
pub const CATEGORY: Color = Color::Rgb(86, 178, 188);
/// Meaning and sentence numbering
pub const NUMBER: Color = Color::Rgb(224, 152, 82);
pub const EXAMPLE: Color = Color::Rgb(196, 186, 156);
/// Selection check marks and the saved badge
pub const MARK: Color = Color::Rgb(122, 198, 112);
pub const WARNING: Color = Color::Rgb(222, 92, 98);
pub const CURSOR_BG: Color = Color::Rgb(54, 46, 82);
pub const BAR_BG: Color = Color::Rgb(30, 28, 40);

// ===== Chrome =====

pub fn title_style() -> Style {
    Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
}

pub fn frame_style(focused: bool) -> Style {
    Style::default().fg(if focused { BRAND } else { FADED })
}

pub fn tab_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(BRAND)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(FADED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(BAR_BG).fg(INK)
}

/// Signed-in user's name in the title bar
pub fn account_style() -> Style {
    Style::default().fg(BRAND)
}

/// Section headings in overlays and confirm questions
pub fn heading_style() -> Style {
    Style::default().fg(NUMBER).add_modifier(Modifier::BOLD)
}

pub fn key_style() -> Style {
    Style::default().fg(NUMBER).add_modifier(Modifier::BOLD)
}

// ===== Text =====

pub fn text_style() -> Style {
    Style::default().fg(INK)
}

/// Hints, secondary details and separators
pub fn faded_style() -> Style {
    Style::default().fg(FADED)
}

pub fn error_style() -> Style {
    Style::default().fg(WARNING)
}

/// List rows and form fields, highlighted under the cursor
pub fn row_style(under_cursor: bool) -> Style {
    if under_cursor {
        Style::default()
            .fg(INK)
            .bg(CURSOR_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        text_style()
    }
}

pub fn filter_style() -> Style {
    Style::default().fg(NUMBER)
}

// ===== Terms and meanings =====

pub fn term_style() -> Style {
    Style::default().fg(INK).add_modifier(Modifier::BOLD)
}

/// "Word" / "Phrase" badge in front of the lookup input
pub fn kind_badge_style() -> Style {
    Style::default()
        .fg(BAR_BG)
        .bg(CATEGORY)
        .add_modifier(Modifier::BOLD)
}

pub fn number_style(current: bool) -> Style {
    if current {
        Style::default().fg(NUMBER).add_modifier(Modifier::BOLD)
    } else {
        faded_style()
    }
}

pub fn category_style() -> Style {
    Style::default().fg(CATEGORY)
}

pub fn example_style() -> Style {
    Style::default().fg(EXAMPLE).add_modifier(Modifier::ITALIC)
}

pub fn mark_style(checked: bool) -> Style {
    if checked {
        Style::default().fg(MARK).add_modifier(Modifier::BOLD)
    } else {
        faded_style()
    }
}

/// Shown next to a looked-up term that is already in the collection
pub fn saved_badge_style() -> Style {
    Style::default().fg(MARK)
}
