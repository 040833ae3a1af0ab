//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_email_char, can_add_name_char, can_add_password_char, can_add_term_char, App,
    AppState, LoginFocus, Tab, PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::LoggingIn => return handle_login_input(app, key),
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return false;
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return false;
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
                _ => {}
            }
            return false;
        }
        AppState::ShowingSentences => {
            handle_sentences_input(app, key);
            return false;
        }
        AppState::Searching => {
            handle_search_input(app, key);
            return false;
        }
        AppState::Editing => {
            handle_lookup_input(app, key);
            return false;
        }
        AppState::Normal | AppState::Quitting => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return false;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return false;
        }
        KeyCode::Char('1') => app.set_tab(Tab::Define),
        KeyCode::Char('2') => app.set_tab(Tab::Words),
        KeyCode::Char('3') => app.set_tab(Tab::Phrases),
        KeyCode::Tab => app.set_tab(app.current_tab.next()),
        KeyCode::BackTab => app.set_tab(app.current_tab.prev()),
        KeyCode::Left => app.prev_meaning(),
        KeyCode::Right => app.next_meaning(),
        KeyCode::Char('u') => app.refresh_collections(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Esc => {
            // Dismiss inline messages
            app.status_message = None;
            app.definition_error = None;
            if !app.search_query.is_empty() {
                app.search_query.clear();
                app.cursor_to_start();
            }
        }
        _ => match app.current_tab {
            Tab::Define => handle_define_input(app, key),
            Tab::Words | Tab::Phrases => handle_collection_input(app, key),
        },
    }
    false
}

fn handle_define_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('/') | KeyCode::Char('i') => {
            app.state = AppState::Editing;
        }
        KeyCode::Char('t') => app.toggle_lookup_kind(),
        KeyCode::Char('s') => app.save_definition(),
        _ => {}
    }
}

fn handle_collection_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_cursor(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => app.cursor_to_start(),
        KeyCode::End => app.cursor_to_end(),
        KeyCode::Char(' ') => app.toggle_current_selection(),
        KeyCode::Char('g') | KeyCode::Enter => app.generate_sentences(),
        KeyCode::Char('c') => app.clear_selection(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
            app.search_query.clear();
            app.cursor_to_start();
        }
        _ => {}
    }
}

fn handle_lookup_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            app.submit_lookup();
        }
        KeyCode::Tab => app.toggle_lookup_kind(),
        KeyCode::Backspace => {
            app.lookup_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.lookup_input.clear();
        }
        KeyCode::Char(c) => {
            if can_add_term_char(&app.lookup_input, c) {
                app.lookup_input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
            app.cursor_to_start();
        }
        KeyCode::Enter => {
            // Keep search query active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.cursor_to_start();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.cursor_to_start();
        }
        _ => {}
    }
}

fn handle_sentences_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.state = AppState::Normal;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.sentences_scroll = app.sentences_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.sentences_scroll = app.sentences_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.sentences_scroll = app.sentences_scroll.saturating_sub(PAGE_SCROLL_SIZE as u16);
        }
        KeyCode::PageDown => {
            app.sentences_scroll = app.sentences_scroll.saturating_add(PAGE_SCROLL_SIZE as u16);
        }
        _ => {}
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = app.login_focus.next(app.auth_mode);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = app.login_focus.prev(app.auth_mode);
        }
        KeyCode::Left | KeyCode::Right if app.login_focus == LoginFocus::Button => {
            app.toggle_auth_mode();
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Button => app.submit_auth(),
            focus => app.login_focus = focus.next(app.auth_mode),
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Name => {
                app.login_name.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if can_add_email_char(&app.login_email, c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(&app.login_password, c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Name => {
                if can_add_name_char(&app.login_name, c) {
                    app.login_name.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    false
}
