use crate::application::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Crossterm reports Shift+letter as the uppercase char, so bindings
    /// match on `KeyCode` alone.
    pub fn handle_key_event(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browsing => Self::handle_browsing_mode(app, key),
            AppMode::CartDrawer => Self::handle_cart_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_browsing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_product(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_product(),
            KeyCode::Enter | KeyCode::Char('a') => app.add_selected_to_cart(),
            KeyCode::Char('n') => app.notify_selected(),
            KeyCode::Char('N') => app.notify_launch(),
            KeyCode::Char('c') => app.open_cart(),
            KeyCode::Char('o') => app.order_via_chat(),
            KeyCode::Char('i') => app.open_social(),
            KeyCode::Char('y') => app.copy_last_link(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_cart_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('c') => app.close_cart(),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_cart_row(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_cart_row(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.increment_selected(),
            KeyCode::Char('-') | KeyCode::Char('_') => app.decrement_selected(),
            KeyCode::Delete | KeyCode::Char('d') => app.remove_selected(),
            KeyCode::Char('x') => app.clear_cart(),
            KeyCode::Enter => app.checkout(),
            KeyCode::Char('y') => app.copy_last_link(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
