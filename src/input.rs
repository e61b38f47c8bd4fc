//! Keyboard and mouse mapping.
//!
//! Translates terminal events into list view operations. Anything that has
//! to leave the UI loop (a fetch, a browser hand-off, quitting) comes back as
//! an [`Effect`] for the event loop to carry out.

use crate::app::{App, EditIntent, FetchTicket, UiMode};
use crate::contributions::models::AccountRef;
use crate::contributions::ContributionsTab;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Side effect requested by an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue this request
    Fetch(FetchTicket),
    /// Open an account's profile page
    OpenProfile(AccountRef),
    /// Hand a row action over to the website workflow
    LaunchWorkflow(EditIntent),
    /// Leave the application
    Quit,
}

/// Handle a key press.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Effect::Quit);
    }

    match app.mode {
        UiMode::List => handle_list_key(app, key.code),
        UiMode::Search => {
            match key.code {
                KeyCode::Enter => return Some(Effect::Fetch(app.submit_search())),
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Backspace => app.remove_search_char(),
                KeyCode::Char(c) => app.add_search_char(c),
                _ => {}
            }
            None
        }
        UiMode::ActionMenu => {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.mode = UiMode::List,
                KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
                KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
                KeyCode::Enter => {
                    app.confirm_menu_action();
                }
                _ => {}
            }
            None
        }
        UiMode::EditDrawer => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                app.close_row_action();
                None
            }
            KeyCode::Enter => {
                let intent = app.edit_intent.clone();
                app.close_row_action();
                intent.map(Effect::LaunchWorkflow)
            }
            _ => None,
        },
    }
}

fn handle_list_key(app: &mut App, code: KeyCode) -> Option<Effect> {
    let effect = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Effect::Quit,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Effect::Fetch(app.next_tab()),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Effect::Fetch(app.previous_tab()),
        KeyCode::Char(c @ '1'..='3') => {
            let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
            let tab = ContributionsTab::from_index(index)?;
            Effect::Fetch(app.select_tab(tab))
        }
        KeyCode::Char('n') | KeyCode::PageDown => Effect::Fetch(app.next_page()?),
        KeyCode::Char('p') | KeyCode::PageUp => Effect::Fetch(app.previous_page()?),
        KeyCode::Char('r') => Effect::Fetch(app.refresh()),
        KeyCode::Char('/') => {
            app.start_search();
            return None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_up();
            return None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_down();
            return None;
        }
        KeyCode::Enter | KeyCode::Char('a') => {
            if !app.open_action_menu() && app.selected_order().is_some() {
                app.set_status("No actions for this contribution".to_string());
            }
            return None;
        }
        KeyCode::Char('o') => {
            let is_incoming = app.is_incoming();
            let account = app.selected_order()?.counterpart(is_incoming).clone();
            Effect::OpenProfile(account)
        }
        _ => return None,
    };
    Some(effect)
}

/// Handle a mouse event. Wheel scrolling moves the selection in list mode.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != UiMode::List {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}
