//! Input handling for the TUI.
//!
//! Processes keyboard events and updates application state.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppMode, WorkflowCommand};
use crate::App;

/// Handle keyboard events.
pub fn handle_events(key: KeyEvent, app: &mut App) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+C quits from any screen
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Ignore input while a generation is queued
    if app.pending.is_some() {
        return;
    }

    match app.mode {
        AppMode::Setup => handle_setup_mode(key, app),
        AppMode::Profile => handle_profile_mode(key, app),
        AppMode::Plan => handle_plan_mode(key, app),
        AppMode::Help => handle_help_mode(key, app),
    }
}

/// Handle input in the credential setup form.
fn handle_setup_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::Enter => app.submit_setup(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}

/// Handle input in the business profile form.
fn handle_profile_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::Enter => {
            // Enter walks the form; on the last field it submits
            if app.profile_focus.is_last() {
                app.submit_profile();
            } else {
                app.focus_next();
            }
        }
        KeyCode::Backspace => app.delete_char(),
        KeyCode::F(1) => app.show_help(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}

/// Handle input while generating the plan.
fn handle_plan_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.quit(),
        KeyCode::Char('g') => app.request(WorkflowCommand::Start),
        KeyCode::Char('n') | KeyCode::Right => app.request(WorkflowCommand::Next),
        KeyCode::Char('p') | KeyCode::Left => app.request(WorkflowCommand::Previous),
        KeyCode::Char('c') => app.request(WorkflowCommand::Complete),
        KeyCode::Char('r') => app.request(WorkflowCommand::Reset),
        KeyCode::Char('s') => {
            app.export();
        }
        KeyCode::Char('e') => app.edit_profile(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.scroll_up();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.scroll_down();
            }
        }
        KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}

/// Handle input in help mode.
fn handle_help_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::Enter | KeyCode::F(1) => {
            app.dismiss_help();
        }
        _ => {}
    }
}
