//! Input handling: maps key/mouse events to swipes and navigation requests.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use flip_tabs::config::Action;

use crate::ui::layout::AppLayout;

use super::event::AppEvent;
use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if handle_typed_key(state, key) {
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let last = state.titles.len().saturating_sub(1);
    let current = state.view.selected_index().unwrap_or(0);
    let stride = state.config.jump_stride;

    match action {
        Action::Quit => state.should_quit = true,
        Action::SwipePrev => swipe(state, -1),
        Action::SwipeNext => swipe(state, 1),
        Action::FirstTab => navigate(state, 0),
        Action::LastTab => navigate(state, last),
        Action::JumpBack => navigate(state, current.saturating_sub(stride)),
        Action::JumpForward => navigate(state, current.saturating_add(stride).min(last)),
        Action::CancelWalk => {
            state.view.cancel_navigation();
            state.status_message = Some("walk stopped".into());
        }
        Action::TogglePolicy => {
            state.toggle_feedback();
            state.status_message = Some(format!("feedback: {}", state.config.feedback));
        }
    }
}

/// Digits build up a tab number, Enter goes there.  Returns `true` when the
/// key was consumed.
fn handle_typed_key(state: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() && key.modifiers.is_empty() => {
            state.typed.push(c);
            true
        }
        KeyCode::Backspace if !state.typed.is_empty() => {
            state.typed.pop();
            true
        }
        KeyCode::Esc if !state.typed.is_empty() => {
            state.typed.clear();
            true
        }
        KeyCode::Enter if !state.typed.is_empty() => {
            let typed = std::mem::take(&mut state.typed);
            match tab_number_to_index(&typed, state.titles.len()) {
                Some(index) => navigate(state, index),
                None => state.status_message = Some(format!("no tab {typed}")),
            }
            true
        }
        _ => false,
    }
}

/// Tabs are numbered from 1 on screen.
fn tab_number_to_index(typed: &str, count: usize) -> Option<usize> {
    let number: usize = typed.parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}

/// A user swipe overrides any walk in progress.
fn swipe(state: &mut AppState, delta: isize) {
    state.view.cancel_navigation();
    state.pager.swipe(delta);
}

/// Run `scroll_to_index` in the background; walks sleep between steps.
fn navigate(state: &AppState, target: usize) {
    let view = state.view.clone();
    let tx = state.events.clone();
    tokio::spawn(async move {
        let outcome = view.scroll_to_index(target).await;
        let _ = tx.send(AppEvent::Navigated { target, outcome });
    });
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(column) = layout.strip_column(mouse.column, mouse.row) else {
                return;
            };
            let Some(index) = state.view.with_host(|host| host.hit_test(column)) else {
                return;
            };
            let Some(item) = state.titles.get(index).cloned() else {
                return;
            };
            let view = state.view.clone();
            let tx = state.events.clone();
            tokio::spawn(async move {
                let outcome = view.on_item_clicked(&item).await;
                let _ = tx.send(AppEvent::Navigated { target: index, outcome });
            });
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => swipe(state, 1),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => swipe(state, -1),
        _ => {}
    }
}
