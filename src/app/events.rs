// chat_scroll — Scroll anchoring and unread tracking for chat transcripts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::App;
use crate::ui::OverlayKind;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

const MOUSE_SCROLL_LINES: isize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        // Resize is picked up by the next layout pass
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_rows(-MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_rows(MOUSE_SCROLL_LINES),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // The help overlay swallows everything except its own dismissal and quit.
    if app.overlays.is_open(OverlayKind::Help) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
            (KeyCode::Esc | KeyCode::Char('?' | 'q'), _) => {
                app.overlays.close();
            }
            _ => {}
        }
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.overlays.toggle(OverlayKind::Help, app.body_area),
        (KeyCode::Up | KeyCode::Char('k'), _) => app.scroll_rows(-1),
        (KeyCode::Down | KeyCode::Char('j'), _) => app.scroll_rows(1),
        (KeyCode::PageUp, _) => app.scroll_rows(-app.page_rows()),
        (KeyCode::PageDown | KeyCode::Char(' '), _) => app.scroll_rows(app.page_rows()),
        (KeyCode::Home, _) => app.scroll_to_top(),
        (KeyCode::End | KeyCode::Char('G'), _) => app.jump_to_latest(),
        (KeyCode::Char('p'), _) => {
            app.paused = !app.paused;
            tracing::debug!(paused = app.paused, "live feed toggled");
        }
        _ => {}
    }
}
