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

use ratatui::style::Color;

// Accent
pub const RUST_ORANGE: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const SEPARATOR_CHAR: &str = "─";
pub const LIVE_MARKER: &str = "•";

// Jump-to-latest indicator
pub const JUMP_BG: Color = Color::Rgb(40, 44, 52);
pub const JUMP_NEW_FG: Color = RUST_ORANGE;
pub const JUMP_IDLE_FG: Color = Color::White;

const AUTHOR_COLORS: &[Color] =
    &[Color::Magenta, Color::Cyan, Color::Green, Color::Yellow, Color::Blue, RUST_ORANGE];

/// Stable per-author color so names keep their color across pages.
pub fn author_color(author: &str) -> Color {
    let hash = author.bytes().fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(usize::from(b)));
    AUTHOR_COLORS[hash % AUTHOR_COLORS.len()]
}
