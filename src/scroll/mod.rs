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

//! Auto-scroll and unread tracking for a chat transcript.
//!
//! The pieces are small and pure where they can be: [`geometry`] decides
//! whether the viewport is at the bottom, [`delta`] decides what a list
//! replacement was, [`tracker`] combines the two into the unread counter,
//! and [`restore`] keeps the reading position stable across prepends.
//! [`AutoScroll`] wires them to a mounted [`ScrollContainer`].

pub mod container;
pub mod controller;
pub mod delta;
pub mod frame;
pub mod geometry;
pub mod notifier;
pub mod pagination;
pub mod restore;
pub mod strategy;
pub mod tracker;

pub use container::StaticContainer;
pub use controller::{AutoScroll, FrameOutcome, MessagesOutcome, ScrollOptions};
pub use delta::{Identified, ListSnapshot, MessageDelta, classify_delta};
pub use geometry::{ScrollBehavior, ScrollContainer, ScrollMetrics, ScrollState, classify_distance};
pub use notifier::{MetaNotifier, ScrollMeta, ScrollToBottomHandle};
pub use restore::{Anchor, BoundaryMarker, RestoreOutcome, Restorer};
pub use strategy::{ScrollStrategy, UnknownDeltaPolicy};
pub use tracker::UnreadTracker;
