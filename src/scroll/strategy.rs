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

//! The two auto-scroll behaviours, selected once at construction.

use super::geometry::ScrollBehavior;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Legacy read zone: small upward scrolls do not arm the unread counter.
pub const LEGACY_THRESHOLD: f64 = 60.0;
pub const REWRITTEN_THRESHOLD: f64 = 10.0;

/// The same zones for hosts that measure in terminal rows.
pub const LEGACY_ROW_THRESHOLD: f64 = 3.0;
pub const REWRITTEN_ROW_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollStrategy {
    Legacy,
    #[default]
    Rewritten,
}

/// What to do with a list mutation that is neither a clean append nor a
/// clean prepend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownDeltaPolicy {
    Ignore,
    /// Count entries after the previous tail id as appended.
    TailAppend,
}

impl ScrollStrategy {
    #[must_use]
    pub fn threshold(self) -> f64 {
        match self {
            Self::Legacy => LEGACY_THRESHOLD,
            Self::Rewritten => REWRITTEN_THRESHOLD,
        }
    }

    /// At-bottom threshold for a row-based container.
    #[must_use]
    pub fn row_threshold(self) -> f64 {
        match self {
            Self::Legacy => LEGACY_ROW_THRESHOLD,
            Self::Rewritten => REWRITTEN_ROW_THRESHOLD,
        }
    }

    #[must_use]
    pub fn append_behavior(self) -> ScrollBehavior {
        match self {
            Self::Legacy => ScrollBehavior::Smooth,
            Self::Rewritten => ScrollBehavior::Instant,
        }
    }

    #[must_use]
    pub fn unknown_delta_policy(self) -> UnknownDeltaPolicy {
        match self {
            Self::Legacy => UnknownDeltaPolicy::Ignore,
            Self::Rewritten => UnknownDeltaPolicy::TailAppend,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Rewritten => "rewritten",
        }
    }
}

impl FromStr for ScrollStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "v1" => Ok(Self::Legacy),
            "rewritten" | "v2" => Ok(Self::Rewritten),
            other => Err(format!("unknown scroll strategy `{other}` (expected legacy or rewritten)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("legacy".parse::<ScrollStrategy>(), Ok(ScrollStrategy::Legacy));
        assert_eq!(" V2 ".parse::<ScrollStrategy>(), Ok(ScrollStrategy::Rewritten));
        assert!("sideways".parse::<ScrollStrategy>().is_err());
    }

    #[test]
    fn thresholds_stay_distinct() {
        assert!(ScrollStrategy::Legacy.threshold() > ScrollStrategy::Rewritten.threshold());
        assert!(ScrollStrategy::Legacy.row_threshold() > ScrollStrategy::Rewritten.row_threshold());
        assert!(ScrollStrategy::Rewritten.row_threshold() >= 1.0);
    }

    #[test]
    fn default_is_rewritten() {
        assert_eq!(ScrollStrategy::default(), ScrollStrategy::Rewritten);
        assert_eq!(
            ScrollStrategy::default().unknown_delta_policy(),
            UnknownDeltaPolicy::TailAppend
        );
    }
}
