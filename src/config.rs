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

//! Runtime configuration: JSON file, then environment, then command line.

use crate::error::AppError;
use crate::scroll::{ScrollOptions, ScrollStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Feature flag selecting the scroll implementation.
pub const STRATEGY_ENV: &str = "CHAT_SCROLL_STRATEGY";
const CONFIG_DIR_NAME: &str = "chat-scroll";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PAGINATION_COOLDOWN_MS: u64 = 750;
pub const DEFAULT_ANCHOR_RETRY_FRAMES: u32 = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    pub strategy: ScrollStrategy,
    /// Overrides the strategy's at-bottom threshold, in the host's units.
    pub threshold: Option<f64>,
    pub pagination_cooldown_ms: u64,
    pub anchor_retry_frames: u32,
    pub page_size: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            strategy: ScrollStrategy::default(),
            threshold: None,
            pagination_cooldown_ms: DEFAULT_PAGINATION_COOLDOWN_MS,
            anchor_retry_frames: DEFAULT_ANCHOR_RETRY_FRAMES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
}

impl ScrollConfig {
    /// Load from `explicit` (which must exist), else from the default
    /// location when a file is there, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| AppError::ConfigRead { path: path.display().to_string() })?;
        let config = Self::from_json(&content, path)?;
        tracing::info!(path = %path.display(), strategy = config.strategy.as_str(), "Loaded config");
        Ok(config)
    }

    pub fn from_json(content: &str, path: &Path) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(content).map_err(|e| AppError::ConfigParse {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), AppError> {
        if let Some(threshold) = self.threshold
            && !(threshold.is_finite() && threshold >= 0.0)
        {
            return Err(AppError::ConfigParse {
                path: path.display().to_string(),
                detail: format!("threshold must be a non-negative number, got {threshold}"),
            });
        }
        if self.page_size == 0 {
            return Err(AppError::ConfigParse {
                path: path.display().to_string(),
                detail: "page_size must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Apply the `CHAT_SCROLL_STRATEGY` feature flag, if set.
    #[must_use]
    pub fn with_env(self) -> Self {
        let value = std::env::var(STRATEGY_ENV).ok();
        self.with_env_strategy(value.as_deref())
    }

    /// Feature-flag value from the environment. Unparseable values are
    /// logged and ignored, so a stale flag never stops the program.
    #[must_use]
    pub fn with_env_strategy(mut self, value: Option<&str>) -> Self {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return self;
        };
        match value.parse::<ScrollStrategy>() {
            Ok(strategy) => self.strategy = strategy,
            Err(err) => tracing::warn!("Ignoring {STRATEGY_ENV}: {err}"),
        }
        self
    }

    /// Strategy chosen on the command line, already validated by clap.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Option<ScrollStrategy>) -> Self {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        self
    }

    #[must_use]
    pub fn scroll_options(&self) -> ScrollOptions {
        let mut options = ScrollOptions::for_strategy(self.strategy);
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        options.retry_frames = self.anchor_retry_frames;
        options.pagination_cooldown = Duration::from_millis(self.pagination_cooldown_ms);
        options
    }

    /// Options for a container measured in terminal rows. An explicit
    /// `threshold` is taken as rows too.
    #[must_use]
    pub fn row_scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            threshold: self.threshold.unwrap_or_else(|| self.strategy.row_threshold()),
            ..self.scroll_options()
        }
    }
}
