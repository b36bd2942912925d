/* This file is part of the pomu project
*
*  Copyright (C) 2024-2025 pomu contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::rc::Rc;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::constants::*;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the API lives, defaults to the origin of the page
    pub api_base_url: Option<Rc<str>>,
    pub visible_poll_interval_ms: u32,
    pub hidden_poll_interval_ms: u32,
    pub error_notification_timeout_ms: u32,
    pub history: HistoryQuery,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            visible_poll_interval_ms: VISIBLE_POLL_INTERVAL_MS,
            hidden_poll_interval_ms: HIDDEN_POLL_INTERVAL_MS,
            error_notification_timeout_ms: ERROR_NOTIFICATION_TIMEOUT_MS,
            history: HistoryQuery::default(),
        }
    }
}

impl Settings {
    /// Reads the settings saved in local storage, falling back to the defaults
    pub fn load() -> Settings {
        let saved = window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(SETTINGS_STORAGE_KEY).ok().flatten());
        match saved {
            None => Settings::default(),
            Some(json) => Settings::from_json(&json),
        }
    }

    pub fn from_json(json: &str) -> Settings {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Ignoring invalid saved settings: {err}");
                Settings::default()
            }
        }
    }

    pub fn poll_intervals(&self) -> PollIntervals {
        PollIntervals {
            visible: Duration::from_millis(self.visible_poll_interval_ms.into()),
            hidden: Duration::from_millis(self.hidden_poll_interval_ms.into()),
        }
    }

    pub fn error_notification_timeout(&self) -> Duration {
        Duration::from_millis(self.error_notification_timeout_ms.into())
    }
}

/// Delays between two poll attempts
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PollIntervals {
    pub visible: Duration,
    pub hidden: Duration,
}

impl PollIntervals {
    pub fn next_delay(&self, document_hidden: bool) -> Duration {
        if document_hidden {
            self.hidden
        } else {
            self.visible
        }
    }
}

impl Default for PollIntervals {
    fn default() -> Self {
        Settings::default().poll_intervals()
    }
}

/// Paging parameters of `/api/history`
///
/// Unset fields are left out of the request, letting the server pick its defaults.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub unfinished: bool,
}

impl HistoryQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.min(MAX_HISTORY_LIMIT).to_string()));
        }
        if self.unfinished {
            pairs.push(("unfinished", "true".to_owned()));
        }
        pairs
    }
}
