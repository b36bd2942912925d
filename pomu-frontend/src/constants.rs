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
use std::sync::LazyLock;

use reqwest::Client;

pub static REQWEST_CLIENT: LazyLock<Client> = LazyLock::new(Client::new);

// Polling

pub const VISIBLE_POLL_INTERVAL_MS: u32 = 10_000;
pub const HIDDEN_POLL_INTERVAL_MS: u32 = 30_000;
pub const ERROR_NOTIFICATION_TIMEOUT_MS: u32 = 5_000;
/// The server refuses to return more history entries per page
pub const MAX_HISTORY_LIMIT: u32 = 100;

// Endpoints

pub const USER_ENDPOINT: &[&str]    = &["api", "user"];
pub const QUEUE_ENDPOINT: &[&str]   = &["api", "queue"];
pub const HISTORY_ENDPOINT: &[&str] = &["api", "history"];

// Local storage

pub const SETTINGS_STORAGE_KEY: &str = "settings";
