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

pub mod backend;
pub mod constants;
pub mod contexts;
pub mod hooks;
pub mod logging;
pub mod navigation;
pub mod notifications;
pub mod platform;
pub mod poller;
pub mod requests;
pub mod session;
pub mod settings;
pub mod state;
pub mod store;
pub mod utils;
pub mod video;
