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

use log::debug;
use strum::{EnumIter, IntoStaticStr};

use crate::store::Store;

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, IntoStaticStr, EnumIter)]
pub enum Page {
    #[default]
    Video,
    Queue,
    History,
}

impl Page {
    /// `/queue` is the queue, `/history` and `/archive/...` are the history,
    /// anything else lands on the video page
    pub fn from_path(path: &str) -> Page {
        if path.starts_with("/archive/") {
            return Page::History;
        }
        match path {
            "/queue" => Page::Queue,
            "/history" => Page::History,
            _ => Page::Video,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Video => "/",
            Page::Queue => "/queue",
            Page::History => "/history",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Video => "pomu",
            Page::Queue => "Queue - pomu",
            Page::History => "History - pomu",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct NavigationStore {
    current: Store<Page>,
}

impl NavigationStore {
    pub fn new(path: &str) -> NavigationStore {
        NavigationStore {
            current: Store::new(Page::from_path(path)),
        }
    }

    pub fn store(&self) -> &Store<Page> {
        &self.current
    }

    pub fn current(&self) -> Page {
        *self.current.get()
    }

    pub fn navigate(&self, page: Page) {
        if self.current() == page {
            return;
        }
        debug!("Navigating to {}", <&'static str>::from(page));
        self.current.set(page);
    }
}
