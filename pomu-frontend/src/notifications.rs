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

use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::platform::Platform;
use crate::store::Store;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NotificationId(u64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Notification {
    pub title: Rc<str>,
    pub description: Rc<str>,
    pub kind: NotificationKind,
    /// Removed automatically after this long
    pub timeout: Option<Duration>,
}

impl Notification {
    pub fn error(title: impl Into<Rc<str>>, description: impl Into<Rc<str>>, timeout: Duration) -> Notification {
        Notification {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Error,
            timeout: Some(timeout),
        }
    }
}

/// Displayed notifications, in the order they were shown
pub type NotificationMap = IndexMap<NotificationId, Notification>;

/// Transient messages for the user
#[derive(Clone)]
pub struct NotificationStore {
    notifications: Store<NotificationMap>,
    next_id: Rc<Cell<u64>>,
    platform: Rc<dyn Platform>,
}

impl PartialEq for NotificationStore {
    fn eq(&self, other: &Self) -> bool {
        self.notifications == other.notifications
    }
}

impl NotificationStore {
    pub fn new(platform: Rc<dyn Platform>) -> NotificationStore {
        NotificationStore {
            notifications: Store::default(),
            next_id: Rc::new(Cell::new(0)),
            platform,
        }
    }

    pub fn store(&self) -> &Store<NotificationMap> {
        &self.notifications
    }

    pub fn show(&self, notification: Notification) -> NotificationId {
        let id = NotificationId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let timeout = notification.timeout;
        self.notifications.update(|map| {
            map.insert(id, notification);
        });

        if let Some(timeout) = timeout {
            let this = self.clone();
            let expiry = self.platform.sleep(timeout);
            self.platform.spawn_local(async move {
                expiry.await;
                this.clear(id);
            }.boxed_local());
        }
        id
    }

    /// Removes a notification, ignoring ids that are already gone
    pub fn clear(&self, id: NotificationId) {
        if !self.notifications.get().contains_key(&id) {
            return;
        }
        debug!("Clearing notification {id}");
        self.notifications.update(|map| {
            map.shift_remove(&id);
        });
    }

    pub fn clear_all(&self) {
        if !self.notifications.get().is_empty() {
            self.notifications.set(NotificationMap::new());
        }
    }
}
