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

use cloneable_errors::ErrorContext;
use futures::future::{abortable, AbortHandle, FutureExt, LocalBoxFuture};
use log::{debug, warn};

use crate::notifications::{Notification, NotificationStore};
use crate::platform::Platform;
use crate::requests::describe_error;
use crate::settings::PollIntervals;
use crate::store::Store;

pub type FetchFn<T> = Box<dyn Fn() -> LocalBoxFuture<'static, Result<T, ErrorContext>>>;

/// A background loop refreshing a [`Store`] from the API
pub struct Poller<T> {
    /// Used in logs and as the failure notification title
    pub name: &'static str,
    pub failure_title: &'static str,
    pub store: Store<T>,
    pub fetch: FetchFn<T>,
    pub intervals: PollIntervals,
    pub error_timeout: Duration,
}

impl<T: 'static> Poller<T> {
    /// Starts polling immediately
    ///
    /// Attempts never overlap: the next one is scheduled once the previous one finished,
    /// whatever its outcome.
    pub fn spawn(self, platform: Rc<dyn Platform>, notifications: NotificationStore) -> PollerHandle {
        let (task, abort) = abortable(self.run(platform.clone(), notifications));
        platform.spawn_local(task.map(|_| ()).boxed_local());
        PollerHandle { abort }
    }

    async fn run(self, platform: Rc<dyn Platform>, notifications: NotificationStore) {
        loop {
            match (self.fetch)().await {
                Ok(value) => self.store.set(value),
                Err(err) => {
                    let description = describe_error(&err);
                    warn!("Polling the {} failed: {description}", self.name);
                    notifications.show(Notification::error(self.failure_title, description, self.error_timeout));
                },
            }

            let hidden = platform.document_hidden();
            let delay = self.intervals.next_delay(hidden);
            debug!(
                "Page is {}, next {} update in {} seconds",
                if hidden { "hidden" } else { "visible" },
                self.name,
                delay.as_secs(),
            );
            platform.sleep(delay).await;
        }
    }
}

/// Controls a running [`Poller`]
///
/// Automatically stopped when this object is dropped
#[must_use = "dropping a PollerHandle stops the poller"]
pub struct PollerHandle {
    abort: AbortHandle,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.abort.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
