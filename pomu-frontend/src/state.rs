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

use log::info;

use crate::backend::Backend;
use crate::navigation::NavigationStore;
use crate::notifications::NotificationStore;
use crate::platform::Platform;
use crate::session::UserSession;
use crate::settings::Settings;
use crate::video::VideoStores;

/// Everything the UI reads from, created once when the app starts
pub struct AppState {
    pub session: UserSession,
    pub navigation: NavigationStore,
    pub notifications: NotificationStore,
    pub videos: VideoStores,
}

impl AppState {
    /// Requests the user and starts both pollers
    pub fn start(platform: Rc<dyn Platform>, backend: Rc<dyn Backend>, settings: &Settings, path: &str) -> AppState {
        let navigation = NavigationStore::new(path);
        info!("Starting on the {} page", <&'static str>::from(navigation.current()));

        let notifications = NotificationStore::new(platform.clone());
        let session = UserSession::start(&*platform, &*backend);
        let videos = VideoStores::start(&platform, &backend, &notifications, settings);

        AppState {
            session,
            navigation,
            notifications,
            videos,
        }
    }

    /// Stops background polling, for when the page is being left
    pub fn shutdown(&self) {
        if self.videos.is_stopped() {
            return;
        }
        info!("Stopping background updates");
        self.videos.stop();
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::LocalPool;

    use super::*;
    use crate::backend::testing::{videos, FakeBackend};
    use crate::navigation::Page;
    use crate::platform::testing::FakePlatform;

    #[test]
    fn start_wires_everything_up() {
        let mut pool = LocalPool::new();
        let platform = Rc::new(FakePlatform::new(pool.spawner()));
        let backend = Rc::new(FakeBackend::default());
        backend.push_queue(Ok(videos(&["q1"])));
        backend.push_history(Ok(videos(&["h1", "h2"])));

        let state = AppState::start(platform.clone(), backend.clone(), &Settings::default(), "/archive/h1");
        assert_eq!(state.navigation.current(), Page::History);
        assert_eq!(backend.user_requests.get(), 1);

        pool.run_until_stalled();
        assert_eq!(state.videos.queue.get().len(), 1);
        assert_eq!(state.videos.history.get().len(), 2);
        // no scripted user, the session holds the error
        assert!(matches!(state.session.peek(), Some(Err(..))));
        // a failed session is not reported as a notification
        assert!(state.notifications.store().get().is_empty());
    }

    #[test]
    fn shutdown_stops_polling() {
        let mut pool = LocalPool::new();
        let platform = Rc::new(FakePlatform::new(pool.spawner()));
        let backend = Rc::new(FakeBackend::default());

        let state = AppState::start(platform.clone(), backend.clone(), &Settings::default(), "/");
        pool.run_until_stalled();
        state.shutdown();
        state.shutdown();
        while platform.fire_next().is_some() {}
        pool.run_until_stalled();
        assert_eq!(backend.queue_requests.get(), 1);
        assert_eq!(backend.history_requests.get(), 1);
    }
}
