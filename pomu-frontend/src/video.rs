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

use futures::FutureExt;
use indexmap::IndexMap;
use pomu_api::unsync::{RcStr, VideoInfo, VideoInputInfo};

use crate::backend::Backend;
use crate::notifications::NotificationStore;
use crate::platform::Platform;
use crate::poller::{Poller, PollerHandle};
use crate::settings::Settings;
use crate::store::Store;

/// Videos keyed by id, in the order the server listed them
pub type VideoMap = IndexMap<RcStr, VideoInfo>;

pub fn index_videos(videos: Vec<VideoInfo>) -> VideoMap {
    videos.into_iter().map(|video| (video.id.clone(), video)).collect()
}

/// Queue and history of the server, plus the video being entered
pub struct VideoStores {
    pub queue: Store<VideoMap>,
    pub history: Store<VideoMap>,
    pub input: Store<Option<VideoInputInfo>>,
    queue_poller: PollerHandle,
    history_poller: PollerHandle,
}

impl VideoStores {
    pub fn start(
        platform: &Rc<dyn Platform>,
        backend: &Rc<dyn Backend>,
        notifications: &NotificationStore,
        settings: &Settings,
    ) -> VideoStores {
        let queue = Store::default();
        let history = Store::default();

        let queue_poller = {
            let backend = backend.clone();
            Poller {
                name: "queue",
                failure_title: "Failed to get queue",
                store: queue.clone(),
                fetch: Box::new(move || backend.queue().map(|res| res.map(index_videos)).boxed_local()),
                intervals: settings.poll_intervals(),
                error_timeout: settings.error_notification_timeout(),
            }.spawn(platform.clone(), notifications.clone())
        };

        let history_poller = {
            let backend = backend.clone();
            let query = settings.history.clone();
            Poller {
                name: "history",
                failure_title: "Failed to get history",
                store: history.clone(),
                fetch: Box::new(move || backend.history(&query).map(|res| res.map(index_videos)).boxed_local()),
                intervals: settings.poll_intervals(),
                error_timeout: settings.error_notification_timeout(),
            }.spawn(platform.clone(), notifications.clone())
        };

        VideoStores {
            queue,
            history,
            input: Store::new(None),
            queue_poller,
            history_poller,
        }
    }

    /// Stages the metadata of the video about to be submitted
    ///
    /// Filled by the submission form, which lives outside this crate. The video page only shows
    /// and discards what was staged.
    pub fn set_input(&self, info: Option<VideoInputInfo>) {
        self.input.set(info);
    }

    pub fn stop(&self) {
        self.queue_poller.stop();
        self.history_poller.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.queue_poller.is_stopped() && self.history_poller.is_stopped()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cloneable_errors::{ErrContext, ErrorContext};
    use futures::executor::LocalPool;
    use reqwest::StatusCode;

    use super::*;
    use crate::backend::testing::{videos, FakeBackend};
    use crate::notifications::NotificationKind;
    use crate::platform::testing::FakePlatform;
    use crate::requests::ApiError;

    struct Harness {
        pool: LocalPool,
        platform: Rc<FakePlatform>,
        backend: Rc<FakeBackend>,
        notifications: NotificationStore,
    }

    impl Harness {
        fn new() -> Harness {
            let pool = LocalPool::new();
            let platform = Rc::new(FakePlatform::new(pool.spawner()));
            Harness {
                notifications: NotificationStore::new(platform.clone()),
                backend: Rc::default(),
                platform,
                pool,
            }
        }

        fn start(&self, settings: &Settings) -> VideoStores {
            let platform: Rc<dyn Platform> = self.platform.clone();
            let backend: Rc<dyn Backend> = self.backend.clone();
            VideoStores::start(&platform, &backend, &self.notifications, settings)
        }
    }

    fn keys(store: &Store<VideoMap>) -> Vec<String> {
        store.get().keys().map(ToString::to_string).collect()
    }

    #[test]
    fn queue_is_replaced_on_every_poll() {
        let mut h = Harness::new();
        h.backend.push_queue(Ok(videos(&["a", "b"])));
        h.backend.push_queue(Ok(videos(&["c"])));
        let stores = h.start(&Settings::default());

        h.pool.run_until_stalled();
        assert_eq!(keys(&stores.queue), ["a", "b"]);

        // both pollers wait 10 seconds, fire them both
        h.platform.fire_next();
        h.platform.fire_next();
        h.pool.run_until_stalled();
        assert_eq!(keys(&stores.queue), ["c"]);
        assert_eq!(h.backend.queue_requests.get(), 2);
    }

    #[test]
    fn map_keys_match_record_ids() {
        let mut h = Harness::new();
        h.backend.push_history(Ok(videos(&["x", "y", "z"])));
        let stores = h.start(&Settings::default());
        h.pool.run_until_stalled();
        let history = stores.history.get();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|(id, video)| *id == video.id));
        assert!(stores.queue.get().is_empty());
    }

    #[test]
    fn failed_history_poll_keeps_stale_data() {
        let mut h = Harness::new();
        h.backend.push_history(Ok(videos(&["old"])));
        let error = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "cannot start transaction".into())
            .context("The request was not successful");
        h.backend.push_history(Err(error));
        let stores = h.start(&Settings::default());
        h.pool.run_until_stalled();
        let before = stores.history.get();

        h.platform.fire_next();
        h.platform.fire_next();
        h.pool.run_until_stalled();

        assert!(Rc::ptr_eq(&before, &stores.history.get()));
        let notifications = h.notifications.store().get();
        assert_eq!(notifications.len(), 1);
        let notification = notifications.values().next().unwrap();
        assert_eq!(&*notification.title, "Failed to get history");
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.timeout, Some(Duration::from_millis(5000)));
        assert!(notification.description.contains("cannot start transaction"));
    }

    #[test]
    fn both_pollers_fail_independently() {
        let mut h = Harness::new();
        h.backend.push_queue(Err(ErrorContext::new("offline")));
        h.backend.push_history(Err(ErrorContext::new("offline")));
        let _stores = h.start(&Settings::default());
        h.pool.run_until_stalled();
        let titles: Vec<String> = h.notifications.store().get().values().map(|n| n.title.to_string()).collect();
        assert_eq!(titles, ["Failed to get queue", "Failed to get history"]);
    }

    #[test]
    fn history_query_comes_from_settings() {
        let mut h = Harness::new();
        let mut settings = Settings::default();
        settings.history.limit = Some(10);
        settings.history.unfinished = true;
        let _stores = h.start(&settings);
        h.pool.run_until_stalled();
        assert_eq!(*h.backend.last_history_query.borrow(), Some(settings.history.clone()));
    }

    #[test]
    fn configured_intervals_are_used() {
        let mut h = Harness::new();
        let settings = Settings {
            visible_poll_interval_ms: 2_000,
            hidden_poll_interval_ms: 60_000,
            ..Settings::default()
        };
        let _stores = h.start(&settings);
        h.pool.run_until_stalled();
        assert_eq!(h.platform.pending_delays(), vec![Duration::from_secs(2); 2]);
        h.platform.set_hidden(true);
        h.platform.fire_next();
        h.platform.fire_next();
        h.pool.run_until_stalled();
        assert_eq!(h.platform.pending_delays(), vec![Duration::from_secs(60); 2]);
    }

    #[test]
    fn stop_halts_both_pollers() {
        let mut h = Harness::new();
        let stores = h.start(&Settings::default());
        h.pool.run_until_stalled();
        stores.stop();
        assert!(stores.is_stopped());
        h.platform.fire_next();
        h.platform.fire_next();
        h.pool.run_until_stalled();
        assert_eq!(h.backend.queue_requests.get(), 1);
        assert_eq!(h.backend.history_requests.get(), 1);
    }

    #[test]
    fn staged_input_can_be_discarded() {
        let h = Harness::new();
        let stores = h.start(&Settings::default());
        assert_eq!(*stores.input.get(), None);
        stores.set_input(Some(VideoInputInfo {
            title: "Karaoke".into(),
            thumbnail_url: "https://example.com/t.jpg".into(),
            uploader: "Pomu".into(),
        }));
        assert!(matches!(&*stores.input.get(), Some(info) if &*info.uploader == "Pomu"));

        stores.set_input(None);
        assert_eq!(*stores.input.get(), None);
    }
}
