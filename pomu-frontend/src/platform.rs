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

use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use web_sys::window;

/// The parts of the browser environment the state layer depends on
pub trait Platform {
    /// Runs a task on the local event loop
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
    /// Resolves once `duration` has elapsed
    ///
    /// The returned future does not borrow self
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
    /// Whether the page is currently in a background tab
    fn document_hidden(&self) -> bool;
}

/// [`Platform`] backed by yew's scheduler and the current `window`
pub struct WebPlatform;

impl Platform for WebPlatform {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        yew::platform::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        yew::platform::time::sleep(duration).boxed_local()
    }

    fn document_hidden(&self) -> bool {
        window()
            .and_then(|w| w.document())
            .is_some_and(|d| d.hidden())
    }
}

/// The URL path of the current page, if running in a window
pub fn current_path() -> Option<String> {
    window().and_then(|w| w.location().pathname().ok())
}

/// The origin of the current page, if running in a window
pub fn current_origin() -> Option<String> {
    window().and_then(|w| w.location().origin().ok())
}
