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

use cloneable_errors::{ErrorContext, ResContext};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{info, warn};
use pomu_api::unsync::User;

use crate::backend::Backend;
use crate::platform::Platform;

pub type UserResult = Result<Rc<User>, ErrorContext>;
pub type SharedUser = Shared<LocalBoxFuture<'static, UserResult>>;

/// The signed-in user, requested once per page load
#[derive(Clone)]
pub struct UserSession {
    user: SharedUser,
}

impl PartialEq for UserSession {
    fn eq(&self, other: &Self) -> bool {
        self.user.ptr_eq(&other.user)
    }
}

impl UserSession {
    /// Sends the user request right away
    ///
    /// Errors are not handled here, every consumer of [`UserSession::user`] gets the same result.
    pub fn start(platform: &dyn Platform, backend: &dyn Backend) -> UserSession {
        let request = backend.user();
        let user = async move {
            request.await
                .map(Rc::new)
                .context("Failed to fetch the current user")
        }.boxed_local().shared();

        platform.spawn_local(user.clone().map(|result| match result {
            Ok(user) => info!("Signed in as {}", user.name),
            Err(err) => warn!("No user session: {err:?}"),
        }).boxed_local());

        UserSession { user }
    }

    pub fn user(&self) -> SharedUser {
        self.user.clone()
    }

    /// The result, if the request already finished
    pub fn peek(&self) -> Option<&UserResult> {
        self.user.peek()
    }
}

#[cfg(test)]
mod tests {
    use cloneable_errors::ErrContext;
    use futures::executor::LocalPool;
    use futures::future::join;

    use super::*;
    use crate::backend::testing::FakeBackend;
    use crate::platform::testing::FakePlatform;
    use crate::requests::{describe_error, ApiError};

    fn pomu() -> User {
        User {
            id: "115".into(),
            name: "Pomu".into(),
            avatar: "https://example.com/pomu.png".into(),
            provider: Some("google".into()),
        }
    }

    #[test]
    fn request_is_sent_once_and_shared() {
        let mut pool = LocalPool::new();
        let platform = FakePlatform::new(pool.spawner());
        let backend = FakeBackend::default();
        backend.push_user(Ok(pomu()));

        let session = UserSession::start(&platform, &backend);
        assert_eq!(backend.user_requests.get(), 1);

        let (a, b) = pool.run_until(join(session.user(), session.user()));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(*a, pomu());
        assert_eq!(backend.user_requests.get(), 1);
    }

    #[test]
    fn request_is_driven_without_consumers() {
        let mut pool = LocalPool::new();
        let platform = FakePlatform::new(pool.spawner());
        let backend = FakeBackend::default();
        backend.push_user(Ok(pomu()));

        let session = UserSession::start(&platform, &backend);
        assert!(session.peek().is_none());
        pool.run_until_stalled();
        assert!(matches!(session.peek(), Some(Ok(user)) if &*user.name == "Pomu"));
    }

    #[test]
    fn failure_is_shared_with_every_consumer() {
        let mut pool = LocalPool::new();
        let platform = FakePlatform::new(pool.spawner());
        let backend = FakeBackend::default();
        let unauthorized = ApiError::new(reqwest::StatusCode::UNAUTHORIZED, String::new());
        backend.push_user(Err(unauthorized.context("The request was not successful")));

        let session = UserSession::start(&platform, &backend);
        let err = pool.run_until(session.user()).unwrap_err();
        assert!(describe_error(&err).contains("401 Unauthorized"));
        let again = pool.run_until(session.user()).unwrap_err();
        assert_eq!(describe_error(&again), describe_error(&err));
        assert_eq!(backend.user_requests.get(), 1);
    }
}
