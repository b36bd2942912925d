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

use cloneable_errors::{ErrorContext, ResContext};
use futures::future::{FutureExt, LocalBoxFuture};
use pomu_api::unsync::{HistoryPayload, User, VideoInfo};
use reqwest::{Client, Url};

use crate::constants::{HISTORY_ENDPOINT, QUEUE_ENDPOINT, REQWEST_CLIENT, USER_ENDPOINT};
use crate::requests::api_request;
use crate::settings::HistoryQuery;

pub type ApiFuture<T> = LocalBoxFuture<'static, Result<T, ErrorContext>>;

/// The REST API the stores are fed from
pub trait Backend {
    fn user(&self) -> ApiFuture<User>;
    fn queue(&self) -> ApiFuture<Vec<VideoInfo>>;
    fn history(&self, query: &HistoryQuery) -> ApiFuture<Vec<VideoInfo>>;
}

pub trait ReqwestUrlExt {
    #[allow(clippy::result_unit_err)]
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>;
    #[allow(clippy::result_unit_err)]
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>,
    Self: Sized;
}

impl ReqwestUrlExt for Url {
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        {
            let mut path = self.path_segments_mut()?;
            // a base URL ending in a slash should not produce an empty segment
            path.pop_if_empty().extend(segments);
        }
        Ok(self)
    }
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.clone();
        url.extend_segments(segments)?;
        Ok(url)
    }
}

/// [`Backend`] talking to the real server over HTTP
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url) -> HttpBackend {
        HttpBackend {
            client: REQWEST_CLIENT.clone(),
            base,
        }
    }

    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ErrorContext> {
        self.base
            .join_segments(segments)
            .ok()
            .with_context(|| format!("The API base URL '{}' cannot have a path", self.base))
    }

    pub fn history_url(&self, query: &HistoryQuery) -> Result<Url, ErrorContext> {
        let mut url = self.endpoint_url(HISTORY_ENDPOINT)?;
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn get<R>(&self, url: Result<Url, ErrorContext>) -> ApiFuture<R>
    where R: serde::de::DeserializeOwned + 'static,
    {
        let client = self.client.clone();
        async move { api_request(&client, url?).await }.boxed_local()
    }
}

impl Backend for HttpBackend {
    fn user(&self) -> ApiFuture<User> {
        self.get(self.endpoint_url(USER_ENDPOINT))
    }

    fn queue(&self) -> ApiFuture<Vec<VideoInfo>> {
        self.get(self.endpoint_url(QUEUE_ENDPOINT))
    }

    fn history(&self, query: &HistoryQuery) -> ApiFuture<Vec<VideoInfo>> {
        self.get::<HistoryPayload>(self.history_url(query))
            .map(|res| res.map(HistoryPayload::into_videos))
            .boxed_local()
    }
}
