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

use std::error::Error;
use std::fmt::Display;

use cloneable_errors::{ErrorContext, IntoErrorIterator, ResContext};
use reqwest::{Client, StatusCode, Url};

/// A non-2xx answer from the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub status_text: String,
    /// The response body
    pub why: String,
}

impl ApiError {
    pub fn new(status: StatusCode, why: String) -> ApiError {
        ApiError {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            why,
        }
    }

    /// `/api/user` answers 401 when there is no session
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The server returned '{} {}'", self.status, self.status_text)?;
        let why = self.why.trim();
        if !why.is_empty() {
            write!(f, ": {why}")?;
        }
        Ok(())
    }
}

impl Error for ApiError {}

/// The parts of an HTTP response [`ResponseExt::check_status`] and [`read_api_response`] need
pub trait HttpResponse: Sized {
    type Error: Error + Send + Sync + 'static;

    fn status_code(&self) -> StatusCode;
    #[allow(async_fn_in_trait)]  // this is for local use
    async fn read_text(self) -> Result<String, Self::Error>;
}

impl HttpResponse for reqwest::Response {
    type Error = reqwest::Error;

    fn status_code(&self) -> StatusCode {
        self.status()
    }

    async fn read_text(self) -> Result<String, reqwest::Error> {
        self.text().await
    }
}

pub trait ResponseExt: Sized {
    /// Passes successful responses through untouched, turns everything else into an [`ApiError`]
    /// carrying the response body
    #[allow(async_fn_in_trait)]  // this is for local use
    async fn check_status(self) -> Result<Self, ApiError>;
}

impl<R: HttpResponse> ResponseExt for R {
    async fn check_status(self) -> Result<Self, ApiError> {
        let status = self.status_code();
        if status.is_success() {
            return Ok(self);
        }
        let why = self.read_text().await.unwrap_or_default();
        Err(ApiError::new(status, why))
    }
}

pub async fn api_request<R>(client: &Client, url: Url) -> Result<R, ErrorContext>
where
    R: serde::de::DeserializeOwned,
{
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send().await;
    read_api_response(response).await
}

/// Everything after the request went out: status check, body, JSON
pub async fn read_api_response<H, E, R>(response: Result<H, E>) -> Result<R, ErrorContext>
where
    H: HttpResponse,
    E: Error + Send + Sync + 'static,
    R: serde::de::DeserializeOwned,
{
    let body = response.context("Failed to send the request")?
        .check_status().await.context("The request was not successful")?
        .read_text().await.context("Failed to read the response body")?;
    serde_json::from_str(&body).context("Failed to deserialize response")
}

/// Renders the whole context stack of an error on a single line
pub fn describe_error(error: &ErrorContext) -> String {
    error.error_chain().map(ToString::to_string).collect::<Vec<_>>().join(": ")
}

/// The [`ApiError`] somewhere in an error stack, if the failure came from the server
pub fn find_api_error(error: &ErrorContext) -> Option<&ApiError> {
    error.error_chain().find_map(|err| err.downcast_ref::<ApiError>())
}
