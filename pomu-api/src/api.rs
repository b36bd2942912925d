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
// NOTE: This file is used as a template for pomu-api::sync and ::unsync modules.
//       The RcStr type will be defined externally with the correct smart pointer variant for the
//       module.

use serde::{Deserialize, Serialize};

/// The signed-in account, as returned by `/api/user`
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct User {
    pub id: RcStr,
    pub name: RcStr,
    pub avatar: RcStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<RcStr>,
}

/// A queued or archived video job
///
/// The server only guarantees the job columns (`id`, `submitters`, `scheduledStart`, `finished`),
/// everything else may be missing.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: RcStr,
    #[serde(default)]
    pub submitters: Vec<RcStr>,
    #[serde(default)]
    pub scheduled_start: Option<RcStr>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub title: Option<RcStr>,
    #[serde(default)]
    pub channel_name: Option<RcStr>,
    #[serde(default)]
    pub channel_id: Option<RcStr>,
    #[serde(default)]
    pub thumbnail: Option<RcStr>,
    #[serde(default)]
    pub download_url: Option<RcStr>,
    #[serde(default)]
    pub file_size_bytes: Option<RcStr>,
    #[serde(default)]
    pub length: Option<RcStr>,
}

impl VideoInfo {
    /// `fileSizeBytes` is transported as a string
    pub fn file_size(&self) -> Option<u64> {
        self.file_size_bytes.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub videos: Vec<VideoInfo>,
    pub total_items: u64,
}

/// `/api/history` has been served both as a bare list and wrapped in a [`HistoryResponse`]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum HistoryPayload {
    List(Vec<VideoInfo>),
    Paged(HistoryResponse),
}

impl HistoryPayload {
    pub fn into_videos(self) -> Vec<VideoInfo> {
        match self {
            HistoryPayload::List(videos) | HistoryPayload::Paged(HistoryResponse { videos, .. }) => videos,
        }
    }

    pub fn total_items(&self) -> Option<u64> {
        match self {
            HistoryPayload::List(..) => None,
            HistoryPayload::Paged(page) => Some(page.total_items),
        }
    }
}

/// Metadata of a video that has been entered but not submitted yet
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoInputInfo {
    pub title: RcStr,
    pub thumbnail_url: RcStr,
    pub uploader: RcStr,
}
