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

#[cfg(feature = "sync")]
pub mod sync {
    pub type RcStr = std::sync::Arc<str>;
    include!("api.rs");
}

#[cfg(feature = "unsync")]
pub mod unsync {
    pub type RcStr = std::rc::Rc<str>;
    include!("api.rs");
}

#[cfg(all(test, feature = "sync"))]
mod tests {
    use super::sync::*;

    #[test]
    fn user_provider_is_optional() {
        let user: User = serde_json::from_str(r#"{"id":"1","name":"Pomu","avatar":"https://example.com/a.png"}"#).unwrap();
        assert_eq!(&*user.name, "Pomu");
        assert_eq!(user.provider, None);

        let user: User = serde_json::from_str(r#"{"id":"1","name":"Pomu","avatar":"","provider":"google"}"#).unwrap();
        assert_eq!(user.provider.as_deref(), Some("google"));
    }

    #[test]
    fn video_info_accepts_job_only_records() {
        // what the server actually sends for rows without stored metadata
        let video: VideoInfo = serde_json::from_str(
            r#"{"id":"dQw4w9WgXcQ","submitters":["a","b"],"scheduledStart":"2024-01-01T12:00:00Z","finished":false}"#,
        ).unwrap();
        assert_eq!(&*video.id, "dQw4w9WgXcQ");
        assert_eq!(video.submitters.len(), 2);
        assert_eq!(video.scheduled_start.as_deref(), Some("2024-01-01T12:00:00Z"));
        assert!(!video.finished);
        assert_eq!(video.title, None);
        assert_eq!(video.file_size(), None);
    }

    #[test]
    fn video_info_reads_camel_case_metadata() {
        let video: VideoInfo = serde_json::from_str(
            r#"{"id":"x","channelName":"Pomu Rainpuff","channelId":"UC123","downloadUrl":"https://cdn/x.mp4","fileSizeBytes":"1500000000","length":"3600"}"#,
        ).unwrap();
        assert_eq!(video.channel_name.as_deref(), Some("Pomu Rainpuff"));
        assert_eq!(video.channel_id.as_deref(), Some("UC123"));
        assert_eq!(video.download_url.as_deref(), Some("https://cdn/x.mp4"));
        assert_eq!(video.file_size(), Some(1_500_000_000));
        assert!(video.submitters.is_empty());
    }

    #[test]
    fn history_payload_accepts_both_shapes() {
        let list: HistoryPayload = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(list.total_items(), None);
        assert_eq!(list.into_videos().len(), 2);

        let paged: HistoryPayload = serde_json::from_str(r#"{"videos":[{"id":"c"}],"totalItems":41}"#).unwrap();
        assert_eq!(paged.total_items(), Some(41));
        let videos = paged.into_videos();
        assert_eq!(videos.len(), 1);
        assert_eq!(&*videos[0].id, "c");
    }
}
