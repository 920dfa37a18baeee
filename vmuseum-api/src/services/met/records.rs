//! Met collection API records and the normalized shapes served to callers

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// `GET /search` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Upstream sends `null` when nothing matches
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<u64>>,
}

impl SearchResponse {
    pub fn into_ids(self) -> Vec<u64> {
        self.object_ids.unwrap_or_default()
    }
}

/// `GET /objects/{id}` response (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(rename = "objectID")]
    pub object_id: u64,
    pub title: Option<String>,
    pub artist_display_name: Option<String>,
    pub artist_alpha_sort: Option<String>,
    pub object_date: Option<String>,
    pub object_begin_date: Option<i64>,
    pub primary_image: Option<String>,
    pub primary_image_small: Option<String>,
    pub culture: Option<String>,
    pub classification: Option<String>,
    pub period: Option<String>,
    pub department: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
}

/// Which image variant to try first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePreference {
    /// `primaryImageSmall`, then `primaryImage`
    Small,
    /// `primaryImage`, then `primaryImageSmall`
    Primary,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ObjectRecord {
    /// Structured artist name, falling back to the alphabetized sort name
    pub fn artist_name(&self) -> Option<&str> {
        present(&self.artist_display_name).or_else(|| present(&self.artist_alpha_sort))
    }

    pub fn image_url(&self, preference: ImagePreference) -> Option<&str> {
        let small = present(&self.primary_image_small);
        let primary = present(&self.primary_image);
        match preference {
            ImagePreference::Small => small.or(primary),
            ImagePreference::Primary => primary.or(small),
        }
    }

    fn begin_year(&self) -> Option<String> {
        // 0 means "unknown" upstream
        self.object_begin_date
            .filter(|year| *year != 0)
            .map(|year| year.to_string())
    }

    fn date_display(&self) -> String {
        present(&self.object_date)
            .map(str::to_string)
            .or_else(|| self.begin_year())
            .unwrap_or_else(|| "Unknown date".to_string())
    }
}

/// One upstream work, normalized
///
/// Only constructed through [`WorkDetail::from_record`], which refuses records
/// without an image, so `image_url` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetail {
    pub id: u64,
    pub title: String,
    pub artist_name: String,
    pub date_display: String,
    pub image_url: String,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub department: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
}

impl WorkDetail {
    /// Normalize an object record; `None` when it has no usable image
    pub fn from_record(record: &ObjectRecord, preference: ImagePreference) -> Option<Self> {
        let image_url = record.image_url(preference)?.to_string();

        Some(Self {
            id: record.object_id,
            title: present(&record.title).unwrap_or("Untitled").to_string(),
            artist_name: record.artist_name().unwrap_or("Unknown artist").to_string(),
            date_display: record.date_display(),
            image_url,
            culture: present(&record.culture)
                .or_else(|| present(&record.classification))
                .map(str::to_string),
            period: present(&record.period)
                .map(str::to_string)
                .or_else(|| record.begin_year())
                .or_else(|| present(&record.object_date).map(str::to_string)),
            department: present(&record.department).map(str::to_string),
            medium: present(&record.medium).map(str::to_string),
            dimensions: present(&record.dimensions).map(str::to_string),
        })
    }
}

/// Artist offered to the public gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistEntry {
    /// Opaque token; [`decode_artist_id`] returns `display_name`
    pub id: String,
    pub display_name: String,
}

impl ArtistEntry {
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: encode_artist_id(&display_name),
            display_name,
        }
    }
}

/// Encode a display name as a path-safe token (base64url, unpadded)
pub fn encode_artist_id(display_name: &str) -> String {
    URL_SAFE_NO_PAD.encode(display_name.as_bytes())
}

/// Decode an artist token back to its display name
///
/// Accepts the URL-safe alphabet with or without padding, and the standard
/// alphabet. Returns `None` for anything that is not base64 of non-empty UTF-8.
pub fn decode_artist_id(id: &str) -> Option<String> {
    let id = id.trim();
    let unpadded = id.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(unpadded)
        .or_else(|_| STANDARD.decode(id))
        .or_else(|_| STANDARD_NO_PAD.decode(unpadded))
        .ok()?;

    String::from_utf8(bytes).ok().filter(|name| !name.is_empty())
}
