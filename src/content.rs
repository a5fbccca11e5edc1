//! Content resolution: submission rows to an immutable [`TrackList`].
//!
//! Rows come from a JSON export of the submission sheet, keyed by the
//! sheet's column headers. Columns not listed on [`ContentRow`] (such as
//! `Timestamp`) are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ContentError;
use crate::model::{DAY_COUNT, Track, TrackList, VariantContent};

/// One submission row.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentRow {
    #[serde(rename = "Credited to")]
    pub credited_to: String,

    #[serde(rename = "Light track URL")]
    pub light_url: String,
    #[serde(rename = "Light track Description")]
    pub light_description: String,
    #[serde(rename = "Light track buy link")]
    pub light_buy_link: String,
    #[serde(rename = "Light Track cover image")]
    pub light_cover: String,
    #[serde(rename = "Light track artist")]
    pub light_artist: Option<String>,
    #[serde(rename = "Light track title")]
    pub light_title: Option<String>,

    #[serde(rename = "Heavy track URL")]
    pub heavy_url: String,
    #[serde(rename = "Heavy track Description")]
    pub heavy_description: String,
    #[serde(rename = "Heavy track buy link")]
    pub heavy_buy_link: String,
    #[serde(rename = "Heavy Track cover image")]
    pub heavy_cover: String,
    #[serde(rename = "Heavy track artist")]
    pub heavy_artist: Option<String>,
    #[serde(rename = "Heavy track title")]
    pub heavy_title: Option<String>,

    #[serde(rename = "Profile link")]
    pub profile_link: Option<String>,
}

/// Read rows from a JSON array of row objects.
pub fn load_rows(path: &Path) -> Result<Vec<ContentRow>, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<ContentRow> = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), rows = rows.len(), "content rows loaded");
    Ok(rows)
}

/// Build the calendar from `rows`, one track per day.
///
/// Rows are reused cyclically when there are fewer than 25. A day whose row
/// has no media in either variant becomes a disabled placeholder. Missing
/// cover images resolve to `placeholder_cover` with `{day}` replaced by the
/// 1-based day number.
pub fn build_tracks(rows: &[ContentRow], placeholder_cover: &str) -> Result<TrackList, ContentError> {
    if rows.is_empty() {
        return Err(ContentError::NoRows);
    }

    let tracks = (0..DAY_COUNT)
        .map(|day_index| {
            let row = &rows[day_index % rows.len()];
            let day = day_index + 1;
            let cover = |c: &str| resolve_cover(c, placeholder_cover, day);

            let light = VariantContent {
                media_url: row.light_url.trim().to_string(),
                cover_image: cover(&row.light_cover),
                description: row.light_description.clone(),
                credited_to: row.credited_to.clone(),
                buy_link: non_empty(&row.light_buy_link),
                artist_name: row.light_artist.as_deref().and_then(non_empty),
                track_name: row.light_title.as_deref().and_then(non_empty),
            };
            let heavy = VariantContent {
                media_url: row.heavy_url.trim().to_string(),
                cover_image: cover(&row.heavy_cover),
                description: row.heavy_description.clone(),
                credited_to: row.credited_to.clone(),
                buy_link: non_empty(&row.heavy_buy_link),
                artist_name: row.heavy_artist.as_deref().and_then(non_empty),
                track_name: row.heavy_title.as_deref().and_then(non_empty),
            };

            if !light.has_media() && !heavy.has_media() {
                debug!(day, "no media in either variant, day disabled");
                return Track::placeholder(day_index);
            }

            let mut track = Track::new(day_index, light, heavy);
            track.profile_link = row.profile_link.as_deref().and_then(non_empty);
            track
        })
        .collect();

    let list = TrackList::new(tracks)?;
    info!(
        rows = rows.len(),
        disabled = list.iter().filter(|t| t.disabled).count(),
        "calendar content built"
    );
    Ok(list)
}

/// Shared-drive links are not directly displayable and count as missing.
fn resolve_cover(cover: &str, placeholder: &str, day: usize) -> String {
    let cover = cover.trim();
    if cover.is_empty() || cover.contains("drive.google.com") {
        placeholder.replace("{day}", &day.to_string())
    } else {
        cover.to_string()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests;
