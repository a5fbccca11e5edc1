use std::io::Write;

use tempfile::NamedTempFile;

use super::*;
use crate::model::Variant;

const PLACEHOLDER: &str = "https://picsum.photos/seed/advent{day}/400/400";

fn row(n: usize) -> ContentRow {
    ContentRow {
        credited_to: format!("artist {n}"),
        light_url: format!("light-{n}.mp3"),
        heavy_url: format!("heavy-{n}.mp3"),
        light_cover: format!("light-{n}.jpg"),
        heavy_cover: format!("heavy-{n}.jpg"),
        ..ContentRow::default()
    }
}

#[test]
fn load_rows_reads_sheet_columns_and_ignores_extras() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{
            "Timestamp": "2025-11-02 10:00",
            "Credited to": "Someone",
            "Light track URL": "a.mp3",
            "Light track Description": "soft",
            "Light track buy link": "https://buy/a",
            "Heavy track URL": "b.mp3",
            "Heavy Track cover image": "b.jpg",
            "Heavy track title": "Loud"
        }}]"#
    )
    .unwrap();

    let rows = load_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 1);
    let r = &rows[0];
    assert_eq!(r.credited_to, "Someone");
    assert_eq!(r.light_url, "a.mp3");
    assert_eq!(r.light_buy_link, "https://buy/a");
    assert_eq!(r.light_cover, "");
    assert_eq!(r.heavy_title.as_deref(), Some("Loud"));
    assert_eq!(r.profile_link, None);
}

#[test]
fn load_rows_reports_missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_rows(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ContentError::Read { .. }));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();
    assert!(matches!(
        load_rows(file.path()).unwrap_err(),
        ContentError::Parse(_)
    ));
}

#[test]
fn rows_are_reused_cyclically() {
    let rows: Vec<_> = (0..3).map(row).collect();
    let tracks = build_tracks(&rows, PLACEHOLDER).unwrap();
    assert_eq!(tracks.len(), 25);
    for t in tracks.iter() {
        let n = t.day_index % 3;
        assert_eq!(t.light.media_url, format!("light-{n}.mp3"));
        assert_eq!(t.heavy.credited_to, format!("artist {n}"));
        assert!(!t.disabled);
    }
}

#[test]
fn extra_rows_beyond_25_are_ignored() {
    let rows: Vec<_> = (0..30).map(row).collect();
    let tracks = build_tracks(&rows, PLACEHOLDER).unwrap();
    assert_eq!(tracks.get(24).unwrap().light.media_url, "light-24.mp3");
}

#[test]
fn empty_rows_are_an_error() {
    assert!(matches!(
        build_tracks(&[], PLACEHOLDER).unwrap_err(),
        ContentError::NoRows
    ));
}

#[test]
fn missing_or_drive_covers_use_the_placeholder() {
    let mut r = row(0);
    r.light_cover = "  ".into();
    r.heavy_cover = "https://drive.google.com/open?id=abc".into();
    let tracks = build_tracks(&[r], PLACEHOLDER).unwrap();

    let day5 = tracks.get(4).unwrap();
    assert_eq!(
        day5.content(Variant::Light).cover_image,
        "https://picsum.photos/seed/advent5/400/400"
    );
    assert_eq!(
        day5.content(Variant::Heavy).cover_image,
        "https://picsum.photos/seed/advent5/400/400"
    );
}

#[test]
fn day_without_media_is_disabled() {
    let mut empty = row(1);
    empty.light_url.clear();
    empty.heavy_url = "   ".into();
    let mut heavy_only = row(2);
    heavy_only.light_url.clear();

    let tracks = build_tracks(&[row(0), empty, heavy_only], PLACEHOLDER).unwrap();
    assert!(!tracks.is_enabled(1));
    assert!(tracks.get(1).unwrap().disabled);
    assert!(tracks.is_enabled(2));
    assert!(!tracks.get(2).unwrap().light.has_media());
}

#[test]
fn optional_fields_are_trimmed_to_none() {
    let mut r = row(0);
    r.light_buy_link = " ".into();
    r.heavy_buy_link = "https://buy/heavy".into();
    r.light_artist = Some("A".into());
    r.light_title = Some("".into());
    r.profile_link = Some("https://profile".into());

    let tracks = build_tracks(&[r], PLACEHOLDER).unwrap();
    let t = tracks.get(0).unwrap();
    assert_eq!(t.light.buy_link, None);
    assert_eq!(t.heavy.buy_link.as_deref(), Some("https://buy/heavy"));
    assert_eq!(t.light.track_name, None);
    assert_eq!(t.light.display_title(), "A");
    assert_eq!(t.profile_link.as_deref(), Some("https://profile"));
}
