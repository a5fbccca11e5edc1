use super::*;
use crate::model::{DAY_COUNT, Track, TrackList, VariantContent};

fn tracks() -> TrackList {
    let tracks = (0..DAY_COUNT)
        .map(|d| {
            let mut t = Track::new(
                d,
                VariantContent::with_media(format!("light-{d}")),
                VariantContent::with_media(format!("heavy-{d}")),
            );
            t.light.cover_image = format!("light-cover-{d}");
            t.heavy.cover_image = format!("heavy-cover-{d}");
            if d == 6 {
                t.heavy.media_url.clear();
            }
            t
        })
        .collect();
    TrackList::new(tracks).unwrap()
}

#[test]
fn playing_lock_survives_variant_switch_until_paused() {
    let tracks = tracks();
    let mut lock = VariantLock::default();

    lock.sync(Some(3), true, Variant::Light, &tracks);
    assert_eq!(lock.locked().unwrap().url, "light-3");

    // Global variant flips while playing.
    lock.sync(Some(3), true, Variant::Heavy, &tracks);
    assert_eq!(lock.locked().unwrap().url, "light-3");
    assert_eq!(lock.display_variant(Some(3), true, Variant::Heavy), Variant::Light);
    assert_eq!(lock.content(&tracks).unwrap().cover_image, "light-cover-3");

    // Pause: the lock now follows the live variant.
    assert_eq!(lock.display_variant(Some(3), false, Variant::Heavy), Variant::Heavy);
    lock.sync(Some(3), false, Variant::Heavy, &tracks);
    let pinned = lock.locked().unwrap();
    assert_eq!(pinned.variant, Variant::Heavy);
    assert_eq!(pinned.url, "heavy-3");
}

#[test]
fn new_active_day_relocks_to_live_variant_even_while_playing() {
    let tracks = tracks();
    let mut lock = VariantLock::default();
    lock.sync(Some(1), true, Variant::Light, &tracks);
    lock.sync(Some(2), true, Variant::Heavy, &tracks);

    assert_eq!(
        lock.locked(),
        Some(&LockedPlayback {
            day: 2,
            variant: Variant::Heavy,
            url: "heavy-2".into(),
        })
    );
}

#[test]
fn no_active_day_drops_the_lock() {
    let tracks = tracks();
    let mut lock = VariantLock::default();
    lock.sync(Some(1), false, Variant::Light, &tracks);
    lock.sync(None, false, Variant::Light, &tracks);
    assert!(lock.locked().is_none());
    assert!(lock.content(&tracks).is_none());
    assert_eq!(lock.display_variant(None, true, Variant::Heavy), Variant::Heavy);
}

#[test]
fn empty_url_is_still_locked() {
    let tracks = tracks();
    let mut lock = VariantLock::default();
    lock.sync(Some(6), true, Variant::Heavy, &tracks);
    let pinned = lock.locked().unwrap();
    assert_eq!(pinned.day, 6);
    assert_eq!(pinned.url, "");
}

#[test]
fn display_variant_is_live_for_other_days() {
    let tracks = tracks();
    let mut lock = VariantLock::default();
    lock.sync(Some(4), true, Variant::Light, &tracks);
    assert_eq!(lock.display_variant(Some(5), true, Variant::Heavy), Variant::Heavy);
}
