//! Property-based tests for the calendar and sequencer invariants.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use advent::calendar::{CalendarClock, CalendarState};
use advent::model::{DAY_COUNT, Track, TrackList, Variant, VariantContent};
use advent::sequencer::{PlaybackSequencer, ScriptedRandom, SeededRandom};
use advent::store::{KeyValueStore, MemoryStore, UNLOCK_KEY, UnlockStore, normalize};

// ===== Helpers =====

fn tracks() -> Arc<TrackList> {
    let tracks = (0..DAY_COUNT)
        .map(|d| {
            Track::new(
                d,
                VariantContent::with_media(format!("light-{d}")),
                VariantContent::with_media(format!("heavy-{d}")),
            )
        })
        .collect();
    Arc::new(TrackList::new(tracks).unwrap())
}

fn calendar(today: i32) -> CalendarState<MemoryStore> {
    CalendarState::new(
        tracks(),
        UnlockStore::new(MemoryStore::default()),
        CalendarClock::fixed(today),
        Variant::Light,
    )
}

fn unlocked_set() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..DAY_COUNT, 1..DAY_COUNT)
}

// ===== Property Tests =====

proptest! {
    /// Property: revealing twice leaves the same state (and stored value) as once
    #[test]
    fn reveal_is_idempotent(today in -1i32..=24, days in prop::collection::vec(0..DAY_COUNT, 0..40)) {
        let mut cal = calendar(today);
        for &d in &days {
            cal.reveal(d);
        }
        let once = cal.unlocked().clone();
        let stored = cal.store_transport().get(UNLOCK_KEY).unwrap();

        for &d in &days {
            prop_assert!(!cal.reveal(d));
        }
        prop_assert_eq!(cal.unlocked(), &once);
        prop_assert_eq!(cal.store_transport().get(UNLOCK_KEY).unwrap(), stored);
    }

    /// Property: without a reset the unlocked set only grows, and only with eligible days
    #[test]
    fn unlocked_set_is_monotonic_and_gated(today in -1i32..=24, days in prop::collection::vec(0..DAY_COUNT, 0..40)) {
        let mut cal = calendar(today);
        let mut before = BTreeSet::new();
        for d in days {
            let changed = cal.reveal(d);
            let after = cal.unlocked().clone();
            prop_assert!(before.is_subset(&after));
            prop_assert_eq!(changed, after.len() == before.len() + 1);
            if (d as i32) > today {
                prop_assert!(!after.contains(&d));
            }
            before = after;
        }
        prop_assert!(cal.unlocked().iter().all(|&d| (d as i32) <= today));
    }

    /// Property: previous undoes next away from the last element, and next undoes
    /// previous away from the first, with shuffle off
    #[test]
    fn previous_and_next_are_inverse_inside_the_sequence(unlocked in unlocked_set(), pick in any::<prop::sample::Index>()) {
        let ordered: Vec<usize> = unlocked.iter().copied().collect();
        let pos = pick.index(ordered.len());
        let start = ordered[pos];

        if pos + 1 < ordered.len() {
            let mut seq = PlaybackSequencer::new(ScriptedRandom::new(vec![]));
            seq.play_or_toggle(start);
            seq.next(&unlocked);
            seq.previous(&unlocked);
            prop_assert_eq!(seq.active(), Some(start));
            prop_assert!(!seq.shuffle_enabled());
        }
        if pos > 0 {
            let mut seq = PlaybackSequencer::new(ScriptedRandom::new(vec![]));
            seq.play_or_toggle(start);
            seq.previous(&unlocked);
            seq.next(&unlocked);
            prop_assert_eq!(seq.active(), Some(start));
        }
    }

    /// Property: next always lands inside the unlocked set and resumes playback;
    /// in shuffle it never repeats the current day when there is a choice
    #[test]
    fn next_stays_in_unlocked_and_shuffle_avoids_repeats(
        unlocked in unlocked_set(),
        start in 0..DAY_COUNT,
        seed in any::<u64>(),
        steps in 1usize..30,
    ) {
        let mut seq = PlaybackSequencer::new(SeededRandom::new(seed));
        seq.play_or_toggle(start);
        seq.pause_resume();
        for _ in 0..steps {
            let current = seq.active();
            let shuffled = seq.shuffle_enabled();
            let target = seq.next(&unlocked).unwrap();
            prop_assert!(unlocked.contains(&target));
            prop_assert!(seq.is_playing());
            if shuffled && unlocked.len() > 1 && current.is_some_and(|c| unlocked.contains(&c)) {
                prop_assert_ne!(Some(target), current);
            }
        }
    }

    /// Property: normalization keeps only in-range integer lists and never panics
    #[test]
    fn normalize_only_keeps_well_formed_lists(
        light in prop::collection::vec(-5i64..40, 0..20),
        heavy in prop::collection::vec(0i64..25, 0..20),
    ) {
        let state = normalize(&json!({ "light": light, "heavy": heavy }));
        let light_ok = light.iter().all(|&d| (0..25).contains(&d));

        if light_ok {
            let expected: BTreeSet<usize> = light.iter().map(|&d| d as usize).collect();
            prop_assert_eq!(&state.light, &expected);
        } else {
            prop_assert!(state.light.is_empty());
        }
        let expected: BTreeSet<usize> = heavy.iter().map(|&d| d as usize).collect();
        prop_assert_eq!(&state.heavy, &expected);
    }
}
