use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{DAY_COUNT, Variant};

use super::transport::KeyValueStore;

/// Storage key holding the unlocked sets.
pub const UNLOCK_KEY: &str = "advent-revealed";

/// Unlocked day indices per variant.
///
/// Serializes as `{"light": [..], "heavy": [..]}` with ascending indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnlockState {
    pub light: BTreeSet<usize>,
    pub heavy: BTreeSet<usize>,
}

impl UnlockState {
    pub fn unlocked(&self, variant: Variant) -> &BTreeSet<usize> {
        match variant {
            Variant::Light => &self.light,
            Variant::Heavy => &self.heavy,
        }
    }

    fn unlocked_mut(&mut self, variant: Variant) -> &mut BTreeSet<usize> {
        match variant {
            Variant::Light => &mut self.light,
            Variant::Heavy => &mut self.heavy,
        }
    }

    pub fn contains(&self, variant: Variant, day: usize) -> bool {
        self.unlocked(variant).contains(&day)
    }

    /// Returns true when `day` was not unlocked before.
    pub fn insert(&mut self, variant: Variant, day: usize) -> bool {
        self.unlocked_mut(variant).insert(day)
    }

    /// Returns true when anything was removed.
    pub fn clear(&mut self, variant: Variant) -> bool {
        let set = self.unlocked_mut(variant);
        let had_any = !set.is_empty();
        set.clear();
        had_any
    }
}

/// Normalize a stored JSON value into an [`UnlockState`].
///
/// - an object reads its `light` / `heavy` keys; a key whose value is not
///   an array of integers in `0..25` reads as empty
/// - a bare array is the pre-variant format and reads as the `light` set
/// - anything else reads as empty
pub fn normalize(value: &Value) -> UnlockState {
    match value {
        Value::Object(map) => UnlockState {
            light: map.get("light").map(parse_indices).unwrap_or_default(),
            heavy: map.get("heavy").map(parse_indices).unwrap_or_default(),
        },
        Value::Array(_) => UnlockState {
            light: parse_indices(value),
            heavy: BTreeSet::new(),
        },
        _ => UnlockState::default(),
    }
}

fn parse_indices(value: &Value) -> BTreeSet<usize> {
    let Some(items) = value.as_array() else {
        return BTreeSet::new();
    };

    items
        .iter()
        .map(|v| {
            v.as_u64()
                .filter(|&d| d < DAY_COUNT as u64)
                .map(|d| d as usize)
        })
        .collect::<Option<BTreeSet<usize>>>()
        .unwrap_or_default()
}

/// Loads and saves the [`UnlockState`] under a single key.
pub struct UnlockStore<S> {
    transport: S,
    key: String,
}

impl<S: KeyValueStore> UnlockStore<S> {
    pub fn new(transport: S) -> Self {
        Self::with_key(transport, UNLOCK_KEY)
    }

    pub fn with_key(transport: S, key: impl Into<String>) -> Self {
        Self {
            transport,
            key: key.into(),
        }
    }

    /// Read the persisted state. Never fails: every problem loads as empty.
    pub fn load(&self) -> UnlockState {
        let raw = match self.transport.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no persisted unlock state");
                return UnlockState::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read unlock state");
                return UnlockState::default();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => normalize(&value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed unlock state, starting empty");
                UnlockState::default()
            }
        }
    }

    /// Persist `state`. Failures are logged and otherwise ignored.
    pub fn save(&mut self, state: &UnlockState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize unlock state");
                return;
            }
        };
        if let Err(e) = self.transport.set(&self.key, &raw) {
            warn!(key = %self.key, error = %e, "failed to persist unlock state");
        }
    }

    pub fn transport(&self) -> &S {
        &self.transport
    }
}
