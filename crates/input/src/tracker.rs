//! Held-key tracking for terminal environments.
//!
//! Terminals report a press and then, at the OS repeat rate, more presses
//! while a key is held. Most never report the release. The tracker remembers
//! when each intent was last seen and treats it as held until either a release
//! arrives or nothing was seen for `hold_timeout_ms`.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Intent, IntentSet};

// Long enough to bridge the initial OS repeat delay, short enough that a tap
// does not read as a sustained hold.
pub const DEFAULT_HOLD_TIMEOUT_MS: u64 = 150;

/// Set of held intents with per-intent last-seen timestamps.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    last_seen_ms: [Option<u64>; Intent::ALL.len()],
    hold_timeout_ms: u64,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::with_hold_timeout_ms(DEFAULT_HOLD_TIMEOUT_MS)
    }

    pub fn with_hold_timeout_ms(hold_timeout_ms: u64) -> Self {
        Self {
            last_seen_ms: [None; Intent::ALL.len()],
            hold_timeout_ms,
        }
    }

    pub fn hold_timeout_ms(&self) -> u64 {
        self.hold_timeout_ms
    }

    fn slot(intent: Intent) -> usize {
        Intent::ALL
            .iter()
            .position(|i| *i == intent)
            .unwrap_or_default()
    }

    /// Feed one key event. Returns the mapped intent, if any.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> Option<Intent> {
        let intent = map_key(key)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(intent, now_ms),
            KeyEventKind::Release => self.release(intent),
        }
        Some(intent)
    }

    pub fn press(&mut self, intent: Intent, now_ms: u64) {
        self.last_seen_ms[Self::slot(intent)] = Some(now_ms);
    }

    pub fn release(&mut self, intent: Intent) {
        self.last_seen_ms[Self::slot(intent)] = None;
    }

    /// Drop everything, e.g. when the terminal loses focus
    pub fn clear(&mut self) {
        self.last_seen_ms = [None; Intent::ALL.len()];
    }

    /// Intents held at `now_ms`. Expired holds are forgotten.
    pub fn intents(&mut self, now_ms: u64) -> IntentSet {
        let mut set = IntentSet::empty();
        for (intent, seen) in Intent::ALL.into_iter().zip(self.last_seen_ms.iter_mut()) {
            match *seen {
                Some(at) if now_ms.saturating_sub(at) <= self.hold_timeout_ms => set.insert(intent),
                Some(_) => *seen = None,
                None => {}
            }
        }
        set
    }
}
