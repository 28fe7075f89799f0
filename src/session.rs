use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::pattern::{Category, Pattern, PatternField};
use crate::repetition::{RepetitionEntries, RepetitionEntry};

/// Configuration plus per-repetition progress for one counting session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigState {
    pattern: Pattern,
    entries: RepetitionEntries,
}

impl ConfigState {
    /// Start an empty row shaped like `pattern`, each field clamped as [`ConfigState::set`] would.
    pub fn new(pattern: Pattern) -> Self {
        let mut state = Self::default();
        for field in PatternField::ALL {
            state.set(field, pattern.get(field) as i64);
        }
        state
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn entries(&self) -> &RepetitionEntries {
        &self.entries
    }

    /// Apply `value` to `field`, clamped silently to the field's bound.
    ///
    /// Shrinking the rep count drops entries past the new end, and shrinking a
    /// per-rep target pulls stored counts down to the new cap.
    pub fn set(&mut self, field: PatternField, value: i64) -> u32 {
        let previous = self.pattern.get(field);
        let stored = self.pattern.put(field, value);
        debug!(%field, value, stored, "pattern field set");

        if stored < previous {
            match field {
                PatternField::Reps => self.entries.truncate(stored),
                PatternField::Standard | PatternField::Increased | PatternField::Decreased => {
                    self.entries.clamp_to(&self.pattern)
                }
                PatternField::Round => {}
            }
        }
        stored
    }

    pub fn adjust(&mut self, field: PatternField, delta: i64) -> u32 {
        let current = self.pattern.get(field) as i64;
        self.set(field, current.saturating_add(delta))
    }

    /// Start the row over: every entry is discarded and the pattern goes back
    /// to its defaults. The round number is the only value kept.
    pub fn reset_all(&mut self) {
        let round = self.pattern.round;
        self.pattern = Pattern::default().with_round(round);
        self.entries.clear();
        info!(round, "reset all");
    }

    pub fn entry(&self, index: u32) -> RepetitionEntry {
        self.entries.get(index)
    }

    fn check_index(&self, index: u32) -> Result<()> {
        if self.pattern.contains_rep(index) {
            Ok(())
        } else {
            Err(Error::RepetitionOutOfRange {
                index,
                reps: self.pattern.reps_count,
            })
        }
    }

    /// Record `value` stitches of `category` for repetition `index`, clamped to `0..=cap`
    pub fn set_done(&mut self, index: u32, category: Category, value: i64) -> Result<u32> {
        self.check_index(index)?;
        let cap = self.pattern.cap(category);
        let stored = value.clamp(0, cap as i64) as u32;
        *self.entries.entry_mut(index).slot_mut(category) = stored;
        debug!(index, %category, value, stored, "repetition count set");
        Ok(stored)
    }

    pub fn adjust_done(&mut self, index: u32, category: Category, delta: i64) -> Result<u32> {
        self.check_index(index)?;
        let current = self.entries.get(index).get(category) as i64;
        self.set_done(index, category, current.saturating_add(delta))
    }

    /// Mark every category of repetition `index` as worked
    pub fn fill_rep(&mut self, index: u32) -> Result<()> {
        for category in Category::ALL {
            self.set_done(index, category, self.pattern.cap(category) as i64)?;
        }
        Ok(())
    }

    pub fn clear_rep(&mut self, index: u32) -> Result<()> {
        for category in Category::ALL {
            self.set_done(index, category, 0)?;
        }
        Ok(())
    }
}

/// Holds the session's configuration once it exists.
///
/// Mirrors a front end that keeps state between interactions: the first
/// [`Session::initialize`] creates the defaults, later calls reuse them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Option<ConfigState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self) -> &mut ConfigState {
        self.state.get_or_insert_with(|| {
            debug!("session initialized with default pattern");
            ConfigState::default()
        })
    }

    pub fn state(&self) -> Option<&ConfigState> {
        self.state.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
