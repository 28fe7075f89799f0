use std::collections::BTreeMap;

use crate::pattern::{Category, Pattern};

/// Progress within one repetition of the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepetitionEntry {
    /// 1-based position in the row
    pub index: u32,
    pub standard_done: u32,
    pub increased_done: u32,
    pub decreased_done: u32,
}

impl RepetitionEntry {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            standard_done: 0,
            increased_done: 0,
            decreased_done: 0,
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Standard => self.standard_done,
            Category::Increased => self.increased_done,
            Category::Decreased => self.decreased_done,
        }
    }

    pub(crate) fn slot_mut(&mut self, category: Category) -> &mut u32 {
        match category {
            Category::Standard => &mut self.standard_done,
            Category::Increased => &mut self.increased_done,
            Category::Decreased => &mut self.decreased_done,
        }
    }

    pub fn done(&self) -> u64 {
        Category::ALL.iter().map(|&c| self.get(c) as u64).sum()
    }

    pub fn is_zero(&self) -> bool {
        Category::ALL.iter().all(|&c| self.get(c) == 0)
    }
}

/// Index-keyed store of repetition entries.
///
/// Entries are created on first write; reading an index that was never
/// written yields a zeroed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionEntries {
    entries: BTreeMap<u32, RepetitionEntry>,
}

impl RepetitionEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u32) -> RepetitionEntry {
        self.entries
            .get(&index)
            .copied()
            .unwrap_or_else(|| RepetitionEntry::new(index))
    }

    pub fn contains(&self, index: u32) -> bool {
        self.entries.contains_key(&index)
    }

    pub(crate) fn entry_mut(&mut self, index: u32) -> &mut RepetitionEntry {
        self.entries
            .entry(index)
            .or_insert_with(|| RepetitionEntry::new(index))
    }

    pub fn insert(&mut self, entry: RepetitionEntry) {
        self.entries.insert(entry.index, entry);
    }

    /// Number of entries actually stored (not the row length)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry with an index above `reps`
    pub(crate) fn truncate(&mut self, reps: u32) {
        let _dropped = self.entries.split_off(&(reps.saturating_add(1)));
    }

    /// Pull stored values back under the caps of `pattern`
    pub(crate) fn clamp_to(&mut self, pattern: &Pattern) {
        for entry in self.entries.values_mut() {
            for category in Category::ALL {
                let cap = pattern.cap(category);
                let slot = entry.slot_mut(category);
                if *slot > cap {
                    *slot = cap;
                }
            }
        }
    }

    /// Every index in `1..=reps`, with zeroed entries for the ones never written
    pub fn rows(&self, reps: u32) -> impl Iterator<Item = RepetitionEntry> + '_ {
        (1..=reps).map(move |index| self.get(index))
    }

    pub fn stored(&self) -> impl Iterator<Item = &RepetitionEntry> {
        self.entries.values()
    }
}
