use serde::{Deserialize, Serialize};

pub const DEFAULT_ROUND: u32 = 1;
pub const DEFAULT_STANDARD_PER_REP: u32 = 2;
pub const DEFAULT_INCREASED_PER_REP: u32 = 1;
pub const DEFAULT_DECREASED_PER_REP: u32 = 0;
pub const DEFAULT_REPS_COUNT: u32 = 6;

/// Largest row the counter accepts; totals are recomputed over every rep on each edit
pub const MAX_REPS_COUNT: u32 = 10_000;
/// Keeps `2 × increased_per_rep` inside `u32`
pub const MAX_INCREASED_PER_REP: u32 = u32::MAX / 2;

/// Shape of the row being worked plus the round it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub round: u32,
    pub standard_per_rep: u32,
    /// Each increase yields two stitches, see [`Pattern::increased_cap`]
    pub increased_per_rep: u32,
    pub decreased_per_rep: u32,
    pub reps_count: u32,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            round: DEFAULT_ROUND,
            standard_per_rep: DEFAULT_STANDARD_PER_REP,
            increased_per_rep: DEFAULT_INCREASED_PER_REP,
            decreased_per_rep: DEFAULT_DECREASED_PER_REP,
            reps_count: DEFAULT_REPS_COUNT,
        }
    }
}

impl Pattern {
    pub fn with_round(self, round: u32) -> Self {
        Self {
            round: round.max(PatternField::Round.min()),
            ..self
        }
    }

    pub fn get(&self, field: PatternField) -> u32 {
        match field {
            PatternField::Round => self.round,
            PatternField::Standard => self.standard_per_rep,
            PatternField::Increased => self.increased_per_rep,
            PatternField::Decreased => self.decreased_per_rep,
            PatternField::Reps => self.reps_count,
        }
    }

    /// Store `value` clamped to the field's bound and return what was stored.
    pub(crate) fn put(&mut self, field: PatternField, value: i64) -> u32 {
        let clamped = field.clamp(value);
        let slot = match field {
            PatternField::Round => &mut self.round,
            PatternField::Standard => &mut self.standard_per_rep,
            PatternField::Increased => &mut self.increased_per_rep,
            PatternField::Decreased => &mut self.decreased_per_rep,
            PatternField::Reps => &mut self.reps_count,
        };
        *slot = clamped;
        clamped
    }

    /// Stitches produced by the increases of one repetition
    pub fn increased_cap(&self) -> u32 {
        self.increased_per_rep.saturating_mul(2)
    }

    pub fn cap(&self, category: Category) -> u32 {
        match category {
            Category::Standard => self.standard_per_rep,
            Category::Increased => self.increased_cap(),
            Category::Decreased => self.decreased_per_rep,
        }
    }

    pub fn contains_rep(&self, index: u32) -> bool {
        (1..=self.reps_count).contains(&index)
    }
}

/// Addressable configuration fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum PatternField {
    Round,
    Standard,
    Increased,
    Decreased,
    Reps,
}

impl PatternField {
    pub const ALL: [PatternField; 5] = [
        PatternField::Round,
        PatternField::Standard,
        PatternField::Increased,
        PatternField::Decreased,
        PatternField::Reps,
    ];

    pub fn min(self) -> u32 {
        match self {
            PatternField::Round | PatternField::Reps => 1,
            PatternField::Standard | PatternField::Increased | PatternField::Decreased => 0,
        }
    }

    pub fn max(self) -> u32 {
        match self {
            PatternField::Reps => MAX_REPS_COUNT,
            PatternField::Increased => MAX_INCREASED_PER_REP,
            PatternField::Round | PatternField::Standard | PatternField::Decreased => u32::MAX,
        }
    }

    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(self.min() as i64, self.max() as i64) as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternField::Round => "Round",
            PatternField::Standard => "Standard stitches per rep",
            PatternField::Increased => "Increased stitches per rep",
            PatternField::Decreased => "Decreased stitches per rep",
            PatternField::Reps => "Total reps in row",
        }
    }

    /// The stitch category whose cap this field drives, if any
    pub fn category(self) -> Option<Category> {
        match self {
            PatternField::Standard => Some(Category::Standard),
            PatternField::Increased => Some(Category::Increased),
            PatternField::Decreased => Some(Category::Decreased),
            PatternField::Round | PatternField::Reps => None,
        }
    }
}

/// Stitch categories tracked per repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Category {
    #[strum(to_string = "SC")]
    Standard,
    #[strum(to_string = "INC")]
    Increased,
    #[strum(to_string = "DEC")]
    Decreased,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Standard, Category::Increased, Category::Decreased];

    pub fn next(self) -> Self {
        match self {
            Category::Standard => Category::Increased,
            Category::Increased => Category::Decreased,
            Category::Decreased => Category::Standard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::Standard => Category::Decreased,
            Category::Increased => Category::Standard,
            Category::Decreased => Category::Increased,
        }
    }
}
