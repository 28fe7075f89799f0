// Library surface for the binary and for headless/integration tests.
// The counting model (pattern, repetition, session, progress) does no I/O;
// app/ui/runtime are the terminal front end built on top of it.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod progress;
pub mod repetition;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
pub use pattern::{Category, Pattern, PatternField};
pub use progress::{aggregate, is_rep_complete, stitches_per_rep, summarize, total_stitches};
pub use repetition::{RepetitionEntries, RepetitionEntry};
pub use session::{ConfigState, Session};
