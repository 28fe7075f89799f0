use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Cell, Row},
};

use crate::pattern::{Category, Pattern};
use crate::progress::is_rep_complete;
use crate::repetition::RepetitionEntry;

pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(16), // Rep n / N
    Constraint::Length(10), // SC
    Constraint::Length(10), // INC
    Constraint::Length(10), // DEC
    Constraint::Length(6),  // Done
];

pub fn count_label(done: u32, cap: u32) -> String {
    format!("{done}/{cap}")
}

/// Pure presenter for one repetition row. `selected` is the focused category
/// when this row holds the cursor.
pub fn present_row(
    pattern: &Pattern,
    entry: &RepetitionEntry,
    selected: Option<Category>,
) -> Row<'static> {
    let complete = is_rep_complete(pattern, entry);

    let mut cells = vec![Cell::from(format!(
        "Rep {} / {}",
        entry.index, pattern.reps_count
    ))];

    for category in Category::ALL {
        let done = entry.get(category);
        let cap = pattern.cap(category);

        let mut style = if done == cap {
            Style::default().fg(Color::Green)
        } else if done == 0 {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        if selected == Some(category) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        cells.push(Cell::from(count_label(done, cap)).style(style));
    }

    cells.push(if complete {
        Cell::from("✓").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Cell::from("")
    });

    let row = Row::new(cells);
    if selected.is_some() {
        row.style(Style::default().bg(Color::Rgb(40, 40, 40)))
    } else {
        row
    }
}
