pub mod reps;
pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Pane};
use crate::pattern::PatternField;
use crate::progress::Summary;

const SIDEBAR_WIDTH: u16 = 40;
const HORIZONTAL_MARGIN: u16 = 1;

/// Draw whatever screen the app is on
pub fn ui(app: &mut App, f: &mut Frame) {
    let screen = screen::current_screen(&app.state);
    screen.render(app, f);
}

pub fn stitches_line(summary: &Summary) -> String {
    format!(
        "Completed stitches: {} / {}",
        summary.total_done, summary.total_stitches
    )
}

pub fn reps_line(summary: &Summary) -> String {
    format!(
        "Completed reps: {} / {}",
        summary.reps_completed, summary.reps_count
    )
}

pub(crate) fn render_counting(app: &mut App, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(0),    // body
            Constraint::Length(1), // status / key hints
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        format!("Stitch Counter · Round {}", app.summary.round),
        bold_style.fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, outer[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(outer[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PatternField::ALL.len() as u16 + 2), // configuration
            Constraint::Length(6),                                  // progress text
            Constraint::Length(3),                                  // gauge
            Constraint::Min(0),
        ])
        .split(body[0]);

    render_config(app, f, sidebar[0]);
    render_progress(&app.summary, f, sidebar[1], sidebar[2]);
    render_reps(app, f, body[1]);
    render_footer(app, f, outer[2]);
}

fn render_config(app: &App, f: &mut Frame, area: Rect) {
    let pattern = app.pattern();
    let focused = app.pane == Pane::Config;

    let lines: Vec<Line> = PatternField::ALL
        .iter()
        .map(|&field| {
            let value = pattern.get(field);
            let text = match field {
                PatternField::Increased => format!(
                    "{:<27}{:>4} (x2)",
                    field.label(),
                    value
                ),
                _ => format!("{:<27}{:>4}", field.label(), value),
            };
            let style = if focused && field == app.field {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Configuration"),
    );
    f.render_widget(panel, area);
}

fn render_progress(summary: &Summary, f: &mut Frame, text_area: Rect, gauge_area: Rect) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::raw("Round: "),
            Span::styled(summary.round.to_string(), bold_style),
        ]),
        Line::from(format!("Stitches per rep: {}", summary.stitches_per_rep)),
        Line::from(Span::styled(stitches_line(summary), bold_style)),
        Line::from(Span::styled(reps_line(summary), bold_style)),
    ];
    let text = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .wrap(Wrap { trim: true });
    f.render_widget(text, text_area);

    let gauge_color = if summary.is_row_complete() {
        Color::Green
    } else {
        Color::Magenta
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(summary.fraction())
        .label(format!("{:.0}%", summary.fraction() * 100.0));
    f.render_widget(gauge, gauge_area);
}

fn render_reps(app: &mut App, f: &mut Frame, area: Rect) {
    // borders and header row
    let visible = area.height.saturating_sub(3) as usize;
    app.scroll_to_selection(visible);

    let pattern = app.pattern();
    let focused = app.pane == Pane::Reps;
    let first = app.scroll_offset as u32 + 1;
    let last = (app.scroll_offset + visible).min(pattern.reps_count as usize) as u32;

    let rows: Vec<Row> = app
        .session
        .state()
        .map(|state| {
            (first..=last)
                .map(|index| {
                    let entry = state.entry(index);
                    let selected = (focused && index == app.rep).then_some(app.category);
                    reps::present_row(&pattern, &entry, selected)
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let header = Row::new(vec![
        Cell::from("Rep"),
        Cell::from(format!("SC /{}", pattern.standard_per_rep)),
        Cell::from(format!("INC /{}", pattern.increased_cap())),
        Cell::from(format!("DEC /{}", pattern.decreased_per_rep)),
        Cell::from("Done"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let scroll_info = if pattern.reps_count as usize > visible && !rows.is_empty() {
        format!(" ({}-{} of {})", first, last, pattern.reps_count)
    } else {
        String::new()
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let table = Table::new(rows, reps::COLUMN_WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Repetitions{}", scroll_info)),
        );
    f.render_widget(table, area);
}

fn render_footer(app: &App, f: &mut Frame, area: Rect) {
    let footer = match &app.status {
        Some(status) => Paragraph::new(Span::styled(
            status.text.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        None => Paragraph::new(Span::styled(
            "(tab) switch / (+/-) count / (f)ill / (c)lear / (n)ext round / (R)eset all / (?) help / (q)uit",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
    };
    f.render_widget(footer.alignment(Alignment::Center), area);
}

pub(crate) fn render_help(f: &mut Frame) {
    let area = f.area();
    let keys = [
        ("Tab / Shift-Tab", "switch between configuration and repetitions"),
        ("↑ ↓ / k j", "select field or repetition"),
        ("← → / h l", "change category (reps) or value (config)"),
        ("+ / =", "add one to the selected value"),
        ("- / _", "take one from the selected value"),
        ("f", "fill the selected repetition"),
        ("c", "clear the selected repetition"),
        ("PgUp PgDn Home End", "jump through repetitions"),
        ("n", "next round"),
        ("R", "reset all (the round number is kept)"),
        ("? / Esc / b", "close help"),
        ("q / Ctrl-C", "quit"),
    ];

    let mut lines: Vec<Line> = keys
        .iter()
        .map(|(k, d)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>20}  ", k),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*d),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Increases count double: a target of 1 INC per rep means 2 stitches.",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Clear, area);
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, area);
}
