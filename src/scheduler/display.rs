use super::{Process, Report};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

const HEADER: [&str; 7] = ["PID", "AT", "BT", "PR", "WT", "TAT", "FT"];

const COLUMN_WIDTHS: [Constraint; 7] = [
    Constraint::Length(5),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(6),
];

fn columns(process: &Process) -> [String; 7] {
    let metric = |value: Option<u32>| value.map_or_else(|| "-".to_owned(), |v| v.to_string());
    [
        format!("P{}", process.pid()),
        process.arrival_time().to_string(),
        process.burst_time().to_string(),
        process.priority().to_string(),
        metric(process.waiting_time()),
        metric(process.turnaround_time()),
        metric(process.finish_time()),
    ]
}

/// Writes the report as plain text.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    let gantt = report.timeline().gantt();

    writeln!(out, "\n--- {} Scheduling ---", report.algorithm())?;
    writeln!(out, "Gantt Chart:")?;
    writeln!(out, "{}", gantt.bar)?;
    writeln!(out, "{}", gantt.axis)?;

    writeln!(out, "\n--- {} Performance Metrics ---", report.algorithm())?;
    writeln!(out, "{}", HEADER.join("\t"))?;
    for process in report.processes() {
        writeln!(out, "{}", columns(process).join("\t"))?;
    }

    if !report.processes().is_empty() {
        writeln!(out, "\nAverage Waiting Time: {:.2}", report.average_waiting_time())?;
        writeln!(out, "Average Turnaround Time: {:.2}", report.average_turnaround_time())?;
    }
    Ok(())
}

/// Draws the report into a single frame.
pub fn draw_report<B: Backend>(f: &mut Frame<B>, report: &Report) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(f.size());

    let gantt = report.timeline().gantt();
    let chart = Paragraph::new(vec![Spans::from(gantt.bar), Spans::from(gantt.axis)])
        .style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::LightBlue),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Gantt Chart")
                .border_type(BorderType::Rounded),
        );

    f.render_widget(chart, chunks[0]);

    let rows = report.processes().iter().map(|process| {
        let [pid, rest @ ..] = columns(process);
        let mut cells = vec![Cell::from(pid).style(Style::default().add_modifier(Modifier::BOLD))];
        cells.extend(rest.into_iter().map(Cell::from));
        Row::new(cells)
    });

    let table = Table::new(rows)
        .header(Row::new(HEADER.to_vec()).style(Style::default().add_modifier(Modifier::BOLD)))
        .widths(&COLUMN_WIDTHS)
        .block(
            Block::default()
                .title(report.algorithm())
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::LightGreen))
        .column_spacing(1);

    f.render_widget(table, chunks[1]);

    let averages = Paragraph::new(vec![
        Spans::from(format!(
            "Average Waiting Time: {:.2}",
            report.average_waiting_time()
        )),
        Spans::from(format!(
            "Average Turnaround Time: {:.2}",
            report.average_turnaround_time()
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("q / Esc / Enter: back to menu")
            .border_type(BorderType::Rounded),
    );

    f.render_widget(averages, chunks[2]);
}

/// Runs `enter` then `body`, and always `restore` afterwards, whichever of
/// them failed. The first error wins.
fn restoring<S, T>(
    state: &mut S,
    enter: impl FnOnce(&mut S) -> Result<(), io::Error>,
    body: impl FnOnce(&mut S) -> Result<T, io::Error>,
    restore: impl FnOnce(&mut S) -> Result<(), io::Error>,
) -> Result<T, io::Error> {
    let result = enter(state).and_then(|()| body(state));
    let restored = restore(state);
    let value = result?;
    restored?;
    Ok(value)
}

/// Full-screen report view on the controlling terminal.
pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    /// Shows `report` until the operator dismisses it, then restores the screen.
    pub fn show(&mut self, report: &Report) -> Result<(), io::Error> {
        terminal::enable_raw_mode()?;
        restoring(
            self,
            |display| execute!(display.terminal.backend_mut(), EnterAlternateScreen),
            |display| display.draw_until_dismissed(report),
            DisplayTerminal::restore,
        )
    }

    // Every step runs even when an earlier one fails.
    fn restore(&mut self) -> Result<(), io::Error> {
        let left = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let raw = terminal::disable_raw_mode();
        let cursor = self.terminal.show_cursor();
        left.and(raw).and(cursor)
    }

    fn draw_until_dismissed(&mut self, report: &Report) -> Result<(), io::Error> {
        self.terminal.clear()?;
        loop {
            self.terminal.draw(|f| draw_report(f, report))?;

            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                    return Ok(());
                }
            }
        }
    }
}
