use std::collections::BTreeMap;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset as ChartDataset,
    GraphType, Paragraph, Row, Table, Tabs,
};

use crate::dataset::COLUMNS;
use crate::filters::FilterField;
use crate::pages::{LineSample, PieSample, WORLD_CUP_TITLE, share_pcts};
use crate::router::{NAV_LINKS, NOT_FOUND, Page, Pages, nav_index};
use crate::state::{AppState, Control, fmt_date};
use crate::summaries::{AggregateSummaries, TournamentCount};

pub const APP_TITLE: &str = "South Shore Analytics - Analysis of the Week";

const SCORE_COLOR: Color = Color::Cyan;
const OPPONENT_COLOR: Color = Color::LightRed;
const TEAM_PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::LightRed,
    Color::Blue,
    Color::LightGreen,
    Color::White,
];
const MAX_SCATTER_SERIES: usize = TEAM_PALETTE.len();

pub fn ui(frame: &mut Frame, state: &AppState, pages: &Pages) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], state);

    match pages.route(&state.path) {
        Page::WorldCup => render_world_cup(frame, chunks[1], state),
        Page::Pie(pie) => render_pie_page(frame, chunks[1], pie),
        Page::Line(line) => render_line_page(frame, chunks[1], line),
        Page::NotFound => {
            let body = Paragraph::new(NOT_FOUND).alignment(Alignment::Center);
            frame.render_widget(body, chunks[1]);
        }
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(APP_TITLE).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, rows[0]);

    let titles: Vec<String> = NAV_LINKS
        .iter()
        .enumerate()
        .map(|(i, (label, _))| format!("{} {label}", i + 1))
        .collect();
    let mut tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    if let Some(idx) = nav_index(&state.path) {
        tabs = tabs.select(idx);
    }
    frame.render_widget(tabs, rows[1]);
}

fn footer_text(state: &AppState) -> String {
    if let Some(input) = &state.path_input {
        return format!("Go to: {input}_   (Enter open | Esc cancel)");
    }
    match nav_index(&state.path) {
        Some(0) => "1/2/3 Pages | / Path | Tab Focus | j/k Move | Space Toggle | h/l Day | H/L Year | x Clear | r Reset | ? Help | q Quit".to_string(),
        _ => "1/2/3 Pages | / Path | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_world_cup(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let title = format!("{WORLD_CUP_TITLE}  ({} matches)", state.view.rows);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(rows[1]);

    render_filter_panel(frame, columns[0], state);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Min(6),
        ])
        .split(columns[1]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(charts[0]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(charts[1]);

    let summaries = &state.view.summaries;
    render_average_scores(frame, top[0], summaries);
    render_share_bars(
        frame,
        top[1],
        "Tournament Distribution",
        &tournament_slices(&summaries.tournament_counts),
    );
    render_match_scores(frame, middle[0], summaries);
    render_scores_over_time(frame, middle[1], summaries);
    render_recent_matches(frame, charts[2], summaries);
}

fn render_filter_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(FilterField::ALL.iter().map(|_| Constraint::Ratio(1, 5)));
    constraints.push(Constraint::Length(3));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let focused = |c: Control| state.focus == c;
    let date_style = |c: Control| {
        if focused(c) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let dates = vec![
        Line::from(vec![
            Span::raw("From "),
            Span::styled(fmt_date(state.criteria.date_start), date_style(Control::DateStart)),
        ]),
        Line::from(vec![
            Span::raw("To   "),
            Span::styled(fmt_date(state.criteria.date_end), date_style(Control::DateEnd)),
        ]),
    ];
    let date_focused = focused(Control::DateStart) || focused(Control::DateEnd);
    frame.render_widget(
        Paragraph::new(dates).block(panel_block("Date Range", date_focused)),
        slots[0],
    );

    for (i, field) in FilterField::ALL.iter().enumerate() {
        render_picker(frame, slots[i + 1], state, *field);
    }

    let mark = if state.criteria.neutral_only { "[x]" } else { "[ ]" };
    frame.render_widget(
        Paragraph::new(format!("{mark} Neutral Venue"))
            .block(panel_block("Venue", focused(Control::Neutral))),
        slots[FilterField::ALL.len() + 1],
    );
}

fn render_picker(frame: &mut Frame, area: Rect, state: &AppState, field: FilterField) {
    let focused = state.focus == Control::Picker(field);
    let chosen = state.criteria.selection(field).len();
    let title = if chosen == 0 {
        field.placeholder().to_string()
    } else {
        format!("{} ({chosen})", field.placeholder())
    };
    let block = panel_block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let entries = state.picker_entries(field);
    if entries.is_empty() {
        let empty = Paragraph::new("No options").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let cursor = state.cursor(field);
    let (start, end) = visible_range(cursor, entries.len(), inner.height as usize);
    let lines: Vec<Line> = entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let mark = if entry.selected { "[x] " } else { "[ ] " };
            let style = if focused && start + offset == cursor {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else if entry.selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::styled(format!("{mark}{}", entry.value), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_average_scores(frame: &mut Frame, area: Rect, summaries: &AggregateSummaries) {
    let block = Block::default().title("Average Scores").borders(Borders::ALL);
    if summaries.team_averages.is_empty() {
        render_empty(frame, area, block);
        return;
    }

    // Bar values are integers; scale means by 10 and print the real value.
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);
    for avg in &summaries.team_averages {
        let bars = [
            Bar::default()
                .value((avg.score * 10.0).round() as u64)
                .text_value(format!("{:.1}", avg.score))
                .style(Style::default().fg(SCORE_COLOR)),
            Bar::default()
                .value((avg.opponent_score * 10.0).round() as u64)
                .text_value(format!("{:.1}", avg.opponent_score))
                .style(Style::default().fg(OPPONENT_COLOR)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(avg.team.clone()))
                .bars(&bars),
        );
    }
    frame.render_widget(chart, area);
}

fn tournament_slices(counts: &[TournamentCount]) -> Vec<(String, u64)> {
    counts
        .iter()
        .map(|c| (c.tournament.clone(), c.count as u64))
        .collect()
}

/// Horizontal share bars, the terminal's stand-in for a pie chart.
fn render_share_bars(frame: &mut Frame, area: Rect, title: &str, slices: &[(String, u64)]) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let total: u64 = slices.iter().map(|(_, v)| v).sum();
    if total == 0 {
        render_empty(frame, area, block);
        return;
    }

    let pcts = share_pcts(slices);
    let bars: Vec<Bar> = slices
        .iter()
        .zip(pcts)
        .enumerate()
        .map(|(i, ((label, value), pct))| {
            Bar::default()
                .value(*value)
                .label(Line::from(label.clone()))
                .text_value(format!("{pct:.1}%"))
                .style(Style::default().fg(TEAM_PALETTE[i % TEAM_PALETTE.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
        .max(total);
    frame.render_widget(chart, area);
}

fn render_match_scores(frame: &mut Frame, area: Rect, summaries: &AggregateSummaries) {
    let block = Block::default().title("Match Scores").borders(Borders::ALL);
    if summaries.score_points.is_empty() {
        render_empty(frame, area, block);
        return;
    }

    // One series per team; teams past the palette share a single series.
    let mut by_team: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for p in &summaries.score_points {
        by_team
            .entry(p.team.as_deref().unwrap_or(""))
            .or_default()
            .push((p.score as f64, p.opponent_score as f64));
    }
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    let mut rest: Vec<(f64, f64)> = Vec::new();
    for (i, (team, points)) in by_team.into_iter().enumerate() {
        if i + 1 < MAX_SCATTER_SERIES {
            series.push((team.to_string(), points));
        } else {
            rest.extend(points);
        }
    }
    if !rest.is_empty() {
        series.push(("others".to_string(), rest));
    }

    let max_x = summaries.score_points.iter().map(|p| p.score).max().unwrap_or(0).max(1) as f64;
    let max_y = summaries
        .score_points
        .iter()
        .map(|p| p.opponent_score)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let datasets: Vec<ChartDataset> = series
        .iter()
        .enumerate()
        .map(|(i, (team, points))| {
            ChartDataset::default()
                .name(team.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(TEAM_PALETTE[i % TEAM_PALETTE.len()]))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Score")
                .bounds([0.0, max_x])
                .labels(axis_labels(0.0, max_x)),
        )
        .y_axis(
            Axis::default()
                .title("Opponent Score")
                .bounds([0.0, max_y])
                .labels(axis_labels(0.0, max_y)),
        );
    frame.render_widget(chart, area);
}

fn render_scores_over_time(frame: &mut Frame, area: Rect, summaries: &AggregateSummaries) {
    let block = Block::default().title("Scores Over Time").borders(Borders::ALL);
    let series = &summaries.scores_over_time;
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        render_empty(frame, area, block);
        return;
    };

    let origin = first.date;
    let x = |d: chrono::NaiveDate| (d - origin).num_days() as f64;
    let score: Vec<(f64, f64)> = series.iter().map(|p| (x(p.date), p.score)).collect();
    let opponent: Vec<(f64, f64)> = series.iter().map(|p| (x(p.date), p.opponent_score)).collect();
    let max_x = x(last.date).max(1.0);
    let max_y = series
        .iter()
        .map(|p| p.score.max(p.opponent_score))
        .fold(1.0_f64, f64::max);

    let datasets = vec![
        ChartDataset::default()
            .name("score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SCORE_COLOR))
            .data(&score),
        ChartDataset::default()
            .name("opponent_score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(OPPONENT_COLOR))
            .data(&opponent),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("date")
                .bounds([0.0, max_x])
                .labels(vec![Span::raw(fmt_date(first.date)), Span::raw(fmt_date(last.date))]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, max_y])
                .labels(axis_labels(0.0, max_y)),
        );
    frame.render_widget(chart, area);
}

fn render_recent_matches(frame: &mut Frame, area: Rect, summaries: &AggregateSummaries) {
    let header = Row::new(COLUMNS.iter().map(|c| c.to_string()))
        .style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));
    let rows: Vec<Row> = summaries
        .recent_matches
        .iter()
        .map(|r| Row::new(r.cells().to_vec()))
        .collect();
    let widths = [
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(12),
        Constraint::Min(8),
        Constraint::Min(8),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Recent Matches").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_pie_page(frame: &mut Frame, area: Rect, pie: &PieSample) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(
        Paragraph::new(pie.title).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );
    render_share_bars(frame, rows[1], "Country", &pie.slices);
}

fn render_line_page(frame: &mut Frame, area: Rect, line: &LineSample) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(
        Paragraph::new(line.title).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let block = Block::default().title("Value").borders(Borders::ALL);
    let (Some(first), Some(last)) = (line.points.first(), line.points.last()) else {
        render_empty(frame, rows[1], block);
        return;
    };
    let points: Vec<(f64, f64)> = line
        .points
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (i as f64, *v))
        .collect();
    let (min_y, max_y) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));
    let pad = ((max_y - min_y) * 0.05).max(0.5);

    let datasets = vec![
        ChartDataset::default()
            .name("Value")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SCORE_COLOR))
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels(vec![Span::raw(fmt_date(first.0)), Span::raw(fmt_date(last.0))]),
        )
        .y_axis(
            Axis::default()
                .bounds([min_y - pad, max_y + pad])
                .labels(axis_labels(min_y - pad, max_y + pad)),
        );
    frame.render_widget(chart, rows[1]);
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block) {
    let empty = Paragraph::new("No data")
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(empty, area);
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    vec![
        Span::raw(format!("{lo:.1}")),
        Span::raw(format!("{mid:.1}")),
        Span::raw(format!("{hi:.1}")),
    ]
}

pub fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "South Shore Analytics - Help",
        "",
        "Global:",
        "  1 / 2 / 3    World Cup / Page 2 / Page 3",
        "  /            Type a page path",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "World Cup filters:",
        "  Tab / S-Tab  Next / previous control",
        "  j/k or ↑/↓   Move in picker",
        "  Space        Toggle option / neutral venue",
        "  h/l or ←/→   Date -1 / +1 day",
        "  H / L        Date -1 / +1 year",
        "  n            Toggle neutral venue",
        "  x            Clear focused picker",
        "  r            Reset all filters",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::visible_range;

    #[test]
    fn visible_range_centres_cursor() {
        assert_eq!(visible_range(0, 0, 5), (0, 0));
        assert_eq!(visible_range(3, 4, 10), (0, 4));
        assert_eq!(visible_range(10, 20, 6), (7, 13));
        assert_eq!(visible_range(19, 20, 6), (14, 20));
    }
}
