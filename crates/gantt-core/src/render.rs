//! Plain-text chart rendering for terminals

use crate::chart::GanttChart;
use gantt_calendar::{CalendarGrid, Clock};
use gantt_layout::{ResourceRow, StyleClass};

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 7;

/// Grid header: one line of group labels, one line of slot labels
#[must_use]
pub fn render_header(grid: &CalendarGrid) -> String {
    let mut groups = " ".repeat(NAME_WIDTH);
    for group in grid.groups() {
        let width = CELL_WIDTH * group.slot_count as usize;
        groups.push_str(&format!("{:<width$}", fit(&group.label, width)));
    }

    let mut labels = " ".repeat(NAME_WIDTH);
    for slot in grid.slots() {
        let marker = if slot.is_today { "*" } else { "" };
        let label = format!("{}{marker}", slot.label);
        labels.push_str(&format!("{:<CELL_WIDTH$}", fit(&label, CELL_WIDTH)));
    }

    format!("{}\n{}", groups.trim_end(), labels.trim_end())
}

/// One line per project lane, bars drawn with a glyph per style class
#[must_use]
pub fn render_row(row: &ResourceRow, total_slots: u32) -> String {
    let total = total_slots.max(1) as usize;
    let mut out = String::new();

    if row.lanes.is_empty() {
        out.push_str(&format!(
            "{:<NAME_WIDTH$}{}",
            fit(&row.name, NAME_WIDTH),
            ".".repeat(total * CELL_WIDTH)
        ));
        return out;
    }

    for (index, lane) in row.lanes.iter().enumerate() {
        let title = if index == 0 { row.name.as_str() } else { "" };
        let mut cells = vec!['.'; total * CELL_WIDTH];
        for bar in &lane.bars {
            let bounds = bar.allocation.bounds().clamped(total_slots);
            let glyph = glyph(bar.geometry.style_class);
            let (Ok(left), Ok(right)) = (usize::try_from(bounds.left), usize::try_from(bounds.right)) else {
                continue;
            };
            for cell in &mut cells[left * CELL_WIDTH..(right + 1) * CELL_WIDTH] {
                *cell = glyph;
            }
        }
        if index > 0 {
            out.push('\n');
        }
        let line: String = cells.into_iter().collect();
        out.push_str(&format!("{:<NAME_WIDTH$}{line}  {}", fit(title, NAME_WIDTH), lane.project_id));
    }
    out
}

/// Whole chart: title, header and every row
#[must_use]
pub fn render_chart<C: Clock>(chart: &GanttChart<C>) -> String {
    let grid = chart.grid();
    let mut out = format!("{}  ({})\n", chart.date_range().title(), grid.mode());
    out.push_str(&render_header(grid));
    for row in chart.rows() {
        out.push('\n');
        out.push_str(&render_row(&row, grid.total_slots()));
    }
    out
}

fn glyph(style: StyleClass) -> char {
    match style {
        StyleClass::Unavailable => 'x',
        StyleClass::Hold => '~',
        StyleClass::EffortLow => '-',
        StyleClass::EffortMedium => '=',
        StyleClass::EffortHigh | StyleClass::Neutral => '#',
    }
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width.saturating_sub(1)).collect()
}
