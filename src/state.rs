use std::collections::{BTreeMap, VecDeque};

use anyhow::{Context, Result};
use chrono::{Duration, Months, NaiveDate};

use crate::dashboard::WorldCupView;
use crate::dataset::Dataset;
use crate::filters::{FilterCriteria, FilterField};
use crate::router::{NAV_LINKS, WORLD_CUP_PATH};

const MAX_LOGS: usize = 200;

/// A World Cup page control that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    DateStart,
    DateEnd,
    Picker(FilterField),
    Neutral,
}

impl Control {
    pub const ORDER: [Control; 8] = [
        Control::DateStart,
        Control::DateEnd,
        Control::Picker(FilterField::Team),
        Control::Picker(FilterField::Opponent),
        Control::Picker(FilterField::Tournament),
        Control::Picker(FilterField::City),
        Control::Picker(FilterField::Country),
        Control::Neutral,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|c| *c == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    NavigateTab(usize),
    FocusNext,
    FocusPrev,
    CursorDown,
    CursorUp,
    ShiftDate { days: i64 },
    ShiftYear { years: i32 },
    ToggleOption,
    ClearFocused,
    ToggleNeutral,
    ResetFilters,
    ToggleHelp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub path: String,
    pub criteria: FilterCriteria,
    pub bounds: (NaiveDate, NaiveDate),
    pub focus: Control,
    pub cursors: BTreeMap<FilterField, usize>,
    pub view: WorldCupView,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    /// Path being typed after `/`, if the prompt is open.
    pub path_input: Option<String>,
}

impl AppState {
    pub fn new(dataset: &Dataset, start_path: &str) -> Result<Self> {
        let criteria = FilterCriteria::spanning(dataset).context("dataset has no match dates")?;
        let bounds = (criteria.date_start, criteria.date_end);
        let view = WorldCupView::compute(dataset, &criteria);
        let mut state = Self {
            path: start_path.to_string(),
            criteria,
            bounds,
            focus: Control::DateStart,
            cursors: BTreeMap::new(),
            view,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            path_input: None,
        };
        let source = dataset
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "memory".to_string());
        state.push_log(format!(
            "[INFO] Loaded {} matches from {source} ({} to {})",
            dataset.len(),
            fmt_date(bounds.0),
            fmt_date(bounds.1)
        ));
        Ok(state)
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn cursor(&self, field: FilterField) -> usize {
        self.cursors.get(&field).copied().unwrap_or(0)
    }

    /// Picker rows for `field`: current selections first, then the remaining
    /// options still present in the filtered data.
    pub fn picker_entries(&self, field: FilterField) -> Vec<PickerEntry> {
        let selected = self.criteria.selection(field);
        let mut entries: Vec<PickerEntry> = selected
            .iter()
            .map(|v| PickerEntry {
                value: v.clone(),
                selected: true,
            })
            .collect();
        entries.extend(
            self.view
                .options
                .values(field)
                .filter(|v| !selected.contains(*v))
                .map(|v| PickerEntry {
                    value: v.to_string(),
                    selected: false,
                }),
        );
        entries
    }

    fn refresh(&mut self, dataset: &Dataset) {
        self.view = WorldCupView::compute(dataset, &self.criteria);
        for field in FilterField::ALL {
            let len = self.picker_entries(field).len();
            let cursor = self.cursors.entry(field).or_insert(0);
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
        let msg = format!("[INFO] {} matches | {}", self.view.rows, criteria_label(&self.criteria));
        self.push_log(msg);
    }

    fn navigate(&mut self, path: &str) {
        let path = path.trim();
        if path == self.path {
            return;
        }
        self.path = path.to_string();
        self.push_log(format!("[INFO] Navigate {path}"));
    }

    fn move_cursor(&mut self, step: isize) {
        let Control::Picker(field) = self.focus else {
            return;
        };
        let len = self.picker_entries(field).len();
        let cursor = self.cursors.entry(field).or_insert(0);
        *cursor = cursor
            .saturating_add_signed(step)
            .min(len.saturating_sub(1));
    }

    fn shift_date(&mut self, shifted: impl Fn(NaiveDate) -> Option<NaiveDate>) -> bool {
        let (min, max) = self.bounds;
        match self.focus {
            Control::DateStart => {
                let Some(next) = shifted(self.criteria.date_start) else {
                    return false;
                };
                let next = next.clamp(min, self.criteria.date_end);
                let changed = next != self.criteria.date_start;
                self.criteria.date_start = next;
                changed
            }
            Control::DateEnd => {
                let Some(next) = shifted(self.criteria.date_end) else {
                    return false;
                };
                let next = next.clamp(self.criteria.date_start, max);
                let changed = next != self.criteria.date_end;
                self.criteria.date_end = next;
                changed
            }
            _ => false,
        }
    }
}

/// Applies one user action. Criteria changes recompute the World Cup view.
pub fn dispatch(state: &mut AppState, dataset: &Dataset, action: Action) {
    let criteria_changed = match action {
        Action::Navigate(path) => {
            state.navigate(&path);
            false
        }
        Action::NavigateTab(idx) => {
            if let Some((_, href)) = NAV_LINKS.get(idx) {
                state.navigate(href);
            }
            false
        }
        Action::FocusNext => {
            let idx = (state.focus.position() + 1) % Control::ORDER.len();
            state.focus = Control::ORDER[idx];
            false
        }
        Action::FocusPrev => {
            let len = Control::ORDER.len();
            let idx = (state.focus.position() + len - 1) % len;
            state.focus = Control::ORDER[idx];
            false
        }
        Action::CursorDown => {
            state.move_cursor(1);
            false
        }
        Action::CursorUp => {
            state.move_cursor(-1);
            false
        }
        Action::ShiftDate { days } => state.shift_date(|d| d.checked_add_signed(Duration::days(days))),
        Action::ShiftYear { years } => state.shift_date(|d| {
            let months = Months::new(years.unsigned_abs().checked_mul(12)?);
            if years >= 0 {
                d.checked_add_months(months)
            } else {
                d.checked_sub_months(months)
            }
        }),
        Action::ToggleOption => match state.focus {
            Control::Picker(field) => {
                let entries = state.picker_entries(field);
                match entries.get(state.cursor(field)) {
                    Some(entry) => {
                        state.criteria.toggle(field, &entry.value);
                        true
                    }
                    None => false,
                }
            }
            Control::Neutral => {
                state.criteria.neutral_only = !state.criteria.neutral_only;
                true
            }
            _ => false,
        },
        Action::ClearFocused => match state.focus {
            Control::Picker(field) => {
                let set = state.criteria.selection_mut(field);
                let had_any = !set.is_empty();
                set.clear();
                had_any
            }
            _ => false,
        },
        Action::ToggleNeutral => {
            state.criteria.neutral_only = !state.criteria.neutral_only;
            true
        }
        Action::ResetFilters => {
            let (start, end) = state.bounds;
            let fresh = FilterCriteria::new(start, end);
            let changed = fresh != state.criteria;
            state.criteria = fresh;
            changed
        }
        Action::ToggleHelp => {
            state.help_overlay = !state.help_overlay;
            false
        }
    };

    if criteria_changed {
        state.refresh(dataset);
    }
}

pub fn initial_path(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(WORLD_CUP_PATH)
        .to_string()
}

pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short summary of the active restrictions for the console.
pub fn criteria_label(criteria: &FilterCriteria) -> String {
    let mut parts = vec![format!(
        "{}..{}",
        fmt_date(criteria.date_start),
        fmt_date(criteria.date_end)
    )];
    for field in FilterField::ALL {
        let n = criteria.selection(field).len();
        if n > 0 {
            parts.push(format!("{}={n}", field.column()));
        }
    }
    if criteria.neutral_only {
        parts.push("neutral".to_string());
    }
    parts.join(" ")
}
