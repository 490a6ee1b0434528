use std::collections::BTreeSet;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, MatchRecord};

/// The five categorical columns a user can restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Team,
    Opponent,
    Tournament,
    City,
    Country,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Team,
        FilterField::Opponent,
        FilterField::Tournament,
        FilterField::City,
        FilterField::Country,
    ];

    pub fn value<'a>(&self, record: &'a MatchRecord) -> Option<&'a str> {
        match self {
            FilterField::Team => record.team.as_deref(),
            FilterField::Opponent => record.opposing_team.as_deref(),
            FilterField::Tournament => record.tournament.as_deref(),
            FilterField::City => record.city.as_deref(),
            FilterField::Country => record.country.as_deref(),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            FilterField::Team => "team",
            FilterField::Opponent => "opposing_team",
            FilterField::Tournament => "tournament",
            FilterField::City => "city",
            FilterField::Country => "country",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FilterField::Team => "Select Team",
            FilterField::Opponent => "Select Opponent",
            FilterField::Tournament => "Select Tournament",
            FilterField::City => "Select City",
            FilterField::Country => "Select Country",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub teams: BTreeSet<String>,
    pub opponents: BTreeSet<String>,
    pub tournaments: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub neutral_only: bool,
}

impl FilterCriteria {
    pub fn new(date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            date_start,
            date_end,
            teams: BTreeSet::new(),
            opponents: BTreeSet::new(),
            tournaments: BTreeSet::new(),
            cities: BTreeSet::new(),
            countries: BTreeSet::new(),
            neutral_only: false,
        }
    }

    /// Whole date span of `dataset`, nothing else restricted.
    pub fn spanning(dataset: &Dataset) -> Option<Self> {
        dataset
            .date_bounds()
            .map(|(start, end)| Self::new(start, end))
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_start > self.date_end {
            bail!(
                "date range is reversed: {} is after {}",
                self.date_start.format("%Y-%m-%d"),
                self.date_end.format("%Y-%m-%d")
            );
        }
        Ok(())
    }

    pub fn selection(&self, field: FilterField) -> &BTreeSet<String> {
        match field {
            FilterField::Team => &self.teams,
            FilterField::Opponent => &self.opponents,
            FilterField::Tournament => &self.tournaments,
            FilterField::City => &self.cities,
            FilterField::Country => &self.countries,
        }
    }

    pub fn selection_mut(&mut self, field: FilterField) -> &mut BTreeSet<String> {
        match field {
            FilterField::Team => &mut self.teams,
            FilterField::Opponent => &mut self.opponents,
            FilterField::Tournament => &mut self.tournaments,
            FilterField::City => &mut self.cities,
            FilterField::Country => &mut self.countries,
        }
    }

    /// Adds `value` to the field's selection, or removes it if already there.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, field: FilterField, value: &str) -> bool {
        let set = self.selection_mut(field);
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        if record.date < self.date_start || record.date > self.date_end {
            return false;
        }
        let categorical_ok = FilterField::ALL.iter().all(|field| {
            let wanted = self.selection(*field);
            wanted.is_empty() || field.value(record).is_some_and(|v| wanted.contains(v))
        });
        if !categorical_ok {
            return false;
        }
        !self.neutral_only || record.neutral
    }
}

/// Criteria as read from JSON. Either date may be left out and falls back
/// to the dataset's span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CriteriaInput {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub teams: BTreeSet<String>,
    pub opponents: BTreeSet<String>,
    pub tournaments: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub neutral_only: bool,
}

impl CriteriaInput {
    /// Fills missing dates from `dataset` and rejects a reversed range.
    pub fn into_criteria(self, dataset: &Dataset) -> Result<FilterCriteria> {
        let Some((min, max)) = dataset.date_bounds() else {
            bail!("dataset has no match dates");
        };
        let criteria = FilterCriteria {
            date_start: self.date_start.unwrap_or(min),
            date_end: self.date_end.unwrap_or(max),
            teams: self.teams,
            opponents: self.opponents,
            tournaments: self.tournaments,
            cities: self.cities,
            countries: self.countries,
            neutral_only: self.neutral_only,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Rows of the dataset that satisfy a `FilterCriteria`, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a MatchRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn from_rows(rows: Vec<&'a MatchRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a MatchRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MatchRecord> + '_ {
        self.rows.iter().copied()
    }
}

pub fn apply_filters<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::from_rows(
        dataset
            .records()
            .iter()
            .filter(|record| criteria.matches(record))
            .collect(),
    )
}
