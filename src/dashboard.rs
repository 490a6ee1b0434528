use serde::Serialize;

use crate::dataset::Dataset;
use crate::filters::{FilterCriteria, apply_filters};
use crate::options::{FilterOptions, derive_options};
use crate::summaries::{AggregateSummaries, build_summaries};

/// Picker contents for the current criteria.
pub fn update_filter_options(dataset: &Dataset, criteria: &FilterCriteria) -> FilterOptions {
    derive_options(&apply_filters(dataset, criteria))
}

/// Charts and table for the current criteria.
pub fn update_visualizations(dataset: &Dataset, criteria: &FilterCriteria) -> AggregateSummaries {
    build_summaries(&apply_filters(dataset, criteria))
}

/// Everything the World Cup page shows for one set of criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldCupView {
    pub rows: usize,
    pub options: FilterOptions,
    pub summaries: AggregateSummaries,
}

impl WorldCupView {
    pub fn compute(dataset: &Dataset, criteria: &FilterCriteria) -> Self {
        let view = apply_filters(dataset, criteria);
        Self {
            rows: view.len(),
            options: derive_options(&view),
            summaries: build_summaries(&view),
        }
    }
}
