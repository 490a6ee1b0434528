use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::filters::{FilterField, FilteredView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Selectable values per categorical picker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub fields: BTreeMap<FilterField, Vec<SelectOption>>,
}

impl FilterOptions {
    pub fn get(&self, field: FilterField) -> &[SelectOption] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn values(&self, field: FilterField) -> impl Iterator<Item = &str> {
        self.get(field).iter().map(|opt| opt.value.as_str())
    }
}

/// Distinct non-missing values of each field within `view`, ascending.
pub fn derive_options(view: &FilteredView<'_>) -> FilterOptions {
    let fields = FilterField::ALL
        .iter()
        .map(|field| (*field, field_options(view, *field)))
        .collect();
    FilterOptions { fields }
}

fn field_options(view: &FilteredView<'_>, field: FilterField) -> Vec<SelectOption> {
    let distinct: BTreeSet<&str> = view.iter().filter_map(|r| field.value(r)).collect();
    distinct
        .into_iter()
        .map(|v| SelectOption {
            label: v.to_string(),
            value: v.to_string(),
        })
        .collect()
}
