pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filters;
pub mod options;
pub mod pages;
pub mod router;
pub mod state;
pub mod summaries;
pub mod ui;
