use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use ssa_terminal::config::{AppConfig, parse_path_arg};
use ssa_terminal::dashboard::WorldCupView;
use ssa_terminal::dataset;
use ssa_terminal::filters::CriteriaInput;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::load(&args);

    let dataset = dataset::load_csv(&config.data_path)?;
    let input = match parse_path_arg(&args, "--criteria") {
        Some(path) => read_criteria(&path)?,
        None => CriteriaInput::default(),
    };
    let criteria = input.into_criteria(&dataset)?;

    let view = WorldCupView::compute(&dataset, &criteria);
    let json = serde_json::to_string_pretty(&view).context("serialize summaries")?;
    println!("{json}");
    Ok(())
}

fn read_criteria(path: &Path) -> Result<CriteriaInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read criteria {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse criteria {}", path.display()))
}
