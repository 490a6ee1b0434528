use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::DEFAULT_DATA_PATH;
use crate::state::initial_path;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub start_path: String,
    pub tick_rate: Duration,
}

impl AppConfig {
    /// Reads `.env.local`, `.env`, the process environment and then `args`
    /// (without the program name). Later sources win.
    pub fn load(args: &[String]) -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok(), args)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, args: &[String]) -> Self {
        let data_path = parse_path_arg(args, "--data")
            .or_else(|| {
                lookup("SSA_DATA_PATH")
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let start_path = initial_path(lookup("SSA_START_PATH").as_deref());
        let tick_ms = lookup("SSA_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            data_path,
            start_path,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }
}

/// Accepts both `--flag value` and `--flag=value`.
pub fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_env_or_args() {
        let cfg = AppConfig::from_lookup(|_| None, &[]);
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.start_path, "/world_cup");
        assert_eq!(cfg.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn argument_beats_environment() {
        let lookup = |key: &str| match key {
            "SSA_DATA_PATH" => Some("env.csv".to_string()),
            "SSA_TICK_MS" => Some("5".to_string()),
            "SSA_START_PATH" => Some("/page3".to_string()),
            _ => None,
        };
        let cfg = AppConfig::from_lookup(lookup, &args(&["--data=arg.csv"]));
        assert_eq!(cfg.data_path, PathBuf::from("arg.csv"));
        assert_eq!(cfg.start_path, "/page3");
        assert_eq!(cfg.tick_rate, Duration::from_millis(50));

        let cfg = AppConfig::from_lookup(lookup, &[]);
        assert_eq!(cfg.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn parse_path_arg_skips_dangling_flag() {
        assert_eq!(parse_path_arg(&args(&["--data"]), "--data"), None);
        assert_eq!(
            parse_path_arg(&args(&["--data", "x.csv"]), "--data"),
            Some(PathBuf::from("x.csv"))
        );
    }
}
