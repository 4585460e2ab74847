use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tally_ingest::ParseOptions;

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParseOptions,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

pub fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(ensure_tally_home()?.join("config.toml")),
    }
}

pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let p = config_path(override_path)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, override_path: Option<&Path>) -> Result<PathBuf> {
    let p = config_path(override_path)?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(override_path: Option<&Path>) -> Result<()> {
    let p = config_path(override_path)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default(), override_path)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_ingest::DateOrder;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg = parse_config("[parser]\ndate_order = \"month-first\"\n").unwrap();
        assert_eq!(cfg.parser.date_order, DateOrder::MonthFirst);
        assert_eq!(cfg.parser.header_scan_window, 15);
        assert!(!cfg.parser.return_diagnostics);
        assert!(!cfg.output.pretty);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_default_config_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_unknown_date_order() {
        assert!(parse_config("[parser]\ndate_order = \"year-first\"\n").is_err());
    }
}
