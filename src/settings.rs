use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cleaning::CleaningPolicy;
use crate::error::{LedgerError, Result};
use crate::taxonomy::CategoryTaxonomy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tertiary categories treated as non-discretionary by the rigidity score.
    pub fixed_expense_categories: Vec<String>,
    pub delimiter: char,
    pub strict_headers: bool,
    /// JSON taxonomy file replacing the built-in one.
    pub taxonomy_path: Option<String>,
    pub include_critical: bool,
    pub include_errors: bool,
    pub include_warnings: bool,
}

pub const DEFAULT_FIXED_CATEGORIES: &[&str] = &["房租", "房贷", "物业费", "保险", "水电煤", "通讯费"];

impl Default for Settings {
    fn default() -> Self {
        let policy = CleaningPolicy::default();
        Self {
            fixed_expense_categories: DEFAULT_FIXED_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            delimiter: ',',
            strict_headers: false,
            taxonomy_path: None,
            include_critical: policy.include_critical,
            include_errors: policy.include_errors,
            include_warnings: policy.include_warnings,
        }
    }
}

impl Settings {
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }

    pub fn cleaning_policy(&self) -> CleaningPolicy {
        CleaningPolicy {
            include_critical: self.include_critical,
            include_errors: self.include_errors,
            include_warnings: self.include_warnings,
        }
    }
}

pub fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
        Ok(c as u8)
    } else {
        Err(LedgerError::Settings(format!(
            "delimiter must be a single ASCII character other than a quote or newline, got {c:?}"
        )))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ledgerscope")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| LedgerError::Settings(format!("{}: {e}", path.display())))
}

fn save_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn load_settings() -> Result<Settings> {
    load_from(&settings_path())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_to(settings, &settings_path())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// The configured taxonomy file, or the built-in table when none is set.
pub fn load_taxonomy(settings: &Settings) -> Result<CategoryTaxonomy> {
    match &settings.taxonomy_path {
        Some(p) => CategoryTaxonomy::load(Path::new(&shellexpand_path(p))),
        None => Ok(CategoryTaxonomy::builtin()),
    }
}
