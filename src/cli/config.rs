use std::path::Path;

use crate::cli::print_json;
use crate::error::Result;
use crate::settings::{load_settings, load_taxonomy, save_settings, settings_path, shellexpand_path};
use crate::taxonomy::CategoryTaxonomy;

pub fn show() -> Result<()> {
    let settings = load_settings()?;
    println!("Settings:   {}", settings_path().display());
    println!("Delimiter:  {:?}", settings.delimiter);
    println!("Strict:     {}", settings.strict_headers);
    println!(
        "Taxonomy:   {}",
        settings.taxonomy_path.as_deref().unwrap_or("(built-in)")
    );
    println!("Fixed:      {}", settings.fixed_expense_categories.join(", "));
    println!(
        "Cleaning:   critical={} errors={} warnings={}",
        settings.include_critical, settings.include_errors, settings.include_warnings
    );
    Ok(())
}

/// Dump the taxonomy in the on-disk layout, ready to edit and load back.
pub fn taxonomy() -> Result<()> {
    let settings = load_settings()?;
    print_json(&load_taxonomy(&settings)?.to_file())
}

pub fn set_fixed(categories: Vec<String>) -> Result<()> {
    let mut settings = load_settings()?;
    settings.fixed_expense_categories = categories;
    save_settings(&settings)?;
    println!(
        "Fixed expense categories: {}",
        settings.fixed_expense_categories.join(", ")
    );
    Ok(())
}

pub fn set_taxonomy(path: &str) -> Result<()> {
    let expanded = shellexpand_path(path);
    // reject a broken file before it is saved
    CategoryTaxonomy::load(Path::new(&expanded))?;
    let mut settings = load_settings()?;
    settings.taxonomy_path = Some(expanded.clone());
    save_settings(&settings)?;
    println!("Taxonomy set to {expanded}");
    Ok(())
}
