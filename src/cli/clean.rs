use std::path::Path;

use crate::cleaning::CleaningPolicy;
use crate::cli::cleaned_batch;
use crate::error::Result;
use crate::export;
use crate::settings::load_settings;

pub fn run(
    file: &str,
    include_critical: bool,
    exclude_errors: bool,
    exclude_warnings: bool,
    output: Option<&str>,
) -> Result<()> {
    let defaults = load_settings()?.cleaning_policy();
    let policy = CleaningPolicy {
        include_critical: include_critical || defaults.include_critical,
        include_errors: defaults.include_errors && !exclude_errors,
        include_warnings: defaults.include_warnings && !exclude_warnings,
    };
    let (settings, batch) = cleaned_batch(file, Some(policy))?;
    let delimiter = settings.delimiter_byte()?;
    let kept = batch.cleaned().len();
    let total = batch.validations().len();

    match output {
        Some(path) => {
            export::write_file(batch.cleaned(), Path::new(path), delimiter)?;
            println!("Kept {kept} of {total} transactions, written to {path}");
        }
        None => {
            print!("{}", export::to_delimited(batch.cleaned(), delimiter)?);
            eprintln!("Kept {kept} of {total} transactions");
        }
    }
    Ok(())
}
