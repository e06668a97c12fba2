//! CLI Check-Config Command
//!
//! Prints the validation report for a config file.

use anyhow::Result;
use std::path::Path;
use yomiage_config::{validate, YomiageConfig};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

pub fn run(path: &Path, config: &YomiageConfig) -> Result<()> {
    println!("\n🔍 Checking {}\n", path.display());
    if !path.exists() {
        note_info("No config file; built-in defaults apply");
    }

    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    println!();
    if report.is_valid() {
        note_success(&format!(
            "Config is valid (reading {}, locale prefix '{}', log level {})",
            if config.reading_enabled() { "on" } else { "off" },
            config.locale_prefix(),
            config.log_level(),
        ));
        Ok(())
    } else {
        anyhow::bail!("{} config error(s)", report.errors.len())
    }
}
