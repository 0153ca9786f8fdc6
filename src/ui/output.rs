use std::path::Path;

use crate::config::ConfigWarning;
use crate::error::SelectorError;

use super::theme::{icon, icons, icons_ascii};

/// Format unknown-key warnings the way they are shown on stderr
pub fn format_config_warnings(path: &Path, warnings: &[ConfigWarning], unicode: bool) -> String {
    let mark = icon(unicode, icons::WARNING, icons_ascii::WARNING);
    let mut out = String::new();
    for w in warnings {
        match w.line {
            Some(line) => out.push_str(&format!(
                "{} Unknown config key '{}' in {}:{}\n",
                mark,
                w.key,
                path.display(),
                line
            )),
            None => out.push_str(&format!(
                "{} Unknown config key '{}' in {}\n",
                mark,
                w.key,
                path.display()
            )),
        }

        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
        }
    }
    out
}

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning], unicode: bool) {
    eprint!("{}", format_config_warnings(path, warnings, unicode));
}

/// Report a config file that was skipped because it failed to load
pub fn format_config_error(path: &Path, err: &SelectorError, unicode: bool) -> String {
    let mark = icon(unicode, icons::WARNING, icons_ascii::WARNING);
    format!("{} Ignoring config {}: {}\n", mark, path.display(), err)
}

pub fn print_config_error(path: &Path, err: &SelectorError, unicode: bool) {
    eprint!("{}", format_config_error(path, err, unicode));
}

/// Print a fatal error to stderr
pub fn print_error(err: &anyhow::Error, unicode: bool) {
    let mark = icon(unicode, icons::ERROR, icons_ascii::ERROR);
    eprintln!("{} Error: {}", mark, err);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
}
