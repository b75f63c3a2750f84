//! Terminal presentation preferences, resolved once from flags and env.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let prefs = resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    );
    let _ = UI_PREFS.set(prefs);
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

fn resolve(flags: &GlobalFlags, is_tty: bool, no_color: bool, columns: Option<&str>) -> UiPrefs {
    let table = flags.format == OutputFormat::Table;
    let table_color = match flags.color {
        ColorMode::Always => table,
        ColorMode::Never => false,
        ColorMode::Auto => table && is_tty && !flags.quiet && !no_color,
    };
    let term_width = columns
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= MIN_TERM_WIDTH);

    UiPrefs {
        table_color,
        term_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet: false,
            color,
        }
    }

    #[test]
    fn auto_color_needs_a_tty_and_no_opt_out() {
        let table = flags(OutputFormat::Table, ColorMode::Auto);
        assert!(resolve(&table, true, false, None).table_color);
        assert!(!resolve(&table, false, false, None).table_color);
        assert!(!resolve(&table, true, true, None).table_color);
    }

    #[test]
    fn json_is_never_colored() {
        let json = flags(OutputFormat::Json, ColorMode::Always);
        assert!(!resolve(&json, true, false, None).table_color);
    }

    #[test]
    fn tiny_or_garbage_columns_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never);
        assert_eq!(resolve(&table, true, false, Some("120")).term_width, Some(120));
        assert_eq!(resolve(&table, true, false, Some("20")).term_width, None);
        assert_eq!(resolve(&table, true, false, Some("wide")).term_width, None);
    }
}
