//! Terminal color helpers

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold heading in the given color
pub fn heading(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}{}", Colors::BOLD, color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// KPI values are white when present and dimmed when unavailable
pub fn kpi_color(available: bool) -> &'static str {
    if available {
        Colors::BRIGHT_WHITE
    } else {
        Colors::DIM
    }
}

/// Whether stdout should receive ANSI escapes
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        Err(_) => env::var("TERM_PROGRAM").is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_colorize_with_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        assert_eq!(colorize("800.0", Colors::YELLOW), "800.0");
        assert_eq!(heading("Key Indicators", Colors::BRIGHT_CYAN), "Key Indicators");
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_force_color_enables_formatting() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(supports_formatting());
        assert_eq!(
            colorize("n/a", Colors::DIM),
            format!("{}n/a{}", Colors::DIM, Colors::RESET)
        );
        unsafe {
            std::env::set_var("FORCE_COLOR", "0");
        }
        assert!(!supports_formatting());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_formatting_disabled_in_tests() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
        assert!(!supports_formatting());
    }

    #[test]
    fn test_kpi_color() {
        assert_eq!(kpi_color(true), Colors::BRIGHT_WHITE);
        assert_eq!(kpi_color(false), Colors::DIM);
    }
}
