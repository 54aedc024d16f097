//! Terminal styling.

/// ANSI escape sequences.
mod colors {
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Dimmed text.
    pub const DIM: &str = "\x1b[2m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
}

/// Formats text as a header (bold cyan).
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_wrap_and_reset() {
        let h = header("Verses");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(dim("x").contains(colors::DIM));
        assert!(warning("x").contains(colors::YELLOW));
        assert!(subheader("x").contains("x"));
    }
}
