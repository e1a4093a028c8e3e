//! Version command implementation.

use crate::output::Rendered;

/// Execute the version command.
pub fn execute_version() -> Rendered {
    Rendered::Text(format!("Hiarc CLI v{}", env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        match execute_version() {
            Rendered::Text(line) => assert!(line.starts_with("Hiarc CLI v")),
            other => panic!("Expected text, got {:?}", other),
        }
    }
}
