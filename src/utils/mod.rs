// Tue Feb 03 2026 - Alex

pub mod logging;

pub use logging::{LoggingUtils, ScopedTimer};

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "command", "commands"), "1 command");
        assert_eq!(pluralize(3, "command", "commands"), "3 commands");
    }
}
