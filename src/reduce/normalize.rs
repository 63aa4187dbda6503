/// Trims surrounding whitespace and lower-cases, so identity comparisons
/// ignore case and padding.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Fan Fitting \t"), "fan fitting");
    }

    #[test]
    fn test_normalize_keeps_inner_whitespace() {
        assert_eq!(normalize("Fan  Fitting"), "fan  fitting");
    }

    #[test]
    fn test_normalize_blank_is_empty() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }
}
