// 🔤 Text Normalization - Canonical form for fuzzy comparison
//
// "JACK  ALLAN, Jr." and "jack allan jr" must look identical before any
// similarity scoring happens. Normalization is total and idempotent.

/// Normalize free text for matching.
///
/// - Lowercase
/// - Strip punctuation and symbols (keep letters, digits, whitespace)
/// - Collapse whitespace runs to single spaces
/// - Trim leading/trailing whitespace
///
/// Example: "  O'Brien,  PATRICK " → "obrien patrick"
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text is empty or whitespace-only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Jack Allan  "), "jack allan");
        assert_eq!(normalize("NORTH"), "north");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("O'Brien, Patrick"), "obrien patrick");
        assert_eq!(normalize("Smith-Jones (temp)"), "smithjones temp");
        assert_eq!(normalize("J. R. Allan Jr."), "j r allan jr");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("jack\t\tallan"), "jack allan");
        assert_eq!(normalize("jack   allan\n"), "jack allan");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Jack   Allan ",
            "O'Brien, Patrick",
            "",
            "   ",
            "north-WEST região",
        ];

        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" x "));
    }
}
