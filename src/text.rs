use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes a free-text institution name for dedup comparison.
///
/// Lower-cases, strips accents (NFKD decomposition, combining marks dropped),
/// removes every character except word characters, whitespace, `&`, `.` and
/// `-`, then collapses whitespace runs to a single space. Idempotent; empty
/// or whitespace-only input yields an empty string, which callers must never
/// use as a dedup key.
pub fn normalize_for_match(s: &str) -> String {
    let folded: String = s
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '&' | '.' | '-')
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Field access by column name, for records that dedupe on named fields.
pub trait FieldValues {
    /// Returns the value of the named field, or `""` for unknown names.
    fn field(&self, name: &str) -> &str;
}

/// Removes duplicate records, keeping the first occurrence in input order.
///
/// The key is the tuple of the named fields' trimmed raw values. Callers
/// decide whether the fields hold normalized or raw text.
pub fn dedupe_rows<T: FieldValues>(rows: Vec<T>, key_fields: &[&str]) -> Vec<T> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            let key: Vec<String> = key_fields
                .iter()
                .map(|f| row.field(f).trim().to_string())
                .collect();
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic_equivalence() {
        assert_eq!(normalize_for_match("Ofgem"), "ofgem");
        assert_eq!(normalize_for_match("  OFGEM "), "ofgem");
        assert_eq!(normalize_for_match("Ofgem."), "ofgem.");
        assert_eq!(normalize_for_match("OFGEM"), normalize_for_match("ofgem"));
    }

    #[test]
    fn test_normalize_accent_folding() {
        assert_eq!(
            normalize_for_match("Comisión Nacional de Energía"),
            "comision nacional de energia"
        );
        assert_eq!(normalize_for_match("Électricité"), "electricite");
    }

    #[test]
    fn test_normalize_kept_characters() {
        // `&`, `.` and `-` survive; other punctuation does not.
        assert_eq!(normalize_for_match("Power & Light Co."), "power & light co.");
        assert_eq!(normalize_for_match("E-Control"), "e-control");
        assert_eq!(
            normalize_for_match("Energy, Mines (and) Resources!"),
            "energy mines and resources"
        );
    }

    #[test]
    fn test_normalize_whitespace_collapse() {
        assert_eq!(normalize_for_match("a  \t b\n c"), "a b c");
        // Removed punctuation never leaves a double space behind.
        assert_eq!(normalize_for_match("a , b"), "a b");
    }

    #[test]
    fn test_normalize_idempotence() {
        for input in [
            "Kenya Power and Lighting Company",
            "  Comisión   Reguladora, de Energía  ",
            "E.ON — Grid (Ops)",
            "",
            "   ",
            "a , b",
        ] {
            let once = normalize_for_match(input);
            assert_eq!(normalize_for_match(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert_eq!(normalize_for_match(""), "");
        assert_eq!(normalize_for_match("   \t\n"), "");
        assert_eq!(normalize_for_match("()!?"), "");
    }

    struct Row {
        a: String,
        b: String,
    }

    impl FieldValues for Row {
        fn field(&self, name: &str) -> &str {
            match name {
                "a" => &self.a,
                "b" => &self.b,
                _ => "",
            }
        }
    }

    fn row(a: &str, b: &str) -> Row {
        Row {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let rows = vec![
            row("x", "1"),
            row("y", "2"),
            row("x", "1"),
            row("z", "3"),
            row("y", "2"),
        ];
        let out = dedupe_rows(rows, &["a", "b"]);
        let keys: Vec<&str> = out.iter().map(|r| r.a.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_dedupe_key_values_are_trimmed() {
        let rows = vec![row(" x ", "1"), row("x", "1 ")];
        let out = dedupe_rows(rows, &["a", "b"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].a, " x ");
    }

    #[test]
    fn test_dedupe_distinguishes_on_second_field() {
        let rows = vec![row("x", "1"), row("x", "2")];
        let out = dedupe_rows(rows, &["a", "b"]);
        assert_eq!(out.len(), 2);
    }
}
