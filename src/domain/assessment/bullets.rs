//! Bullet extraction from a section body.

/// Converts a section body into its sequence of cleaned bullet strings.
///
/// Keeps only the lines whose trimmed form starts with a hyphen marker,
/// strips the marker and any inline bold emphasis, and trims whitespace.
/// A body written as prose rather than bullets yields an empty sequence;
/// the slide builder decides what to do with that.
pub fn extract_bullets(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix('-')?;
            Some(strip_bold(rest).trim().to_string())
        })
        .collect()
}

/// Removes markdown bold emphasis markers from text.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_hyphen_lines_only() {
        let text = "Intro prose line\n- First item\nmore prose\n- Second item\n";
        assert_eq!(extract_bullets(text), vec!["First item", "Second item"]);
    }

    #[test]
    fn strips_marker_and_bold_emphasis() {
        let text = "- **Kanban board** for flow\n-   Spaced   marker\n";
        assert_eq!(
            extract_bullets(text),
            vec!["Kanban board for flow", "Spaced   marker"]
        );
    }

    #[test]
    fn indented_bullets_are_recognized() {
        let text = "  - Indented item\n\t- Tabbed item\n";
        assert_eq!(extract_bullets(text), vec!["Indented item", "Tabbed item"]);
    }

    #[test]
    fn prose_only_body_yields_empty_sequence() {
        let text = "An Agile approach fits this team.\nNo list here.";
        assert!(extract_bullets(text).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(extract_bullets("").is_empty());
    }

    #[test]
    fn preserves_source_order() {
        let text = "- c\n- a\n- b\n";
        assert_eq!(extract_bullets(text), vec!["c", "a", "b"]);
    }

    proptest! {
        /// Re-extracting an already-extracted sequence reproduces it exactly.
        #[test]
        fn extraction_is_idempotent(lines in proptest::collection::vec("[a-zA-Z0-9 ]{1,40}", 0..8)) {
            let source: String = lines
                .iter()
                .map(|l| format!("- {}\n", l))
                .collect();
            let first = extract_bullets(&source);

            let rejoined: String = first
                .iter()
                .map(|b| format!("- {}\n", b))
                .collect();
            let second = extract_bullets(&rejoined);

            prop_assert_eq!(first, second);
        }
    }
}
