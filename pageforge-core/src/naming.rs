//! Display-name and key normalization helpers.

use unicode_segmentation::UnicodeSegmentation;

/// Convert a slug or filename stem to a display title.
///
/// Hyphens and underscores become spaces and each word is capitalized.
///
/// # Examples
///
/// ```
/// use pageforge_core::naming::title_case;
///
/// assert_eq!(title_case("drag-and-drop"), "Drag And Drop");
/// assert_eq!(title_case("getting_started"), "Getting Started");
/// ```
pub fn title_case(input: &str) -> String {
    input
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut graphemes = word.graphemes(true);
    match graphemes.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
        None => String::new(),
    }
}

/// Convert a documentation-root name to a filesystem- and URL-safe key.
///
/// Lowercases, replaces whitespace with hyphens, drops anything that is not
/// alphanumeric or a hyphen, and collapses hyphen runs.
///
/// # Examples
///
/// ```
/// use pageforge_core::naming::filenamify;
///
/// assert_eq!(filenamify("Getting Started"), "getting-started");
/// assert_eq!(filenamify("API / Reference"), "api-reference");
/// ```
pub fn filenamify(name: &str) -> String {
    let lowered = name.to_lowercase();

    let replaced: String = lowered
        .graphemes(true)
        .map(|g| {
            let c = g.chars().next();
            match c {
                Some(c) if c.is_whitespace() => "-".to_string(),
                Some(c) if c.is_alphanumeric() || c == '-' => g.to_string(),
                _ => "-".to_string(),
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(replaced.len());
    let mut last_was_hyphen = false;
    for c in replaced.chars() {
        if c == '-' {
            if !last_was_hyphen {
                collapsed.push('-');
            }
            last_was_hyphen = true;
        } else {
            collapsed.push(c);
            last_was_hyphen = false;
        }
    }

    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_basic() {
        assert_eq!(title_case("badge"), "Badge");
        assert_eq!(title_case("drag-and-drop"), "Drag And Drop");
        assert_eq!(title_case("getting_started"), "Getting Started");
    }

    #[test]
    fn test_title_case_collapses_separators() {
        assert_eq!(title_case("a--b"), "A B");
        assert_eq!(title_case("  spaced  out  "), "Spaced Out");
    }

    #[test]
    fn test_title_case_unicode() {
        assert_eq!(title_case("état-global"), "État Global");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("---"), "");
    }

    #[test]
    fn test_filenamify_basic() {
        assert_eq!(filenamify("Docs"), "docs");
        assert_eq!(filenamify("Getting Started"), "getting-started");
    }

    #[test]
    fn test_filenamify_strips_invalid_characters() {
        assert_eq!(filenamify("API / Reference"), "api-reference");
        assert_eq!(filenamify("What's New?"), "what-s-new");
    }

    #[test]
    fn test_filenamify_collapses_hyphens() {
        assert_eq!(filenamify("a  --  b"), "a-b");
        assert_eq!(filenamify("--edges--"), "edges");
    }
}
