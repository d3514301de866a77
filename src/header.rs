//! Leading header comment detection.
//!
//! The header is the first block comment at the top of a file. Leading blank
//! lines, line comments, `#` directives (build tags, shebangs, pragmas) and
//! a `<?php` opening tag may precede it; they are never part of the extracted
//! span and survive a replacement untouched. Only the first block comment is considered, and
//! the match is non-greedy so the first `*/` closes it.
//!
//! A custom pattern may be supplied. When it has a capture group named
//! `header`, that group is the header span; otherwise the whole match is.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Default header pattern: optional preamble lines, then a `/* ... */` block.
pub const DEFAULT_HEADER_PATTERN: &str =
    r"(?s)\A(?:[ \t]*(?:(?://|#|<\?)[^\n]*)?\r?\n)*[ \t]*(?P<header>/\*.*?\*/)";

const LICENSE_KEYWORDS: [&str; 2] = ["copyright", "license"];

fn default_regex() -> &'static Regex {
    static DEFAULT: OnceLock<Regex> = OnceLock::new();
    DEFAULT.get_or_init(|| Regex::new(DEFAULT_HEADER_PATTERN).expect("default header pattern"))
}

#[derive(Debug, Clone)]
/// Locates the header comment of a file.
pub struct HeaderMatcher {
    regex: Regex,
}

impl Default for HeaderMatcher {
    fn default() -> Self {
        Self {
            regex: default_regex().clone(),
        }
    }
}

impl HeaderMatcher {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Matcher for `regex`, or the default one when `None`.
    pub fn from_option(regex: Option<&Regex>) -> Self {
        regex.cloned().map(Self::new).unwrap_or_default()
    }

    /// Byte range of the header within `content`, if any.
    pub fn span(&self, content: &str) -> Option<Range<usize>> {
        let caps = self.regex.captures(content)?;
        let m = caps.name("header").or_else(|| caps.get(0))?;
        Some(m.range())
    }

    /// The header text, or an empty string when the file has none.
    pub fn extract<'a>(&self, content: &'a str) -> &'a str {
        match self.span(content) {
            Some(range) => &content[range],
            None => "",
        }
    }

    /// True when the header mentions `copyright` or `license`, ignoring case.
    ///
    /// Any such comment counts as a license header, even when it is not the
    /// canonical one.
    pub fn contains_license_header(&self, content: &str) -> bool {
        let header = self.extract(content).to_lowercase();
        LICENSE_KEYWORDS.iter().any(|kw| header.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_extract_first_block_comment() {
        let m = HeaderMatcher::default();
        assert_eq!(
            m.extract(&fixtures::with_target_license()),
            fixtures::TARGET_HEADER.trim()
        );
        assert_eq!(
            m.extract("/* copyright */\nlorem ipsum dolor sit amet"),
            "/* copyright */"
        );
    }

    #[test]
    fn test_extract_stops_at_first_close() {
        let m = HeaderMatcher::default();
        let content = "/* first */\n\n/* second license */\nfn main() {}\n";
        assert_eq!(m.extract(content), "/* first */");
        assert!(!m.contains_license_header(content));
    }

    #[test]
    fn test_extract_ignores_comment_after_code() {
        let m = HeaderMatcher::default();
        let content = "fn main() {}\n/* Copyright 2020 */\n";
        assert_eq!(m.extract(content), "");
        assert!(!m.contains_license_header(content));
    }

    #[test]
    fn test_extract_skips_build_tag_preamble() {
        let m = HeaderMatcher::default();
        let content = fixtures::with_build_tag(fixtures::OTHER_HEADER);
        assert_eq!(m.extract(&content), fixtures::OTHER_HEADER.trim());
        let span = m.span(&content).unwrap();
        assert_eq!(&content[..span.start], "\n// +build tools\n\n");
    }

    #[test]
    fn test_extract_after_php_open_tag() {
        let m = HeaderMatcher::default();
        let content = "<?php\n/* Copyright 2019 Old Corp */\necho 1;\n";
        assert_eq!(m.extract(content), "/* Copyright 2019 Old Corp */");
        assert!(m.contains_license_header(content));
    }

    #[test]
    fn test_contains_license_header() {
        let m = HeaderMatcher::default();
        assert!(m.contains_license_header(&fixtures::with_target_license()));
        assert!(m.contains_license_header(&fixtures::with_other_license()));
        assert!(!m.contains_license_header(&fixtures::without_license()));
        assert!(m.contains_license_header("/* LICENSE: Apache-2.0 */\nx"));
        assert!(!m.contains_license_header("/* just a note */\nx"));
    }

    #[test]
    fn test_custom_regex_whole_match() {
        let re = Regex::new(r"\A(?:#[^\n]*\n)+").unwrap();
        let m = HeaderMatcher::new(re);
        let content = "# Copyright 2021 Acme\n# SPDX: MIT\n\nimport os\n";
        assert_eq!(m.extract(content), "# Copyright 2021 Acme\n# SPDX: MIT\n");
        assert!(m.contains_license_header(content));
    }

    #[test]
    fn test_from_option_falls_back_to_default() {
        let m = HeaderMatcher::from_option(None);
        assert_eq!(m.extract("/* a */ b"), "/* a */");
    }
}
