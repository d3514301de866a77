//! Header insertion and replacement.
//!
//! Both operations are plain text surgery on the file content. Replacement
//! substitutes the located header span in place, so anything before it
//! (build tags, shebangs) and everything after it is kept byte for byte.

use crate::header::HeaderMatcher;

/// Prepend the trimmed `header` followed by one blank line. Leading blank
/// lines of `content` are dropped; the rest is untouched.
pub fn insert(content: &str, header: &str) -> String {
    let body = content.trim_start_matches(['\n', '\r']);
    let header = header.trim();
    let mut out = String::with_capacity(header.len() + 2 + body.len());
    out.push_str(header);
    out.push_str("\n\n");
    out.push_str(body);
    out
}

/// Swap the existing header span for the trimmed `header`.
///
/// Content without a header gets one inserted instead.
pub fn replace(matcher: &HeaderMatcher, content: &str, header: &str) -> String {
    let Some(span) = matcher.span(content) else {
        return insert(content, header);
    };
    let header = header.trim();
    let mut out = String::with_capacity(content.len() - span.len() + header.len());
    out.push_str(&content[..span.start]);
    out.push_str(header);
    out.push_str(&content[span.end..]);
    out
}
