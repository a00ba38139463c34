//! Title normalization used to widen lyrics searches.
//!
//! Titles often carry decorations such as `(Remix)`, `(Live)` or
//! `[Remastered]` that the lyrics sites do not know about. Stripping them
//! gives a second chance at a match.
//!
//! Groups are located by the *last* occurrence of each delimiter rather than
//! by proper bracket matching, so titles with unbalanced or nested brackets
//! can be cut in surprising places. One call removes at most one `(...)`
//! group and one `[...]` group.

/// Whether the title contains anything [`strip_decoration`] could remove.
pub fn is_strippable(title: &str) -> bool {
    title.contains('(') || title.contains('[')
}

/// Remove the last parenthesized group, then the last bracketed group.
///
/// ```ignore
/// assert_eq!(strip_decoration("Song (Remix)"), "Song");
/// assert_eq!(strip_decoration("Song [Live] (Remix)"), "Song");
/// ```
pub fn strip_decoration(title: &str) -> String {
    let title = strip_last_group(title, '(', ')');
    strip_last_group(&title, '[', ']')
}

/// Remove the span between the last `open` and the last `close`.
///
/// Both delimiters must be present, otherwise the title is returned as is.
/// When the last `close` comes before the last `open`, everything from the
/// last `open` onwards is dropped.
fn strip_last_group(title: &str, open: char, close: char) -> String {
    let (Some(left), Some(right)) = (title.rfind(open), title.rfind(close)) else {
        return title.to_string();
    };

    let head = title[..left].trim_end();
    if right < left {
        return head.to_string();
    }

    let tail = &title[right + close.len_utf8()..];
    format!("{}{}", head, tail)
}
