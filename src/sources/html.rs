//! Helpers for turning scraped HTML fragments into plain lyrics text.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>\r?\n?").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// First capture group of `pattern` in `html`, converted to text.
///
/// Returns `None` when the pattern does not match or the block is blank.
pub fn capture_text(html: &str, pattern: &Regex) -> Option<String> {
    let fragment = pattern.captures(html)?.get(1)?.as_str();
    non_blank(to_text(fragment))
}

/// All first-group captures of `pattern`, converted and joined by newlines.
pub fn capture_all_text(html: &str, pattern: &Regex) -> Option<String> {
    let parts: Vec<String> = pattern
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| to_text(m.as_str())))
        .filter(|s| !s.is_empty())
        .collect();
    non_blank(parts.join("\n"))
}

/// Convert an HTML fragment to text.
///
/// `<br>` becomes a newline, every other tag is dropped, entities are
/// decoded and each line is trimmed.
pub fn to_text(fragment: &str) -> String {
    let text = LINE_BREAK.replace_all(fragment, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let text = lines.join("\n");
    BLANK_RUN.replace_all(text.trim(), "\n\n").into_owned()
}

/// Decode the named entities lyrics pages use plus numeric references.
pub fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Build a URL path slug: words kept, everything else collapsed to `sep`.
pub fn slug(value: &str, sep: char, lowercase: bool) -> String {
    let words: Vec<String> = value
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.replace('\'', ""))
        .filter(|w| !w.is_empty())
        .map(|w| if lowercase { w.to_lowercase() } else { w })
        .collect();
    words.join(&sep.to_string())
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text_handles_breaks_and_tags() {
        let html = "First line<br>\n<i>Second</i> line<br/>\r\nThird &amp; last";
        assert_eq!(to_text(html), "First line\nSecond line\nThird & last");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("It&#39;s &#x2019;"), "It's \u{2019}");
    }

    #[test]
    fn test_capture_text_blank_block_is_none() {
        let re = Regex::new(r"(?s)<div class='x'>(.*?)</div>").unwrap();
        assert_eq!(capture_text("<div class='x'>  <br> </div>", &re), None);
        assert_eq!(
            capture_text("<div class='x'>la<br>la</div>", &re).as_deref(),
            Some("la\nla")
        );
    }

    #[test]
    fn test_capture_all_text_joins_blocks() {
        let re = Regex::new(r"(?s)<p>(.*?)</p>").unwrap();
        let html = "<p>one</p><p></p><p>two</p>";
        assert_eq!(capture_all_text(html, &re).as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Don't Stop Me Now", '-', false), "Dont-Stop-Me-Now");
        assert_eq!(slug("AC/DC", '_', true), "ac_dc");
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(to_text("a<br><br><br><br>b"), "a\n\nb");
    }
}
