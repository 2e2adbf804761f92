//! UTF-8 segmentation into codepoint units and normalized lines.
//!
//! Both iterators here are lazy, cheap to clone (restartable), and preserve
//! source order. They are the front half of the autofit pipeline: the engine
//! fits one unit — a single codepoint or a single line — into one rectangle.

/// Whether `byte` begins a new codepoint's encoding, i.e. is not a UTF-8
/// continuation byte (top two bits `10`).
pub fn is_lead_byte(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

/// Split text into one unit per Unicode codepoint, using the lead-byte rule.
///
/// Handles 1–4-byte encodings, including supplementary-plane codepoints:
///
/// ```
/// use text_autofit::segment::codepoints;
///
/// assert_eq!(codepoints("abあいう漢字").count(), 7);
/// assert_eq!(codepoints("𠮷").count(), 1);
/// assert_eq!(codepoints("😃😃").count(), 2);
/// ```
pub fn codepoints(text: &str) -> Codepoints<'_> {
    Codepoints { rest: text }
}

/// Iterator over single-codepoint slices of a string, see [codepoints].
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Codepoints<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        let mut end = 1;
        while end < bytes.len() && !is_lead_byte(bytes[end]) {
            end += 1;
        }
        let (unit, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(unit)
    }
}

/// Like [codepoints], but over raw bytes that are not required to be valid
/// UTF-8. Malformed sequences are grouped opportunistically by the same
/// lead-byte rule rather than rejected: stray continuation bytes attach to
/// whatever unit precedes them.
pub fn codepoint_groups(bytes: &[u8]) -> CodepointGroups<'_> {
    CodepointGroups { rest: bytes }
}

/// Iterator over byte groups, see [codepoint_groups].
#[derive(Debug, Clone)]
pub struct CodepointGroups<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for CodepointGroups<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        let mut end = 1;
        while end < self.rest.len() && !is_lead_byte(self.rest[end]) {
            end += 1;
        }
        let (group, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(group)
    }
}

/// Replace all `"\r\n"` pairs with `"\n"`, then any remaining lone `'\r'`
/// with `"\n"`. The order matters: collapsing CRLF first avoids splitting it
/// into two line breaks. Normalizing already-normalized text is a no-op.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split text into lines on `\n`, `\r\n`, or lone `\r`, keeping empty
/// segments: consecutive breaks yield empty lines, and a trailing break
/// yields a trailing empty line. Equivalent to splitting the output of
/// [normalize_newlines] on every `'\n'`, but without allocating.
pub fn lines(text: &str) -> Lines<'_> {
    Lines { rest: Some(text) }
}

/// Iterator over the lines of a string, see [lines].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.find(['\n', '\r']) {
            None => {
                self.rest = None;
                Some(rest)
            }
            Some(i) => {
                let line = &rest[..i];
                let tail = &rest[i..];
                self.rest = Some(if let Some(after) = tail.strip_prefix("\r\n") {
                    after
                } else {
                    &tail[1..]
                });
                Some(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codepoint_counts_match_chars() {
        for text in ["", "hello", "abあいう漢字", "𠮷", "😃😃", "テスト森鷗外"] {
            assert_eq!(
                codepoints(text).count(),
                text.chars().count(),
                "count mismatch for {text:?}"
            );
        }
    }

    #[test]
    fn codepoints_concatenate_to_input() {
        for text in ["hello", "abあいう漢字", "𠮷", "😃😃"] {
            let joined: String = codepoints(text).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn codepoints_preserve_order_and_content() {
        let units: Vec<&str> = codepoints("abあいう漢字").collect();
        assert_eq!(units, vec!["a", "b", "あ", "い", "う", "漢", "字"]);
    }

    #[test]
    fn codepoints_are_restartable() {
        let iter = codepoints("漢字");
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn groups_tolerate_malformed_bytes() {
        // a stray pair of continuation bytes attaches to the preceding unit
        let bytes = [0x61, 0x80, 0x80, 0x62];
        let groups: Vec<&[u8]> = codepoint_groups(&bytes).collect();
        assert_eq!(groups, vec![&[0x61, 0x80, 0x80][..], &[0x62][..]]);

        // leading continuation bytes form their own opportunistic group
        let bytes = [0x80, 0x80, 0x61];
        let groups: Vec<&[u8]> = codepoint_groups(&bytes).collect();
        assert_eq!(groups, vec![&[0x80, 0x80][..], &[0x61][..]]);
    }

    #[test]
    fn normalization_collapses_crlf_before_lone_cr() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_newlines("a\r\nb\rc\nd");
        assert_eq!(normalize_newlines(&once), once);
    }

    #[test]
    fn lines_split_on_all_break_kinds() {
        let split: Vec<&str> = lines("a\r\nb\rc\nd").collect();
        assert_eq!(split, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_lines_are_preserved() {
        let split: Vec<&str> = lines("a\n\nb").collect();
        assert_eq!(split, vec!["a", "", "b"]);
    }

    #[test]
    fn trailing_newline_yields_trailing_empty_line() {
        let split: Vec<&str> = lines("a\n").collect();
        assert_eq!(split, vec!["a", ""]);
    }

    #[test]
    fn lines_match_normalized_split() {
        for text in ["", "a", "a\r\nb\rc\nd", "\n\n", "x\r\r\ny", "end\r"] {
            let lazy: Vec<&str> = lines(text).collect();
            let normalized = normalize_newlines(text);
            let eager: Vec<&str> = normalized.split('\n').collect();
            assert_eq!(lazy, eager, "mismatch for {text:?}");
        }
    }
}
