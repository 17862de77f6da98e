//! Locating the JSON payload inside raw `typst query` output.
//!
//! typst may print warnings before or after the payload, so the output is
//! scanned for the start of an array of query results and then walked
//! structurally until that array closes.

/// Start of a query result array: `[{"func"`.
pub const MARKER: &str = r#"[{"func""#;

/// Extract the JSON array region from raw command output.
///
/// Returns `None` when the output holds no query result at all. When the
/// array never closes (truncated output) the region runs to the first line
/// break after the marker, or to the end of the text.
///
/// # Example
///
/// ```ignore
/// let raw = r#"warning: x [{"func":"metadata","value":{}}] trailing"#;
/// assert_eq!(find_json_region(raw), Some(r#"[{"func":"metadata","value":{}}]"#));
/// ```
pub fn find_json_region(raw: &str) -> Option<&str> {
    let start = raw.find(MARKER)?;
    let rest = &raw[start..];

    let region = match closing_index(rest) {
        Some(end) => &rest[..=end],
        None => {
            let line = rest.find('\n').map_or(rest, |nl| &rest[..nl]);
            line.trim_end_matches('\r')
        }
    };
    Some(region)
}

/// Byte index of the `]` closing the array that opens at index 0.
///
/// Tracks nesting of `[`/`{` and skips string literals (with `\` escapes),
/// so `]` inside strings or nested arrays does not end the region. A
/// mismatched closer means the text is not a well-formed array.
fn closing_index(text: &str) -> Option<usize> {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    // Delimiters are ASCII, so byte positions are always char boundaries
    for (i, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => stack.push(byte),
            b']' | b'}' => {
                let open = if byte == b']' { b'[' } else { b'{' };
                if stack.pop() != Some(open) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
