//! Text reflow for option descriptions.

/// Maximum rendered line width.
pub const MAX_LINE_LENGTH: usize = 78;

/// Reflow space/newline-delimited text to [`MAX_LINE_LENGTH`] columns.
///
/// The relative indentation of the first word on each explicit input line
/// is preserved on top of `indent`, and wrapped continuation words align
/// under where that first word started. Embedded newlines force a break and
/// reset indentation tracking. Pure layout; no semantic effect.
pub fn wrap(text: &str, indent: usize) -> String {
    let mut out = String::new();
    let mut new_line = true;
    let mut line_offset = 0;
    let start_indent = indent;
    let mut indent = indent;
    let mut p = text;
    loop {
        let start = p;
        let spaces = p.len() - p.trim_start_matches(' ').len();
        p = &p[spaces..];
        let word_len = p.find([' ', '\n']).unwrap_or(p.len());
        let word = &p[..word_len];
        p = &p[word_len..];
        if new_line {
            indent = start_indent + spaces;
            new_line = false;
        }
        if line_offset + spaces + word.len() > MAX_LINE_LENGTH {
            // The word doesn't fit; start a new line.
            out.push('\n');
            line_offset = 0;
        }
        if line_offset == 0 {
            for _ in 0..indent {
                out.push(' ');
            }
            line_offset = indent;
            out.push_str(word);
            line_offset += word.len();
        } else {
            // Mid-line: keep the original separating spaces.
            out.push_str(&start[..spaces + word.len()]);
            line_offset += spaces + word.len();
        }
        if let Some(rest) = p.strip_prefix('\n') {
            out.push('\n');
            line_offset = 0;
            new_line = true;
            p = rest;
        }
        if p.is_empty() {
            break;
        }
    }
    if !new_line {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(wrap("hello world", 0), "hello world\n");
    }

    #[test]
    fn base_indent_is_applied() {
        assert_eq!(wrap("text", 6), "      text\n");
    }

    #[test]
    fn leading_spaces_set_the_line_indent() {
        assert_eq!(wrap("  lead rest", 0), "  lead rest\n");
    }

    #[test]
    fn long_line_wraps_at_width() {
        let a = "a".repeat(40);
        let b = "b".repeat(40);
        let wrapped = wrap(&format!("{a} {b}"), 0);
        assert_eq!(wrapped, format!("{a}\n{b}\n"));
    }

    #[test]
    fn continuation_aligns_under_first_word() {
        let a = "a".repeat(40);
        let b = "b".repeat(40);
        let wrapped = wrap(&format!("  {a} {b}"), 0);
        assert_eq!(wrapped, format!("  {a}\n  {b}\n"));
    }

    #[test]
    fn newline_forces_break_and_resets_indent() {
        assert_eq!(wrap("first\n    second more", 0), "first\n    second more\n");
    }

    #[test]
    fn indent_combines_with_input_indentation() {
        let wrapped = wrap("summary\n  1 = one\n  2 = two\n", 6);
        assert_eq!(wrapped, "      summary\n        1 = one\n        2 = two\n");
    }

    #[test]
    fn words_fill_up_to_the_width() {
        // 26 words of 2 chars: "aa bb ..." occupies 3 per word after the
        // first; 78 columns fit exactly 26 of them.
        let words: Vec<String> = (0..27).map(|_| "xx".to_string()).collect();
        let text = words.join(" ");
        let wrapped = wrap(&text, 0);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 26 * 3 - 1);
        assert_eq!(lines[1], "xx");
    }
}
