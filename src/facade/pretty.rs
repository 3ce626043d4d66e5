//! Multi-line layout for rendered text
//!
//! Struct and map bodies are broken one entry per line, indented by four
//! spaces per level, with a trailing comma after the last entry. Sequences,
//! type tags, text literals and markers stay on one line.

const INDENT: &str = "    ";

/// Reflow single-line rendered text
pub fn reflow(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut open: Vec<char> = Vec::new();
    let mut literal: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(end) = literal {
            out.push(c);
            if c == end {
                literal = None;
            }
            continue;
        }

        match c {
            '"' | '`' => {
                literal = Some(c);
                out.push(c);
            }
            '{' => {
                out.push('{');
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                    continue;
                }
                open.push('{');
                skip_spaces(&mut chars);
                newline(&mut out, brace_depth(&open));
            }
            '}' => {
                trim_trailing_spaces(&mut out);
                out.push(',');
                if open.last() == Some(&'{') {
                    open.pop();
                }
                newline(&mut out, brace_depth(&open));
                out.push('}');
            }
            ',' if open.last() == Some(&'{') => {
                out.push(',');
                skip_spaces(&mut chars);
                newline(&mut out, brace_depth(&open));
            }
            '[' | '<' | '(' => {
                open.push(c);
                out.push(c);
            }
            ']' | '>' | ')' => {
                if open.last().is_some_and(|&o| o != '{') {
                    open.pop();
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

fn brace_depth(open: &[char]) -> usize {
    open.iter().filter(|&&c| c == '{').count()
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn skip_spaces(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek() == Some(&' ') {
        chars.next();
    }
}

fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_struct() {
        assert_eq!(reflow("Pair{ a: &1, b: & }"), "Pair{\n    a: &1,\n    b: &,\n}");
    }

    #[test]
    fn test_nested_struct() {
        assert_eq!(
            reflow("Outer{ inner: Inner{ x: 1 }, y: 2 }"),
            "Outer{\n    inner: Inner{\n        x: 1,\n    },\n    y: 2,\n}"
        );
    }

    #[test]
    fn test_literals_and_sequences_stay_inline() {
        assert_eq!(
            reflow("M{ text: \"a, {b}\", list: i32[1, 2], tag: `Unrenderable Vec<u8, A>` }"),
            "M{\n    text: \"a, {b}\",\n    list: i32[1, 2],\n    tag: `Unrenderable Vec<u8, A>`,\n}"
        );
    }

    #[test]
    fn test_map_type_tag_commas_stay_inline() {
        assert_eq!(
            reflow("HashMap<&str, i32>{ \"k\": 1 }"),
            "HashMap<&str, i32>{\n    \"k\": 1,\n}"
        );
    }

    #[test]
    fn test_empty_and_scalar_untouched() {
        assert_eq!(reflow("Empty{}"), "Empty{}");
        assert_eq!(reflow("42"), "42");
    }
}
