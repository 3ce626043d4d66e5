//! Append-only text accumulator for one top-level value

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rendered text plus its display width
///
/// Positions are terminal columns, not bytes or chars: a wide CJK or emoji
/// character advances by two, so recorded pointer positions map directly
/// onto diagram columns.
#[derive(Debug, Clone, Default)]
pub struct RenderBuffer {
    text: String,
    position: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current write offset, in display columns
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
        self.position += c.width().unwrap_or(0);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.position += s.width();
    }

    /// Emit the sibling separator before every item but the first
    pub fn separate(&mut self, index: usize) {
        if index > 0 {
            self.push_str(super::constants::SEPARATOR);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_counts_columns() {
        let mut buffer = RenderBuffer::new();
        buffer.push_str("\"héllo\"");
        assert_eq!(buffer.position(), 7);
        assert_eq!(buffer.as_str().len(), 8);

        buffer.push('&');
        assert_eq!(buffer.position(), 8);
    }

    #[test]
    fn test_wide_characters_take_two_columns() {
        let mut buffer = RenderBuffer::new();
        buffer.push_str("\"名前\"");
        assert_eq!(buffer.position(), 6);

        buffer.push('猫');
        assert_eq!(buffer.position(), 8);
    }

    #[test]
    fn test_separate_skips_first() {
        let mut buffer = RenderBuffer::new();
        for (i, item) in ["a", "b", "c"].iter().enumerate() {
            buffer.separate(i);
            buffer.push_str(item);
        }
        assert_eq!(buffer.into_string(), "a, b, c");
    }
}
