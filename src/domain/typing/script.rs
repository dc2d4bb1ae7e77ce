//! Typing script value object

/// Value object representing the text captured for one typing session.
/// The character sequence is fixed at capture time; later edits to the
/// source have no effect until the next session captures again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingScript {
    chars: Vec<char>,
}

impl TypingScript {
    /// Capture a script from source text
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Number of characters (not bytes) in the script
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the script has no characters
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the character at an index, if in bounds
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Reassemble the full text
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_characters_in_order() {
        let script = TypingScript::new("hi");
        assert_eq!(script.len(), 2);
        assert_eq!(script.char_at(0), Some('h'));
        assert_eq!(script.char_at(1), Some('i'));
    }

    #[test]
    fn len_counts_characters_not_bytes() {
        let script = TypingScript::new("héllo");
        assert_eq!(script.len(), 5);
        assert_eq!(script.char_at(1), Some('é'));
    }

    #[test]
    fn char_at_out_of_bounds() {
        let script = TypingScript::new("hi");
        assert_eq!(script.char_at(2), None);
    }

    #[test]
    fn empty_script() {
        let script = TypingScript::new("");
        assert!(script.is_empty());
        assert_eq!(script.len(), 0);
        assert_eq!(script.char_at(0), None);
    }

    #[test]
    fn text_round_trip() {
        let script = TypingScript::new("hello world");
        assert_eq!(script.text(), "hello world");
    }
}
