//! Per-character view of a document: where each character sits and which display classes it
//! carries.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    /// Character offset in the source.
    pub index: usize,
    /// 0-based line number. A newline belongs to the line it ends.
    pub line: usize,
    pub ch: char,
    /// What to show for this character; differs from `ch` only for visualized whitespace.
    pub display: String,
    pub classes: Vec<String>,
}

impl Character {
    pub fn new(index: usize, line: usize, ch: char) -> Self {
        Self {
            index,
            line,
            ch,
            display: ch.to_string(),
            classes: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds `class` unless already present. Returns whether it was added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    pub fn clear_classes(&mut self) {
        self.classes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_set_semantics() {
        let mut ch = Character::new(0, 0, '橋');
        assert!(ch.add_class("furigana"));
        assert!(!ch.add_class("furigana"));
        assert!(ch.add_class("error"));
        assert_eq!(ch.classes, vec!["furigana", "error"]);
        assert!(ch.remove_class("furigana"));
        assert!(!ch.remove_class("furigana"));
        assert_eq!(ch.classes, vec!["error"]);
        ch.clear_classes();
        assert!(ch.classes.is_empty());
    }

    #[test]
    fn test_display_defaults_to_char() {
        let ch = Character::new(3, 1, '\u{3000}');
        assert_eq!(ch.display, "\u{3000}");
    }
}
