//! Keys the heap map reacts to

/// A key press or terminal event, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    /// The viewport changed size
    Resize,
    Other,
}

impl Key {
    /// Case-insensitive letter match, e.g. `key.is('q')` for `q` and `Q`
    pub fn is(&self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_match_ignores_case() {
        assert!(Key::Char('Q').is('q'));
        assert!(Key::Char('q').is('q'));
        assert!(!Key::Char('w').is('q'));
        assert!(!Key::Left.is('q'));
    }
}
