use std::fmt;

/// One entry of a depth-marked list, as handed over by a markup parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    /// Nesting level, 0 for top-level entries
    pub depth: usize,
    pub value: String,
}

impl Item {
    pub fn new(depth: usize, value: impl Into<String>) -> Self {
        Self {
            depth,
            value: value.into(),
        }
    }
}

impl<S: Into<String>> From<(usize, S)> for Item {
    fn from((depth, value): (usize, S)) -> Self {
        Self::new(depth, value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "*".repeat(self.depth + 1), self.value)
    }
}
