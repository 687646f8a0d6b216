// src/formatting/state.rs
//! Immutable formatting state for Markdown generation.

use crate::constants::INDENT_SPACES;

/// Position of a block in the rendered output.
///
/// All methods return new instances; a parent's context is never changed by
/// rendering its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatContext {
    indent_level: usize,
}

impl FormatContext {
    /// Creates a context for top-level blocks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_level(indent_level: usize) -> Self {
        Self { indent_level }
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Returns a context one indentation level deeper.
    pub fn indented(&self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
        }
    }

    /// The literal prefix of every line emitted at this level.
    pub fn pad(&self) -> String {
        " ".repeat(self.indent_level * INDENT_SPACES)
    }

    /// Prefixes `line` with this level's padding.
    pub fn line(&self, line: impl AsRef<str>) -> String {
        format!("{}{}", self.pad(), line.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_level_adds_two_spaces() {
        let top = FormatContext::new();
        assert_eq!(top.pad(), "");
        assert_eq!(top.indented().indented().pad(), "    ");
        assert_eq!(FormatContext::at_level(1).line("- a"), "  - a");
    }

    #[test]
    fn indenting_leaves_the_parent_unchanged() {
        let parent = FormatContext::at_level(1);
        let child = parent.indented();
        assert_eq!(parent.indent_level(), 1);
        assert_eq!(child.indent_level(), 2);
    }
}
