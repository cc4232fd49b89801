//! Sideways rendering of a tree's shape.
//!
//! The tree is laid out rotated by 90 degrees: right subtree above, left subtree below,
//! each level indented one step further than its parent.

use std::fmt;

use crate::tree::{Node, Tree};

/// Default indentation step per tree level.
pub const DEFAULT_INDENT: usize = 6;

/// One node of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine<'a, K> {
    /// Distance from the root, which sits at depth 0.
    pub depth: usize,
    pub key: &'a K,
    pub balance_factor: isize,
}

/// Printable rendering of a tree, created by [`Tree::display`].
///
/// Every node is written as a blank line followed by the indented key and its
/// balance factor, e.g. `20 (BF=0)`. An empty tree writes nothing.
pub struct Rendering<'a, K> {
    lines: Vec<RenderLine<'a, K>>,
    indent: usize,
}

impl<K: Ord> Tree<K> {
    /// Returns the nodes in print order: right subtree, node, left subtree.
    pub fn render(&self) -> Vec<RenderLine<'_, K>> {
        let mut lines = Vec::new();
        render_into(self.root(), 0, &mut lines);
        lines
    }

    /// Returns a printable rendering using the default indentation.
    pub fn display(&self) -> Rendering<'_, K> {
        Rendering {
            lines: self.render(),
            indent: DEFAULT_INDENT,
        }
    }
}

fn render_into<'a, K>(
    link: Option<&'a Node<K>>,
    depth: usize,
    lines: &mut Vec<RenderLine<'a, K>>,
) {
    if let Some(node) = link {
        render_into(node.right(), depth + 1, lines);
        lines.push(RenderLine {
            depth,
            key: node.key(),
            balance_factor: node.balance_factor(),
        });
        render_into(node.left(), depth + 1, lines);
    }
}

impl<'a, K> Rendering<'a, K> {
    /// Sets the number of spaces per tree level.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// The rendered nodes in print order.
    pub fn lines(&self) -> &[RenderLine<'a, K>] {
        &self.lines
    }
}

impl<K: fmt::Display> fmt::Display for Rendering<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f)?;
            writeln!(
                f,
                "{:width$}{} (BF={})",
                "",
                line.key,
                line.balance_factor,
                width = line.depth * self.indent
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderLine;
    use crate::Tree;

    #[test]
    fn test_render_empty() {
        let tree = Tree::<i32>::new();
        assert!(tree.render().is_empty());
        assert_eq!(tree.display().to_string(), "");
    }

    #[test]
    fn test_render_order() {
        //     20
        //    /  \
        //   10   30
        //  /
        // 5
        let tree: Tree<i32> = [20, 10, 30, 5].into_iter().collect();
        let lines = tree.render();
        assert_eq!(
            lines,
            vec![
                RenderLine {
                    depth: 1,
                    key: &30,
                    balance_factor: 0,
                },
                RenderLine {
                    depth: 0,
                    key: &20,
                    balance_factor: 1,
                },
                RenderLine {
                    depth: 1,
                    key: &10,
                    balance_factor: 1,
                },
                RenderLine {
                    depth: 2,
                    key: &5,
                    balance_factor: 0,
                },
            ]
        );
    }

    #[test]
    fn test_display() {
        let tree: Tree<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(
            tree.display().to_string(),
            "\n      30 (BF=0)\n\n20 (BF=0)\n\n      10 (BF=0)\n"
        );
        assert_eq!(
            tree.display().indent(2).to_string(),
            "\n  30 (BF=0)\n\n20 (BF=0)\n\n  10 (BF=0)\n"
        );
    }

    #[test]
    fn test_display_negative_balance() {
        let tree: Tree<i32> = [1, 2].into_iter().collect();
        assert_eq!(tree.display().to_string(), "\n      2 (BF=0)\n\n1 (BF=-1)\n");
        assert_eq!(tree.display().lines().len(), 2);
    }
}
