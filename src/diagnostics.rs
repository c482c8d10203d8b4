//! Opt-in structural diagnostics for tests and fuzz harnesses.
//!
//! Nothing here is required for, or invoked by, normal operation; the
//! `diagnostics` cargo feature exists so harnesses can validate the tree
//! after every mutation without the checks being compiled into release
//! builds of downstream crates.

use core::fmt::{self, Display, Write};

use thiserror::Error;

use crate::llrb_set::LlrbSet;
use crate::node::{Link, Node, is_red};

/// A structural invariant violated by the tree.
///
/// Returned by [`LlrbSet::check_invariants`]. Any variant indicates a bug in
/// this crate, not in the caller.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InvariantViolation {
    /// A red link leans right while its sibling link is black.
    #[error("red link leaning right")]
    RightLeaningRedLink,
    /// A non-root red node has a red child.
    #[error("two consecutive red links")]
    ConsecutiveRedLinks,
    /// Two root-to-leaf paths cross different numbers of black links.
    #[error("black imbalance: left height {left}, right height {right}")]
    BlackImbalance { left: usize, right: usize },
    /// A node's `left_size` counter disagrees with its actual left subtree.
    #[error("left size {recorded} does not match left subtree count {actual}")]
    LeftSizeMismatch { recorded: usize, actual: usize },
    /// The set's element count disagrees with the number of nodes.
    #[error("set length {recorded} does not match node count {actual}")]
    LengthMismatch { recorded: usize, actual: usize },
}

impl<T> LlrbSet<T> {
    /// Verifies the red-black shape invariants, the left-subtree size
    /// augmentation, and the element count, over the whole tree.
    ///
    /// The root is exempt from the consecutive-red check: with no parent
    /// link, its colour cannot form a red-red violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] encountered, if any.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<i32> = (0..100).collect();
    /// assert!(set.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root.as_deref() else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::LengthMismatch {
                    recorded: self.len,
                    actual: 0,
                })
            };
        };
        let (count, _) = check_node(root, true)?;
        if count != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                actual: count,
            });
        }
        Ok(())
    }

    /// Writes the tree to `out` in Graphviz dot format, one edge per child
    /// link, coloured red or black to match the link.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([2, 1, 3]);
    /// let mut dot = String::new();
    /// set.dump_dot(&mut dot).unwrap();
    /// assert!(dot.starts_with("digraph G {"));
    /// ```
    pub fn dump_dot<W: Write>(&self, out: &mut W) -> fmt::Result
    where
        T: Display,
    {
        writeln!(out, "digraph G {{")?;
        if let Some(root) = self.root.as_deref() {
            dump_edges(root, out)?;
        }
        writeln!(out, "}}")
    }
}

/// Returns `(node count, black height)` of the subtree, where black height
/// counts black links down to childless descendants. A node with a single
/// child inherits that side's height, so only full root-to-childless-node
/// paths are compared against each other.
fn check_node<T>(node: &Node<T>, is_root: bool) -> Result<(usize, usize), InvariantViolation> {
    if !is_root && node.is_red() && (is_red(&node.left) || is_red(&node.right)) {
        return Err(InvariantViolation::ConsecutiveRedLinks);
    }
    if !is_red(&node.left) && is_red(&node.right) {
        return Err(InvariantViolation::RightLeaningRedLink);
    }

    let (left_count, left_height) = check_child(&node.left)?;
    if node.left_size != left_count {
        return Err(InvariantViolation::LeftSizeMismatch {
            recorded: node.left_size,
            actual: left_count,
        });
    }
    let (right_count, right_height) = check_child(&node.right)?;

    let black_height = match (left_height, right_height) {
        (Some(left), Some(right)) if left != right => {
            return Err(InvariantViolation::BlackImbalance {
                left,
                right,
            });
        }
        (Some(height), _) | (None, Some(height)) => height,
        (None, None) => 0,
    };

    Ok((1 + left_count + right_count, black_height))
}

fn check_child<T>(link: &Link<T>) -> Result<(usize, Option<usize>), InvariantViolation> {
    match link.as_deref() {
        None => Ok((0, None)),
        Some(child) => {
            let (count, height) = check_node(child, false)?;
            Ok((count, Some(height + usize::from(child.is_black()))))
        }
    }
}

fn dump_edges<T: Display, W: Write>(node: &Node<T>, out: &mut W) -> fmt::Result {
    for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
        writeln!(out, "edge[color={}];", if child.is_red() { "red" } else { "black" })?;
        writeln!(
            out,
            "\"Value: {}\\n LeftSize: {}\" -> \"Value: {}\\n LeftSize: {}\"",
            node.item, node.left_size, child.item, child.left_size
        )?;
        dump_edges(child, out)?;
    }
    Ok(())
}
