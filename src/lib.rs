//! Order-statistic left-leaning red-black tree for Rust.
//!
//! This crate provides [`LlrbSet`], an ordered set with additional O(log n)
//! order-statistic operations:
//!
//! - [`get_by_rank`](LlrbSet::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](LlrbSet::rank_of) - Get the sorted position of an element
//! - [`find`](LlrbSet::find) - Get an element together with its rank in one descent
//! - Indexing by [`Rank`] - e.g., `set[Rank(0)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use llrb_tree::{LlrbSet, Rank};
//!
//! let mut scores = LlrbSet::new();
//! scores.insert(85);
//! scores.insert(100);
//! scores.insert(92);
//!
//! // Standard ordered-set operations work as expected
//! assert!(scores.contains(&92));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! // Get the median (rank 1 = second element in sorted order)
//! assert_eq!(scores.get_by_rank(1), Some(&92));
//!
//! // Find the rank of an element
//! assert_eq!(scores.rank_of(&100), Some(2));
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], 85);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Rank and index queries via left-subtree size
//!   augmentation maintained through every rotation
//! - **`diagnostics` feature** - Opt-in invariant checker and Graphviz dump for
//!   tests and fuzz harnesses; zero overhead when disabled
//!
//! # Implementation
//!
//! The set is a left-leaning red-black tree (Sedgewick's LLRB) with strictly
//! owned nodes: each child is a `Box` uniquely owned by its parent, and
//! rotations transfer ownership rather than juggling pointers. Every node
//! carries the size of its left subtree, updated incrementally by the same
//! rotations and recursive unwinds that restore the red-black invariants, so
//! rank queries never traverse more than one root-to-leaf path.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod node;
mod order_statistic;

pub mod llrb_set;

#[cfg(feature = "diagnostics")]
mod diagnostics;

pub use llrb_set::LlrbSet;
pub use order_statistic::Rank;

#[cfg(feature = "diagnostics")]
pub use diagnostics::InvariantViolation;
