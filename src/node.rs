use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::mem;

use alloc::boxed::Box;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Red means "leans left": the node is the left half of a temporary 4-node
/// that has not been split yet. An absent child counts as Black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Colour {
    Red,
    Black,
}

impl Colour {
    fn flipped(self) -> Colour {
        match self {
            Colour::Red => Colour::Black,
            Colour::Black => Colour::Red,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) colour: Colour,
    // Number of nodes in the left subtree, not counting this node.
    pub(crate) left_size: usize,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// New nodes always enter the tree as Red leaves.
    pub(crate) fn new(item: T) -> Node<T> {
        Node {
            item,
            colour: Colour::Red,
            left_size: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.colour == Colour::Red
    }

    pub(crate) fn is_black(&self) -> bool {
        self.colour == Colour::Black
    }

    /// Flips the colour of this node and both of its children, pushing or
    /// pulling a red "borrow" between levels.
    fn switch_colours(&mut self) {
        self.colour = self.colour.flipped();
        if let Some(left) = self.left.as_deref_mut() {
            left.colour = left.colour.flipped();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.colour = right.colour.flipped();
        }
    }
}

pub(crate) fn is_red<T>(link: &Link<T>) -> bool {
    link.as_deref().is_some_and(Node::is_red)
}

// ─── Balancing core ─────────────────────────────────────────────────────────
//
// Rotations consume the owning box of the subtree root and return the box
// that should occupy that slot afterwards. Colours are swapped between the
// old and new top so the slot keeps the colour it had.

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut top = node.right.take().expect("rotate_left: no right child");
    node.right = top.left.take();
    mem::swap(&mut node.colour, &mut top.colour);
    // The demoted node keeps its left subtree; the promoted node gains the
    // demoted node plus that whole subtree on its left side.
    top.left_size += node.left_size + 1;
    top.left = Some(node);
    top
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut top = node.left.take().expect("rotate_right: no left child");
    node.left = top.right.take();
    mem::swap(&mut node.colour, &mut top.colour);
    // The promoted node keeps its left subtree; the demoted node loses the
    // promoted node plus that whole subtree from its left side.
    node.left_size -= top.left_size + 1;
    top.right = Some(node);
    top
}

/// Canonical LLRB repair applied on every unwind: right-lean correction,
/// then left-left correction, then 4-node colour split. Each step assumes
/// the previous ones already resolved.
fn fixup<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if node.left.as_deref().is_some_and(|left| left.is_red() && is_red(&left.left)) {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        node.switch_colours();
    }
    node
}

/// Pushes a red link down the left spine, borrowing from the right sibling
/// when it has a red-left grandchild.
fn move_red_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.switch_colours();
    if node.right.as_deref().is_some_and(|right| is_red(&right.left)) {
        if let Some(right) = node.right.take() {
            node.right = Some(rotate_right(right));
        }
        node = rotate_left(node);
        node.switch_colours();
    }
    node
}

/// Mirror of [`move_red_left`] for rightward descent.
fn move_red_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.switch_colours();
    if node.left.as_deref().is_some_and(|left| is_red(&left.left)) {
        node = rotate_right(node);
        node.switch_colours();
    }
    node
}

// ─── Augmented mutation layer ───────────────────────────────────────────────

/// Inserts `item` below `node`, returning the new subtree root and whether
/// the item was newly inserted. An equal item short-circuits before any
/// restructuring.
pub(crate) fn insert<T: Ord>(mut node: Box<Node<T>>, item: T) -> (Box<Node<T>>, bool) {
    let inserted = match item.cmp(&node.item) {
        Equal => return (node, false),
        Less => match node.left.take() {
            None => {
                node.left = Some(Box::new(Node::new(item)));
                node.left_size += 1;
                true
            }
            Some(left) => {
                let (left, inserted) = insert(left, item);
                node.left = Some(left);
                node.left_size += usize::from(inserted);
                inserted
            }
        },
        Greater => match node.right.take() {
            None => {
                node.right = Some(Box::new(Node::new(item)));
                true
            }
            Some(right) => {
                let (right, inserted) = insert(right, item);
                node.right = Some(right);
                inserted
            }
        },
    };
    (fixup(node), inserted)
}

/// Top-down LLRB deletion: rebalances on the way down so the node to remove
/// is never a 2-node when reached. The fixups must happen *before* the
/// comparison that decides which child to descend into.
pub(crate) fn remove<T, Q>(node: Link<T>, item: &Q) -> (Link<T>, bool)
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut node) = node else {
        return (None, false);
    };

    let removed = if item < node.item.borrow() {
        if node.left.as_deref().is_some_and(|left| left.is_black() && !is_red(&left.left)) {
            node = move_red_left(node);
        }
        let (left, removed) = remove(node.left.take(), item);
        node.left = left;
        node.left_size -= usize::from(removed);
        removed
    } else {
        if is_red(&node.left) {
            node = rotate_right(node);
        }
        if item == node.item.borrow() && node.right.is_none() {
            // Black balance guarantees no left child remains here.
            return (None, true);
        }
        if node.right.as_deref().is_some_and(|right| right.is_black() && !is_red(&right.left)) {
            node = move_red_right(node);
        }
        if item == node.item.borrow() {
            let mut right = node.right.take().expect("interior match has a right child");
            // Swap with the in-order successor, then physically remove the
            // (now-duplicate) successor from the right subtree.
            swap_with_successor(&mut node.item, &mut right);
            node.right = remove_min(right);
            true
        } else {
            let (right, removed) = remove(node.right.take(), item);
            node.right = right;
            removed
        }
    };

    (Some(fixup(node)), removed)
}

/// Swaps `item` with the leftmost item of the subtree rooted at `right`.
fn swap_with_successor<T>(item: &mut T, right: &mut Box<Node<T>>) {
    let mut successor = right;
    while successor.left.is_some() {
        successor = successor.left.as_mut().unwrap();
    }
    mem::swap(item, &mut successor.item);
}

/// Removes the leftmost node of the subtree, returning its replacement.
pub(crate) fn remove_min<T>(mut node: Box<Node<T>>) -> Link<T> {
    if node.left.as_deref().is_some_and(|left| left.is_black() && !is_red(&left.left)) {
        node = move_red_left(node);
    }
    let Some(left) = node.left.take() else {
        return None;
    };
    node.left = remove_min(left);
    node.left_size -= 1;
    Some(fixup(node))
}

// ─── Query layer ────────────────────────────────────────────────────────────

pub(crate) fn get<'a, T, Q>(link: &'a Link<T>, item: &Q) -> Option<&'a T>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = link.as_deref();
    while let Some(current) = node {
        node = match item.cmp(current.item.borrow()) {
            Less => current.left.as_deref(),
            Greater => current.right.as_deref(),
            Equal => return Some(&current.item),
        };
    }
    None
}

/// Rank-aware lookup. Every rightward step skips the current node and its
/// left subtree, so the rank accumulates `left_size + 1` per step; the match
/// contributes its own `left_size`.
pub(crate) fn find<'a, T, Q>(link: &'a Link<T>, item: &Q) -> Option<(usize, &'a T)>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = link.as_deref()?;
    let mut rank = 0;
    loop {
        match item.cmp(node.item.borrow()) {
            Less => node = node.left.as_deref()?,
            Greater => {
                rank += node.left_size + 1;
                node = node.right.as_deref()?;
            }
            Equal => return Some((rank + node.left_size, &node.item)),
        }
    }
}

/// Pure order-statistic walk; no item comparisons at all.
pub(crate) fn get_by_rank<T>(link: &Link<T>, mut rank: usize) -> Option<&T> {
    let mut node = link.as_deref()?;
    loop {
        match rank.cmp(&node.left_size) {
            Equal => return Some(&node.item),
            Less => node = node.left.as_deref()?,
            Greater => {
                rank -= node.left_size + 1;
                node = node.right.as_deref()?;
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // Verify the niche optimization: an absent child costs nothing extra.
    assert_eq_size!(Link<u64>, usize);

    fn leaf(item: i32, colour: Colour) -> Box<Node<i32>> {
        let mut node = Box::new(Node::new(item));
        node.colour = colour;
        node
    }

    #[test]
    fn rotate_left_fixes_sizes_and_colours() {
        // 2 -> (1, 4 -> (3, _)), rotate the red link 2-4 up.
        let mut root = leaf(2, Colour::Black);
        root.left = Some(leaf(1, Colour::Black));
        root.left_size = 1;
        let mut right = leaf(4, Colour::Red);
        right.left = Some(leaf(3, Colour::Black));
        right.left_size = 1;
        root.right = Some(right);

        let top = rotate_left(root);
        assert_eq!(top.item, 4);
        assert_eq!(top.colour, Colour::Black);
        assert_eq!(top.left_size, 3);
        let demoted = top.left.as_deref().unwrap();
        assert_eq!(demoted.item, 2);
        assert_eq!(demoted.colour, Colour::Red);
        assert_eq!(demoted.left_size, 1);
        assert_eq!(demoted.right.as_deref().unwrap().item, 3);
    }

    #[test]
    fn rotate_right_fixes_sizes_and_colours() {
        // 4 -> (2 -> (1, 3), _), rotate the red link 4-2 up.
        let mut root = leaf(4, Colour::Black);
        let mut left = leaf(2, Colour::Red);
        left.left = Some(leaf(1, Colour::Black));
        left.left_size = 1;
        left.right = Some(leaf(3, Colour::Black));
        root.left = Some(left);
        root.left_size = 3;

        let top = rotate_right(root);
        assert_eq!(top.item, 2);
        assert_eq!(top.colour, Colour::Black);
        assert_eq!(top.left_size, 1);
        let demoted = top.right.as_deref().unwrap();
        assert_eq!(demoted.item, 4);
        assert_eq!(demoted.colour, Colour::Red);
        assert_eq!(demoted.left_size, 1);
        assert_eq!(demoted.left.as_deref().unwrap().item, 3);
    }

    #[test]
    fn switch_colours_flips_node_and_children() {
        let mut node = leaf(2, Colour::Black);
        node.left = Some(leaf(1, Colour::Red));
        node.left_size = 1;
        node.right = Some(leaf(3, Colour::Red));

        node.switch_colours();
        assert_eq!(node.colour, Colour::Red);
        assert_eq!(node.left.as_deref().unwrap().colour, Colour::Black);
        assert_eq!(node.right.as_deref().unwrap().colour, Colour::Black);
    }

    #[test]
    fn fixup_splits_a_four_node() {
        let mut node = leaf(2, Colour::Black);
        node.left = Some(leaf(1, Colour::Red));
        node.left_size = 1;
        node.right = Some(leaf(3, Colour::Red));

        let node = fixup(node);
        assert_eq!(node.item, 2);
        assert!(node.is_red());
        assert!(node.left.as_deref().unwrap().is_black());
        assert!(node.right.as_deref().unwrap().is_black());
    }

    #[test]
    fn fixup_corrects_a_right_lean() {
        let mut node = leaf(1, Colour::Black);
        node.right = Some(leaf(2, Colour::Red));

        let node = fixup(node);
        assert_eq!(node.item, 2);
        assert!(node.is_black());
        assert_eq!(node.left_size, 1);
        let left = node.left.as_deref().unwrap();
        assert_eq!(left.item, 1);
        assert!(left.is_red());
    }
}
