use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::node::{self, Link, Node};

mod order_statistic;

/// An ordered set based on a left-leaning red-black tree with subtree size
/// augmentation.
///
/// Every node tracks the size of its left subtree, kept up to date by the
/// same rotations that restore the red-black invariants, so rank-based
/// operations ([`get_by_rank`], [`rank_of`], [`find`]) run in O(log n)
/// alongside the usual ordered-set operations.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the [`Ord`]
/// trait, changes while it is in the set. The behavior resulting from such a
/// logic error is not specified, but will not result in undefined behavior.
///
/// [`get_by_rank`]: LlrbSet::get_by_rank
/// [`rank_of`]: LlrbSet::rank_of
/// [`find`]: LlrbSet::find
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbSet;
///
/// // Type inference lets us omit an explicit type signature (which
/// // would be `LlrbSet<&str>` in this example).
/// let mut books = LlrbSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything in sorted order.
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `LlrbSet` with a known list of items can be initialized from an array:
///
/// ```
/// use llrb_tree::LlrbSet;
///
/// let set = LlrbSet::from([1, 2, 3]);
/// ```
pub struct LlrbSet<T> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
}

/// An iterator over the items of a `LlrbSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`LlrbSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbSet;
///
/// let set = LlrbSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// ```
///
/// [`iter`]: LlrbSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    // In-order traversal: the stack holds the unvisited left spine.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

/// An owning iterator over the items of a `LlrbSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`LlrbSet`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbSet;
///
/// let set = LlrbSet::from([1, 2, 3]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next(), Some(2));
/// assert_eq!(iter.next(), Some(3));
/// ```
///
/// [`into_iter`]: LlrbSet#method.into_iter
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> LlrbSet<T> {
    /// Makes a new, empty `LlrbSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> LlrbSet<T> {
        LlrbSet {
            root: None,
            len: 0,
        }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut v = LlrbSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns `true` if the set contains a value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::get(&self.root, value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::get(&self.root, value)
    }

    /// Returns the first element in the set, if any.
    /// This is the minimum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&2));
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get_by_rank(0)
    }

    /// Returns the last element in the set, if any.
    /// This is the maximum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|rank| self.get_by_rank(rank))
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned,
    ///   and the entry is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = match self.root.take() {
            None => {
                self.root = Some(Box::new(Node::new(value)));
                true
            }
            Some(root) => {
                let (root, inserted) = node::insert(root, value);
                self.root = Some(root);
                inserted
            }
        };
        self.len += usize::from(inserted);
        inserted
    }

    /// If the set contains an element equal to the value, removes it from
    /// the set and drops it. Returns whether such an element was present.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// Removing an absent value never changes the set's contents, though the
    /// descent may recolour and rotate nodes along the search path.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (root, removed) = node::remove(self.root.take(), value);
        self.root = root;
        self.len -= usize::from(removed);
        removed
    }

    /// Gets an iterator over the values in the set, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(3);
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// for value in set.iter() {
    ///     println!("{value}");
    /// }
    ///
    /// let first = set.iter().next().unwrap();
    /// assert_eq!(*first, 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each step is O(1) amortized.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut a = LlrbSet::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1);
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut a = LlrbSet::new();
    /// assert!(a.is_empty());
    /// a.insert(1);
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Hash> Hash for LlrbSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for LlrbSet<T> {
    fn eq(&self, other: &LlrbSet<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LlrbSet<T> {}

impl<T: PartialOrd> PartialOrd for LlrbSet<T> {
    fn partial_cmp(&self, other: &LlrbSet<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LlrbSet<T> {
    fn cmp(&self, other: &LlrbSet<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Clone> Clone for LlrbSet<T> {
    fn clone(&self) -> Self {
        LlrbSet {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LlrbSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for LlrbSet<T> {
    fn default() -> Self {
        LlrbSet::new()
    }
}

impl<T: Ord> FromIterator<T> for LlrbSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = LlrbSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for LlrbSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for LlrbSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for LlrbSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for LlrbSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `LlrbSet`'s contents in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl<'a, T> IntoIterator for &'a LlrbSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_left_spine(node.right.as_deref());
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `llrb_set::Iter`.
    ///
    /// ```
    /// # use llrb_tree::llrb_set;
    /// let iter: llrb_set::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            stack: Vec::new(),
            remaining: 0,
        }
    }
}

impl<T> IntoIter<T> {
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        self.remaining -= 1;
        let right = node.right.take();
        self.push_left_spine(right);
        Some(node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `llrb_set::IntoIter`.
    ///
    /// ```
    /// # use llrb_tree::llrb_set;
    /// let iter: llrb_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            stack: Vec::new(),
            remaining: 0,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn insert_remove_contains_smoke() {
        let mut set = LlrbSet::new();
        assert!(set.insert(2));
        assert!(set.insert(1));
        assert!(set.insert(3));
        assert!(!set.insert(2));
        assert_eq!(set.len(), 3);

        assert!(set.contains(&1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&1));
    }

    #[test]
    fn iter_yields_sorted_order() {
        let set = LlrbSet::from([5, 3, 8, 1, 4]);
        let items: Vec<_> = set.iter().copied().collect();
        assert_eq!(items, vec![1, 3, 4, 5, 8]);

        let owned: Vec<_> = set.into_iter().collect();
        assert_eq!(owned, vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn clear_resets_len_and_root() {
        let mut set = LlrbSet::from([1, 2, 3]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
