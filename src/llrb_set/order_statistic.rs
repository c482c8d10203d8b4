use core::borrow::Borrow;
use core::ops::Index;

use super::LlrbSet;
use crate::Rank;
use crate::node;

impl<T> LlrbSet<T> {
    /// Returns the value at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// This is a pure order-statistic walk over the left-subtree size
    /// counters; no values are compared.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        node::get_by_rank(&self.root, rank)
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(value).map(|(rank, _)| rank)
    }

    /// Returns the value equal to `value` together with its zero-based rank,
    /// or `None` if the value is not present.
    ///
    /// A single descent yields both, so for any in-bounds rank `i`,
    /// `set.find(set.get_by_rank(i).unwrap())` is `Some((i, _))`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([30, 10, 20]);
    /// assert_eq!(set.find(&20), Some((1, &20)));
    /// assert_eq!(set.find(&15), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, value: &Q) -> Option<(usize, &T)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::find(&self.root, value)
    }

    /// Removes the value at position `rank` in sorted order. Returns whether
    /// a value was removed, which is `false` exactly when `rank` is out of
    /// bounds.
    ///
    /// The rank is resolved to a value first, then removed by value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::from([10, 20, 30]);
    /// assert_eq!(set.remove_by_rank(1), true);
    /// assert_eq!(set.contains(&20), false);
    /// assert_eq!(set.remove_by_rank(5), false);
    /// ```
    pub fn remove_by_rank(&mut self, rank: usize) -> bool
    where
        T: Clone + Ord,
    {
        let Some(value) = self.get_by_rank(rank).cloned() else {
            return false;
        };
        self.remove(&value)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbSet;
/// use llrb_tree::Rank;
///
/// let set = LlrbSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for LlrbSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
