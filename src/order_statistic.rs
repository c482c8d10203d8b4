/// A zero-based rank into the sorted order of a set.
///
/// This is an order-statistic extension and is not part of the standard
/// `BTreeSet` API.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbSet, Rank};
///
/// let mut set = LlrbSet::new();
/// set.insert(10);
/// set.insert(20);
///
/// assert_eq!(set[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
