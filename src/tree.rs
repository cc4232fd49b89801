use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

/// An insert-only AVL tree.
///
/// The tree is nothing but a link to its root node. Each node is exclusively owned by
/// its parent, so restructuring hands subtrees around by value instead of patching
/// parent pointers.
///
/// ```
/// use avl_insert::Tree;
/// let mut tree = Tree::new();
/// for key in [10, 20, 30] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.root().map(|root| *root.key()), Some(20));
/// assert!(tree.iter().eq(&[10, 20, 30]));
/// ```
#[derive(Clone)]
pub struct Tree<K> {
    root: Link<K>,
}

/// A node of a [`Tree`], exposed read-only for inspection.
#[derive(Clone)]
pub struct Node<K> {
    key: K,
    height: usize,
    left: Link<K>,
    right: Link<K>,
}

type Link<K> = Option<Box<Node<K>>>;

/// An in-order iterator over the keys of a tree.
///
/// This `struct` is created by the [`iter`] method on [`Tree`].
///
/// [`iter`]: struct.Tree.html#method.iter
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

/// Returns the cached height of a subtree, 0 for an empty one.
pub fn height<K>(node: Option<&Node<K>>) -> usize {
    node.map_or(0, |node| node.height)
}

/// Returns left minus right subtree height, 0 for an empty subtree.
/// Positive values mean left-heavy, negative values right-heavy.
pub fn balance_factor<K>(node: Option<&Node<K>>) -> isize {
    node.map_or(0, Node::balance_factor)
}

impl<K: Ord> Tree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    /// The count is not cached, this walks the whole tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns the height of the tree, 0 if it is empty.
    pub fn height(&self) -> usize {
        height(self.root())
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Returns the smallest key.
    pub fn first(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }

    /// Returns the largest key.
    pub fn last(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Inserts a key and rebalances the tree.
    /// Returns whether the key was newly inserted. A duplicate key leaves the tree untouched.
    pub fn insert(&mut self, key: K) -> bool {
        self.insert_with_rotations(key).0
    }

    /// Like `insert`, also returning the number of rebalance operations applied.
    /// A double rotation counts as one.
    pub(crate) fn insert_with_rotations(&mut self, key: K) -> (bool, usize) {
        let insertion = insert(self.root.take(), key);
        self.root = Some(insertion.node);
        (insertion.inserted, insertion.rotations)
    }

    /// Gets an iterator over the keys of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root())
    }

    /// Asserts the search tree order, the AVL balance and the cached heights of all nodes.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check<K: Ord>(node: Option<&Node<K>>, lower: Option<&K>, upper: Option<&K>) -> usize {
            let node = match node {
                None => return 0,
                Some(node) => node,
            };

            // Check search tree order against all ancestors
            if let Some(lower) = lower {
                assert!(*lower < node.key);
            }
            if let Some(upper) = upper {
                assert!(node.key < *upper);
            }

            let left_height = check(node.left(), lower, Some(&node.key));
            let right_height = check(node.right(), Some(&node.key), upper);

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            node.height
        }

        check(self.root(), None, None);
    }
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Cached height of the subtree rooted here, 1 for a leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Root of the left subtree, holding the smaller keys.
    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    /// Root of the right subtree, holding the larger keys.
    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    /// Left minus right subtree height, within -1..=1 in a balanced tree.
    pub fn balance_factor(&self) -> isize {
        height(self.left()) as isize - height(self.right()) as isize
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(self.left()), height(self.right()));
    }
}

/// Result of inserting below a link.
struct Insertion<K> {
    /// New subtree root.
    node: Box<Node<K>>,
    inserted: bool,
    rotations: usize,
}

/// Inserts `key` below `link` and returns the new subtree root.
fn insert<K: Ord>(link: Link<K>, key: K) -> Insertion<K> {
    let mut node = match link {
        None => {
            return Insertion {
                node: Node::leaf(key),
                inserted: true,
                rotations: 0,
            }
        }
        Some(node) => node,
    };

    // Side of the descended child the key goes to.
    // That child is only swapped out by a rotation when its height is unchanged,
    // so this still holds for the current child whenever `node` is out of balance.
    let (descent, inserted, rotations) = match key.cmp(&node.key) {
        Ordering::Less => {
            let descent = node.left().map(|left| key.cmp(&left.key));
            let below = insert(node.left.take(), key);
            node.left = Some(below.node);
            (descent, below.inserted, below.rotations)
        }
        Ordering::Greater => {
            let descent = node.right().map(|right| key.cmp(&right.key));
            let below = insert(node.right.take(), key);
            node.right = Some(below.node);
            (descent, below.inserted, below.rotations)
        }
        Ordering::Equal => {
            return Insertion {
                node,
                inserted: false,
                rotations: 0,
            }
        }
    };

    if !inserted {
        return Insertion {
            node,
            inserted,
            rotations,
        };
    }

    node.adjust_height();
    let (node, rotated) = rebalance(node, descent.unwrap_or(Ordering::Equal));
    Insertion {
        node,
        inserted,
        rotations: rotations + usize::from(rotated),
    }
}

/// Restores the AVL condition at `node` after an insert below it.
/// `descent` tells whether the inserted key went left or right of the heavy child.
/// Returns the new subtree root and whether a rotation was needed.
fn rebalance<K>(mut node: Box<Node<K>>, descent: Ordering) -> (Box<Node<K>>, bool) {
    let balance = node.balance_factor();
    debug_assert!((-2..=2).contains(&balance));

    if balance > 1 && descent == Ordering::Less {
        trace!(case = "LL", "rotating subtree");
        (rotate_right(node), true)
    } else if balance < -1 && descent == Ordering::Greater {
        trace!(case = "RR", "rotating subtree");
        (rotate_left(node), true)
    } else if balance > 1 && descent == Ordering::Greater {
        trace!(case = "LR", "rotating subtree");
        node.left = node.left.take().map(rotate_left);
        (rotate_right(node), true)
    } else if balance < -1 && descent == Ordering::Less {
        trace!(case = "RL", "rotating subtree");
        node.right = node.right.take().map(rotate_right);
        (rotate_left(node), true)
    } else {
        (node, false)
    }
}

/// Lifts the left child above `node`. The node moving down gets its height fixed first.
fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    match node.left.take() {
        None => node,
        Some(mut left) => {
            node.left = left.right.take();
            node.adjust_height();
            left.right = Some(node);
            left.adjust_height();
            left
        }
    }
}

/// Lifts the right child above `node`. Mirror of `rotate_right`.
fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    match node.right.take() {
        None => node,
        Some(mut right) => {
            node.right = right.left.take();
            node.adjust_height();
            right.left = Some(node);
            right.adjust_height();
            right
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<&'a Node<K>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right());
        Some(&node.key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K: Ord> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
