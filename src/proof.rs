use std::fmt;
use std::iter::Zip;
use std::slice;

use crate::hash::Digest;

/// Side on which a sibling digest joins the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sibling is the left half: `H(sibling || current)`.
    Left,
    /// Sibling is the right half: `H(current || sibling)`.
    Right,
}

impl Direction {
    /// Returns `true` for [`Direction::Left`].
    pub fn is_left(self) -> bool {
        self == Direction::Left
    }

    /// Returns `true` for [`Direction::Right`].
    pub fn is_right(self) -> bool {
        self == Direction::Right
    }
}

/// Numeric markers as emitted by the classic path format: `0` left, `1` right.
impl From<Direction> for i64 {
    fn from(d: Direction) -> i64 {
        match d {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Merkle tree inclusion path for a content item.
///
/// Layout, leaf to root:
///
/// ```text
/// siblings:   [ s0    s1    s2   ... ]
/// directions: [ d0    d1    d2   ... ]
/// ```
///
/// `s0` is the sibling of the leaf itself, the last entry is a child of
/// the root. Starting from the leaf digest `h`, each step computes
/// `H(h || s)` for [`Direction::Right`] and `H(s || h)` for
/// [`Direction::Left`]; the final value equals the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    siblings: Vec<Digest>,
    directions: Vec<Direction>,
}

impl Proof {
    pub(crate) fn new(siblings: Vec<Digest>, directions: Vec<Direction>) -> Proof {
        debug_assert_eq!(siblings.len(), directions.len());
        Proof {
            siblings,
            directions,
        }
    }

    /// Sibling digests, leaf to root.
    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    /// Direction markers, parallel to [`Proof::siblings`].
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of levels the path climbs.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Returns `true` if the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Iterates `(sibling, direction)` pairs, leaf to root.
    pub fn iter(&self) -> Zip<slice::Iter<'_, Digest>, slice::Iter<'_, Direction>> {
        self.siblings.iter().zip(self.directions.iter())
    }

    /// Splits the proof into its two parallel sequences.
    pub fn into_parts(self) -> (Vec<Digest>, Vec<Direction>) {
        (self.siblings, self.directions)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = (&'a Digest, &'a Direction);
    type IntoIter = Zip<slice::Iter<'a, Digest>, slice::Iter<'a, Direction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
