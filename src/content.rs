//! Content stored and committed to by the tree.

use std::rc::Rc;
use std::sync::Arc;

use crate::hash::Digest;

/// Data that is stored and verified by the tree.
///
/// A type implementing `Content` can be used as an item in a [`MerkleTree`].
/// The tree never looks inside content: it asks for a digest once, at build
/// time, and for equality when a path is requested.
///
/// ## `Content` and `equals`
///
/// When two values are equal their digests must be equal too:
///
/// ```text
/// a.equals(b) -> a.digest() == b.digest()
/// ```
///
/// ## Sharing content with the tree
///
/// The tree keeps whatever it is given. To retain the originals, build the
/// tree over references or reference counted pointers, all of which forward
/// to the pointee:
///
/// ```text
/// let items: Vec<Text> = ...;
/// let tree: MerkleTree<&Text> = MerkleTree::new(items.iter())?;
/// let path = tree.merkle_path(&&items[2])?;
/// ```
///
/// [`MerkleTree`]: crate::merkle::MerkleTree
pub trait Content {
    /// Error raised by a broken implementation. Use
    /// [`std::convert::Infallible`] when neither operation can fail.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the leaf digest for this value.
    fn digest(&self) -> Result<Digest, Self::Error>;

    /// Tests this value for equality against `other`.
    fn equals(&self, other: &Self) -> Result<bool, Self::Error>;
}

impl<'a, T: ?Sized + Content> Content for &'a T {
    type Error = T::Error;

    fn digest(&self) -> Result<Digest, Self::Error> {
        (**self).digest()
    }

    fn equals(&self, other: &Self) -> Result<bool, Self::Error> {
        (**self).equals(*other)
    }
}

impl<T: ?Sized + Content> Content for Box<T> {
    type Error = T::Error;

    fn digest(&self) -> Result<Digest, Self::Error> {
        (**self).digest()
    }

    fn equals(&self, other: &Self) -> Result<bool, Self::Error> {
        (**self).equals(other)
    }
}

impl<T: ?Sized + Content> Content for Rc<T> {
    type Error = T::Error;

    fn digest(&self) -> Result<Digest, Self::Error> {
        (**self).digest()
    }

    fn equals(&self, other: &Self) -> Result<bool, Self::Error> {
        (**self).equals(other)
    }
}

impl<T: ?Sized + Content> Content for Arc<T> {
    type Error = T::Error;

    fn digest(&self) -> Result<Digest, Self::Error> {
        (**self).digest()
    }

    fn equals(&self, other: &Self) -> Result<bool, Self::Error> {
        (**self).equals(other)
    }
}
