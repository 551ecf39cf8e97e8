//! Linked _Merkle Tree_ over opaque content with inclusion paths.
//!
//! Merkle tree (MT) built bottom-up from an ordered list of content items.
//! Every node is kept in one vec owned by the tree and links to its children
//! and parent by index, so leaves can walk up to the root without the tree
//! holding reference cycles.
//!
//! Hashing is split in two:
//!
//! ```text
//! leaf     = Content::digest(c)
//! interior = Algorithm(left || right)
//! ```
//!
//! Odd levels, including the leaf level, are made even by duplicating their
//! last node, so an unpaired node is hashed together with itself.
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Implementation choices
//!
//! Content is a capability, not a base type: anything that can produce a
//! digest and compare itself to another value of its kind, both fallibly.
//! Leaf digests are the content's business; the tree only composes them.
//!
//! [`Algorithm`] complements [`std::hash::Hasher`] to be reusable and follows
//! the idea that the result hash is a mapping of the data stream. Any
//! RustCrypto digest plugs in through [`hash::DigestAlgorithm`]; the default
//! is 128-bit MD5 ([`hash::Md5`]). Features `sha2` and `ring` add SHA-256
//! strategies for callers that need collision resistance.
//!
//! # Interface
//!
//! ```text
//! - MerkleTree::new (contents) -> tree | error
//! - root_digest -> hash
//! - merkle_path (content) -> proof | not found | error
//! - Display -> leaf dump
//! ```
//!
//! Path verification is left to the caller: fold the siblings into the leaf
//! digest with the same algorithm and compare against the root.
//!
//! # Quick start
//!
//! ```
//! use std::convert::Infallible;
//! use std::hash::Hasher;
//! use merkle_path::hash::{Algorithm, Digest, Md5};
//! use merkle_path::{Content, Direction, MerkleTree};
//!
//! #[derive(Debug)]
//! struct Text(&'static str);
//!
//! impl Content for Text {
//!     type Error = Infallible;
//!
//!     fn digest(&self) -> Result<Digest, Infallible> {
//!         let mut a = Md5::new();
//!         a.write(self.0.as_bytes());
//!         Ok(a.hash())
//!     }
//!
//!     fn equals(&self, other: &Self) -> Result<bool, Infallible> {
//!         Ok(self.0 == other.0)
//!     }
//! }
//!
//! let items = vec![Text("Hello"), Text("World"), Text("Hey"), Text("Gao")];
//! let tree: MerkleTree<&Text> = MerkleTree::new(items.iter()).unwrap();
//!
//! let proof = tree.merkle_path(&&items[2]).unwrap().unwrap();
//! let mut a = Md5::new();
//! let mut h = items[2].digest().unwrap();
//! for (sibling, direction) in &proof {
//!     h = match direction {
//!         Direction::Right => a.node(&h, sibling).unwrap(),
//!         Direction::Left => a.node(sibling, &h).unwrap(),
//!     };
//! }
//! assert_eq!(&h, tree.root_digest());
//! ```

#![deny(
    missing_docs, unused_qualifications,
    missing_debug_implementations, missing_copy_implementations,
    trivial_casts, trivial_numeric_casts,
    unsafe_code, unstable_features,
    unused_import_braces
)]

/// Content capability consumed by the tree.
pub mod content;

/// Error types.
pub mod error;

/// Hash infrastructure for nodes in Merkle tree.
pub mod hash;

/// Merkle tree inclusion proof
pub mod proof;

/// Merkle tree construction and path extraction.
pub mod merkle;

pub use crate::content::Content;
pub use crate::error::{Error, Result};
pub use crate::hash::{Algorithm, Digest};
pub use crate::merkle::{MerkleTree, Node, NodeId};
pub use crate::proof::{Direction, Proof};

/// Fixtures shared by the tests.
#[cfg(test)]
mod test_common;
