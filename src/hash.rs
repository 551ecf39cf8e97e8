//! Hash infrastructure for nodes in Merkle Tree.
//!
//! Leaf digests come from the content itself (see [`Content`]); everything
//! above the leaf level is composed with an [`Algorithm`].
//!
//! [`Content`]: crate::content::Content

use std::fmt;
use std::hash::Hasher;
use std::ops;

use crate::error::Result;

/// Digest of a tree node.
///
/// Width is whatever the producing function emits, the tree never
/// assumes a fixed size.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the digest returning the underlying bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns digest width in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero width digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex form of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl ops::Deref for Digest {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Digest(bytes)
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Digest(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Digest {
    fn from(bytes: [u8; N]) -> Self {
        Digest(bytes.to_vec())
    }
}

impl From<Digest> for Vec<u8> {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode_upper(&self.0))
    }
}

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// full length hash and reset current state.
///
/// [`Algorithm::hash`] takes `&mut self` because most of the cryptographic
/// digest algorithms break their state on finalization. Implementations
/// that can't finalize in place clone their context first.
pub trait Algorithm: Hasher + Default {
    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> Digest;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Returns digest of the empty thing.
    fn empty(&mut self) -> Digest {
        self.reset();
        self.hash()
    }

    /// Returns the hash value for an interior node, `H(left || right)`.
    ///
    /// The order of the halves is never swapped. Algorithms whose writes
    /// can fail override this and report through [`Error::Digest`].
    ///
    /// [`Error::Digest`]: crate::error::Error::Digest
    fn node(&mut self, left: &Digest, right: &Digest) -> Result<Digest> {
        self.reset();
        self.write(left.as_bytes());
        self.write(right.as_bytes());
        Ok(self.hash())
    }
}

/// Folds the first 8 bytes of a digest into the `u64` required by [`Hasher`].
fn truncate_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_be_bytes(buf)
}

/// [`Algorithm`] over any RustCrypto [`digest::Digest`] implementation.
#[derive(Clone, Default)]
pub struct DigestAlgorithm<D>(D);

impl<D: digest::Digest + Clone + Default> DigestAlgorithm<D> {
    /// Creates a fresh algorithm state.
    pub fn new() -> Self {
        DigestAlgorithm(D::default())
    }
}

impl<D> fmt::Debug for DigestAlgorithm<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("DigestAlgorithm")
            .field(&std::any::type_name::<D>())
            .finish()
    }
}

impl<D: digest::Digest + Clone> Hasher for DigestAlgorithm<D> {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        digest::Digest::update(&mut self.0, msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        truncate_u64(&digest::Digest::finalize(self.0.clone()))
    }
}

impl<D: digest::Digest + Clone + Default> Algorithm for DigestAlgorithm<D> {
    #[inline]
    fn hash(&mut self) -> Digest {
        Digest(digest::Digest::finalize(self.0.clone()).to_vec())
    }

    #[inline]
    fn reset(&mut self) {
        self.0 = D::default();
    }
}

/// 128-bit MD5 strategy, the reference default.
///
/// MD5 is not collision resistant. Callers committing to adversarial
/// content should pick [`Sha256`] (feature `sha2`) or [`RingSha256`]
/// (feature `ring`) instead.
pub type Md5 = DigestAlgorithm<md5::Md5>;

/// SHA-256 strategy backed by the RustCrypto `sha2` crate.
#[cfg(feature = "sha2")]
pub type Sha256 = DigestAlgorithm<sha2::Sha256>;

/// SHA-256 strategy backed by `ring`.
#[cfg(feature = "ring")]
#[derive(Clone)]
pub struct RingSha256(ring::digest::Context);

#[cfg(feature = "ring")]
impl RingSha256 {
    /// Creates a fresh SHA-256 context.
    pub fn new() -> RingSha256 {
        RingSha256(ring::digest::Context::new(&ring::digest::SHA256))
    }
}

#[cfg(feature = "ring")]
impl Default for RingSha256 {
    fn default() -> RingSha256 {
        RingSha256::new()
    }
}

#[cfg(feature = "ring")]
impl fmt::Debug for RingSha256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("RingSha256")
    }
}

#[cfg(feature = "ring")]
impl Hasher for RingSha256 {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.update(msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        let out = self.0.clone().finish();
        truncate_u64(out.as_ref())
    }
}

#[cfg(feature = "ring")]
impl Algorithm for RingSha256 {
    /// ring.Context is not reusable after finalization (finish(self)),
    /// so the context is cloned first.
    #[inline]
    fn hash(&mut self) -> Digest {
        let out = self.0.clone().finish();
        let bytes: &[u8] = out.as_ref();
        Digest::from(bytes)
    }

    #[inline]
    fn reset(&mut self) {
        self.0 = ring::digest::Context::new(&ring::digest::SHA256);
    }
}
