use crate::content::Content;
use crate::error::{self, Result};
use crate::hash::*;
use crate::merkle::MerkleTree;
use crate::proof::{Direction, Proof};
use std::convert::Infallible;
use std::fmt;
use std::hash::Hasher;
use thiserror::Error;

pub const SIZE: usize = 0x10;

/// MD5 of `bytes`, the leaf digest used by [`Text`].
pub fn md5_of(bytes: &[u8]) -> Digest {
    let mut a = Md5::new();
    a.write(bytes);
    a.hash()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn new(s: &str) -> Text {
        Text(s.to_owned())
    }
}

impl Content for Text {
    type Error = Infallible;

    fn digest(&self) -> std::result::Result<Digest, Infallible> {
        Ok(md5_of(self.0.as_bytes()))
    }

    fn equals(&self, other: &Self) -> std::result::Result<bool, Infallible> {
        Ok(self.0 == other.0)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content whose digest only covers `key`, so distinct items can share a
/// leaf digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyed {
    pub key: String,
    pub n: u32,
}

impl Keyed {
    pub fn new(key: &str, n: u32) -> Keyed {
        Keyed {
            key: key.to_owned(),
            n,
        }
    }
}

impl Content for Keyed {
    type Error = Infallible;

    fn digest(&self) -> std::result::Result<Digest, Infallible> {
        Ok(md5_of(self.key.as_bytes()))
    }

    fn equals(&self, other: &Self) -> std::result::Result<bool, Infallible> {
        Ok(self.key == other.key && self.n == other.n)
    }
}

pub fn texts(items: &[&str]) -> Vec<Text> {
    items.iter().map(|s| Text::new(s)).collect()
}

pub fn text_tree(items: &[&str]) -> MerkleTree<Text> {
    MerkleTree::new(texts(items)).expect("failed to create tree from texts")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FaultError {
    #[error("digest of {0:?} is broken")]
    Digest(String),
    #[error("comparison with {0:?} is broken")]
    Equals(String),
}

/// Content whose operations fail on demand.
#[derive(Debug, Clone)]
pub struct Faulty {
    pub text: String,
    pub fail_digest: bool,
    pub fail_equals: bool,
}

impl Faulty {
    pub fn ok(s: &str) -> Faulty {
        Faulty {
            text: s.to_owned(),
            fail_digest: false,
            fail_equals: false,
        }
    }
}

impl Content for Faulty {
    type Error = FaultError;

    fn digest(&self) -> std::result::Result<Digest, FaultError> {
        if self.fail_digest {
            return Err(FaultError::Digest(self.text.clone()));
        }
        Ok(md5_of(self.text.as_bytes()))
    }

    fn equals(&self, other: &Self) -> std::result::Result<bool, FaultError> {
        if self.fail_equals {
            return Err(FaultError::Equals(other.text.clone()));
        }
        Ok(self.text == other.text)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct XOR128 {
    data: [u8; SIZE],
    i: usize,
}

impl XOR128 {
    pub fn new() -> XOR128 {
        XOR128 {
            data: [0; SIZE],
            i: 0,
        }
    }
}

impl Hasher for XOR128 {
    fn write(&mut self, bytes: &[u8]) {
        for x in bytes {
            self.data[self.i & (SIZE - 1)] ^= *x;
            self.i += 1;
        }
    }

    fn finish(&self) -> u64 {
        let mut h: u64 = 0;
        let mut off: u64 = 0;
        for i in 0..8 {
            h |= u64::from(self.data[i]) << off;
            off += 8;
        }
        h
    }
}

impl Algorithm for XOR128 {
    #[inline]
    fn hash(&mut self) -> Digest {
        Digest::from(self.data)
    }

    #[inline]
    fn reset(&mut self) {
        *self = XOR128::new();
    }
}

impl fmt::UpperHex for XOR128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for b in &self.data {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("hash sink closed")]
pub struct SinkClosed;

/// Algorithm whose interior node hashing always fails.
#[derive(Debug, Copy, Clone, Default)]
pub struct Broken;

impl Hasher for Broken {
    fn write(&mut self, _: &[u8]) {}

    fn finish(&self) -> u64 {
        0
    }
}

impl Algorithm for Broken {
    fn hash(&mut self) -> Digest {
        Digest::default()
    }

    fn reset(&mut self) {}

    fn node(&mut self, _: &Digest, _: &Digest) -> Result<Digest> {
        Err(error::Error::digest(SinkClosed))
    }
}

/// Recomputes the root from a leaf digest and its path.
pub fn fold_proof<A: Algorithm>(leaf: &Digest, proof: &Proof) -> Digest {
    let mut a = A::default();
    let mut h = leaf.clone();
    for (sibling, direction) in proof {
        h = match direction {
            Direction::Right => a.node(&h, sibling),
            Direction::Left => a.node(sibling, &h),
        }
        .expect("failed to fold proof");
    }
    h
}

pub fn from_hex(s: &str) -> Digest {
    Digest::from(hex::decode(s).expect("bad hex"))
}
