//! Faster (but not DoS-resistant) hashmap for word counts
use farmhash;
use std::collections::HashMap;
use std::hash::{Hash, Hasher, BuildHasherDefault};

/// Act like a streaming farmhash
///
/// Farmhash isn't a streaming hash, so every write rehashes the new bytes seeded with the
/// state so far. A `str` key writes its bytes and then a terminator byte, and both have to
/// count or every word would land in the same bucket.
pub struct FarmHasher (u64);

impl Default for FarmHasher {
    #[inline]
    fn default() -> FarmHasher { FarmHasher(0) }
}

impl Hasher for FarmHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmHasher>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;

pub fn new_farm<X: Hash+Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}
