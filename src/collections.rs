use std::hash::BuildHasherDefault;
use indexmap::{IndexMap};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Insertion order is kept, which makes iteration over search tables deterministic
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Plain hash map for memo tables where order does not matter
pub(crate) type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
