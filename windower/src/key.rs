#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyHeightMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyHeightMap<K> = BTreeMap<K, u32>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait EntryIdentity: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> EntryIdentity for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait EntryIdentity: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> EntryIdentity for K {}
