#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

#[cfg(feature = "std")]
pub(crate) type KeySet<V> = HashSet<V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<V> = BTreeSet<V>;
