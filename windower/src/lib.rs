//! A headless scroll-windowing engine.
//!
//! Given an entry count, per-entry height estimates, and a stream of measured
//! heights, this crate answers one question at interactive frame rates: which
//! contiguous slice of entries intersects the viewport for a given scroll
//! offset, and how much padding stands in for everything outside that slice.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport height and scroll offset
//! - per-entry height estimates and (optionally) measured heights
//!
//! Measured heights are cached by entry *identity*, not by index, so they
//! follow entries across reorders and rebuilds of the backing data set.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod key;
mod options;
mod prefix;
mod types;
mod windower;

#[cfg(test)]
mod tests;

pub use options::{OnChangeCallback, WindowerOptions};
pub use types::{Align, EntryKey, VirtualWindow};
pub use windower::Windower;

#[doc(hidden)]
pub use key::EntryIdentity;
