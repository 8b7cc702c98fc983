//! Hash algorithms behind the partition mapping.
//!
//! Both algorithms are public, fully specified 64-bit functions so any
//! other implementation of the hashinator can reproduce them bit for bit:
//!
//! - integer keys: MurmurHash3's 64-bit finalizer ([`fmix64`])
//! - string keys: XXH64 with seed 0 ([`xxh64`])
//!
//! The versions here are written directly from the published algorithm
//! definitions with no third-party code, and back the reference
//! hashinator.

pub mod mix;
pub mod xxh64;

pub use mix::fmix64;
pub use xxh64::xxh64;
