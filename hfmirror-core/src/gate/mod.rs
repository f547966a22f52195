//! Browser gate.
//!
//! Browser-originated requests may only reach a handful of pages; tools
//! and libraries are never affected. Classification is a heuristic over
//! `Accept` and `User-Agent` and will misclassify some clients. It keeps
//! casual browsing off the mirror. It does not secure anything.

mod access;
mod classifier;

#[cfg(test)]
mod tests;

pub use access::{AccessGate, Denial};
pub use classifier::{BrowserClassifier, ClientKind};
