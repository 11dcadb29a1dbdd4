//! Data loading and dataset implementations
//!
//! This module provides implementations of the Dataset trait for the sparse
//! text formats the classifier reads.

pub mod libsvm;

pub use self::libsvm::*;
