//! Error types and error handling for the checker.
//!
//! This module defines the error types used by every phase. It includes:
//!
//! - An error structure carrying the item the failure was found in
//! - Specific error variants for input decoding and semantic checking
//! - The input/semantic classification callers use to report failures
//! - Helpful suggestions for the most common mistakes

pub mod errors;
