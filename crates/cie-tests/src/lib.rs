//! Integration tests for the CIE1931 table crates.
//!
//! End-to-end checks: generate, write to disk, read back, and compare with
//! reference headers.

mod golden;
