//! Golden header tests.
//!
//! `golden/` holds one header per preset, written by a standalone Python
//! script that evaluates the CIE1931 formula directly, not by this crate.
//! Rendering must match them byte for byte.
//!
//! The wide header is byte-identical to the output of the 10-bit Python
//! generator, including the blank line after `};`. The byte header differs
//! from the 8-bit generator in two places: its note reads `see cie1931`, and
//! a blank line follows the comment block.
