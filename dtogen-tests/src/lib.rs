//! Entities used to exercise the generator end to end.
//!
//! `build.rs` scans this crate; the generated transfer structs and `ToDto`
//! impls are included here, at the crate root.

pub mod domain;

dtogen::include_dtos!();
