//! Test helpers shared across crates.
//!
//! This crate provides a sample package snapshot mirroring a small Go
//! package, helpers for writing snapshots to disk, and a throwaway Go module
//! for compiling generated code when a toolchain is available.

pub mod go;
pub mod sample;
