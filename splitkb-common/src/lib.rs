#![no_std]
//! Constants shared by both halves of a split keyboard.
//!
//! Anything in here is part of the contract between the two halves: changing a value means both
//! halves must be flashed with the same build.

pub mod math;
pub mod mods;
pub mod rpc;
