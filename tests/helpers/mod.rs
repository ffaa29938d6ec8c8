//! Test helpers module
//!
//! Builders for test events and shared setup for the admission and store tests.

#![allow(dead_code)]

pub mod test_data;
pub mod database_helper;
pub mod faulty_store;

pub use test_data::*;
pub use database_helper::*;
pub use faulty_store::*;
