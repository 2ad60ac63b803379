#![no_std]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::doc_markdown,
    clippy::float_cmp,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::struct_excessive_bools,
    clippy::too_many_lines
)]

//! Shared logic for the on-board computer feature set.
//!
//! This crate stays portable across MCU firmware and host tooling by avoiding
//! the Rust standard library. Everything time-dependent is generic over a
//! monotonic instant type so the identical state machines can be driven by the
//! firmware clock on the target and by a mock clock in the test suite.

pub mod clock;
pub mod controller;
pub mod digits;
pub mod hal;
pub mod input;
pub mod laptimer;
pub mod lexicon;
pub mod modes;
pub mod sensors;
pub mod settings;
pub mod stopwatch;
pub mod threshold;
pub mod units;
