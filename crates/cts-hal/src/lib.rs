// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Transport boundary for CTS telemetry.
//!
//! The frame codec only needs "a function that returns N raw bytes on demand". That function is
//! the [`hal::SpiTransport`] trait; the [`platforms`] module provides the sources available on a
//! host without the sensor attached.

/// Transport trait definitions
pub mod hal;
/// Transport implementations
pub mod platforms;

pub use hal::SpiTransport;
pub use platforms::{ReplayError, ReplayTransport, SyntheticError, SyntheticTransport};
