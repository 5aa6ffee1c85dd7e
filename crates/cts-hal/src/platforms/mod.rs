// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Replay of recorded frame captures
pub mod replay;
/// Generated frames for running without a sensor
pub mod synthetic;

pub use replay::{ReplayError, ReplayTransport};
pub use synthetic::{SyntheticError, SyntheticTransport};
