// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Full-duplex SPI frame reads.
pub mod spi;

pub use spi::SpiTransport;
