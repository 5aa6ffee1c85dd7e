// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Replays a capture file made of back-to-back raw frames
//!
//! The whole capture is read up front. Frames are served in file order; once the last frame has
//! been served the transport either wraps around or reports [`ReplayError::Exhausted`].

use crate::hal::SpiTransport;
use cts_serialization::FRAME_BYTE_COUNT;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Replay transport errors
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Capture could not be read
    #[error("Failed to read capture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Capture holds no frames
    #[error("Capture {0} is empty")]
    EmptyCapture(String),
    /// Capture length is not a whole number of frames
    #[error("Capture {name} is {length} bytes, not a multiple of the {frame_length} byte frame")]
    PartialFrame {
        name: String,
        length: usize,
        frame_length: usize,
    },
    /// Every frame has been served and looping is off
    #[error("Capture exhausted after {frames_served} frames")]
    Exhausted { frames_served: u64 },
    /// Receive buffer is not one frame long
    #[error("Receive buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

impl ReplayError {
    /// True for the clean end of a non-looping capture
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ReplayError::Exhausted { .. })
    }
}

/// Capture file transport
pub struct ReplayTransport {
    name: String,
    capture: Vec<u8>,
    cursor: usize,
    loop_capture: bool,
    frames_served: u64,
}

impl ReplayTransport {
    /// Load a capture from disk
    ///
    /// # Example
    /// ```no_run
    /// use cts_hal::{ReplayTransport, SpiTransport};
    /// use cts_serialization::FRAME_BYTE_COUNT;
    ///
    /// let mut transport = ReplayTransport::open("capture.bin", false).unwrap();
    /// let mut rx = vec![0u8; FRAME_BYTE_COUNT];
    /// transport.read_frame(&mut rx).unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>, loop_capture: bool) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let capture = std::fs::read(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let transport = Self::from_bytes(path.display().to_string(), capture, loop_capture)?;
        info!(
            capture = %path.display(),
            frames = transport.frame_count(),
            loop_capture,
            "Opened frame capture"
        );
        Ok(transport)
    }

    /// Wrap an in-memory capture
    pub fn from_bytes(
        name: impl Into<String>,
        capture: Vec<u8>,
        loop_capture: bool,
    ) -> Result<Self, ReplayError> {
        let name = name.into();
        if capture.is_empty() {
            return Err(ReplayError::EmptyCapture(name));
        }
        if capture.len() % FRAME_BYTE_COUNT != 0 {
            return Err(ReplayError::PartialFrame {
                name,
                length: capture.len(),
                frame_length: FRAME_BYTE_COUNT,
            });
        }
        Ok(Self {
            name,
            capture,
            cursor: 0,
            loop_capture,
            frames_served: 0,
        })
    }

    /// Number of frames in the capture
    pub fn frame_count(&self) -> usize {
        self.capture.len() / FRAME_BYTE_COUNT
    }

    /// Frames handed out so far, counting repeats when looping
    pub fn frames_served(&self) -> u64 {
        self.frames_served
    }
}

impl SpiTransport for ReplayTransport {
    type Error = ReplayError;

    fn read_frame(&mut self, rx: &mut [u8]) -> Result<(), Self::Error> {
        if rx.len() != FRAME_BYTE_COUNT {
            return Err(ReplayError::BufferSize {
                expected: FRAME_BYTE_COUNT,
                actual: rx.len(),
            });
        }
        if self.cursor == self.capture.len() {
            if !self.loop_capture {
                return Err(ReplayError::Exhausted {
                    frames_served: self.frames_served,
                });
            }
            debug!(capture = %self.name, "Rewinding capture");
            self.cursor = 0;
        }
        rx.copy_from_slice(&self.capture[self.cursor..self.cursor + FRAME_BYTE_COUNT]);
        self.cursor += FRAME_BYTE_COUNT;
        self.frames_served += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
