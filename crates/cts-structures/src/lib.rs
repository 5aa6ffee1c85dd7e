//! The core crate for CTS telemetry. Defines the data types decoded from a sensor frame and the
//! primitives used to decode them.
//!
//! - [`BitRange`] and [`FixedPointFormat`]: shift-and-mask sub-field access and `<I,F>` conversion
//! - [`registers`]: the 64 slot metadata register schema and its decoded [`registers::RegisterMap`]
//! - [`PixelGrid`]: thermal and foreground images
//! - [`CvDetection`] / [`DetectionList`]: onboard computer vision output

mod bitfield;
mod detection;
mod error;
mod fixed_point;
mod pixel_grid;
pub mod registers;

pub use bitfield::{BitRange, CONTAINER_BITS};
pub use detection::{CvDetection, DetectionList, MAX_NUM_DETECTIONS};
pub use error::CtsDataError;
pub use fixed_point::FixedPointFormat;
pub use pixel_grid::{PixelGrid, PIXEL_COUNT, PIXEL_HEIGHT, PIXEL_WIDTH};
