use crate::{CtsDataError, FixedPointFormat};
use ndarray::Array2;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Thermal image pixel height
pub const PIXEL_HEIGHT: usize = 15;

/// Thermal image pixel width
pub const PIXEL_WIDTH: usize = 20;

/// Number of samples in one image section
pub const PIXEL_COUNT: usize = PIXEL_HEIGHT * PIXEL_WIDTH;

/// Row-major `PIXEL_HEIGHT x PIXEL_WIDTH` grid of real values decoded from <8,8> samples.
///
/// Used for both the thermal image and the CV foreground image.
///
/// # Example
/// ```
/// use cts_structures::{PixelGrid, PIXEL_COUNT};
///
/// let grid = PixelGrid::from_raw_samples(&[256i16; PIXEL_COUNT]).unwrap();
/// assert_eq!(grid.get(14, 19), Some(1.0));
/// assert_eq!(grid.mean(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    values: Array2<f32>,
}

impl PixelGrid {
    pub const SAMPLE_FORMAT: FixedPointFormat = FixedPointFormat::Q8_8;

    pub fn new_zeroed() -> Self {
        Self {
            values: Array2::zeros((PIXEL_HEIGHT, PIXEL_WIDTH)),
        }
    }

    /// Reshapes a flat row-major run of raw <8,8> samples into a grid.
    pub fn from_raw_samples(samples: &[i16]) -> Result<Self, CtsDataError> {
        if samples.len() != PIXEL_COUNT {
            return Err(CtsDataError::size_mismatch(
                "pixel grid samples",
                PIXEL_COUNT,
                samples.len(),
            ));
        }
        let values = Array2::from_shape_fn((PIXEL_HEIGHT, PIXEL_WIDTH), |(row, col)| {
            Self::SAMPLE_FORMAT.raw_to_real(samples[row * PIXEL_WIDTH + col] as i64) as f32
        });
        Ok(Self { values })
    }

    pub fn from_values(values: Array2<f32>) -> Result<Self, CtsDataError> {
        if values.dim() != (PIXEL_HEIGHT, PIXEL_WIDTH) {
            return Err(CtsDataError::BadParameters(format!(
                "Pixel grids must be {}x{}, got {}x{}!",
                PIXEL_HEIGHT,
                PIXEL_WIDTH,
                values.nrows(),
                values.ncols()
            )));
        }
        Ok(Self { values })
    }

    pub fn from_fn<F>(mut value_at: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        Self {
            values: Array2::from_shape_fn((PIXEL_HEIGHT, PIXEL_WIDTH), |(row, col)| {
                value_at(row, col)
            }),
        }
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.values.get((row, col)).copied()
    }

    /// Converts back to raw samples in row-major order, failing if any value leaves the <8,8> range.
    pub fn to_raw_samples(&self) -> Result<Vec<i16>, CtsDataError> {
        self.values
            .iter()
            .map(|value| Self::SAMPLE_FORMAT.real_to_raw(*value as f64).map(|raw| raw as i16))
            .collect()
    }

    pub fn min(&self) -> f32 {
        self.values.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.values.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn mean(&self) -> f32 {
        self.values.mean().unwrap_or(0.0)
    }

    pub fn rows(&self) -> Vec<Vec<f32>> {
        self.values.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

// Serialized as nested rows so JSON consumers need not know the ndarray layout
impl Serialize for PixelGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PixelGrid", 2)?;
        state.serialize_field("shape", &[PIXEL_HEIGHT, PIXEL_WIDTH])?;
        state.serialize_field("rows", &self.rows())?;
        state.end()
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new_zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let samples: Vec<i16> = (0..PIXEL_COUNT as i16).map(|i| i * 16).collect();
        let grid = PixelGrid::from_raw_samples(&samples).unwrap();
        assert_eq!(grid.get(0, 1), Some(0.0625));
        assert_eq!(grid.get(1, 0), Some(1.25));
        assert_eq!(grid.to_raw_samples().unwrap(), samples);
    }

    #[test]
    fn test_wrong_sample_count() {
        let result = PixelGrid::from_raw_samples(&[0i16; PIXEL_COUNT - 1]);
        assert!(matches!(result, Err(CtsDataError::SizeMismatch { expected: PIXEL_COUNT, .. })));
    }

    #[test]
    fn test_out_of_range_value_does_not_encode() {
        let grid = PixelGrid::from_fn(|row, col| if (row, col) == (3, 4) { 200.0 } else { 0.0 });
        assert!(matches!(grid.to_raw_samples(), Err(CtsDataError::RangeError { .. })));
    }

    #[test]
    fn test_from_values_checks_shape() {
        let values = Array2::from_elem((PIXEL_HEIGHT, PIXEL_WIDTH), 21.5f32);
        let grid = PixelGrid::from_values(values.clone()).unwrap();
        assert_eq!(grid.values(), &values);
        assert_eq!(grid.to_raw_samples().unwrap(), vec![5504i16; PIXEL_COUNT]);

        let transposed = Array2::<f32>::zeros((PIXEL_WIDTH, PIXEL_HEIGHT));
        assert!(matches!(
            PixelGrid::from_values(transposed),
            Err(CtsDataError::BadParameters(_))
        ));
    }

    #[test]
    fn test_statistics() {
        let grid = PixelGrid::from_fn(|row, _| row as f32 - 7.0);
        assert_eq!(grid.min(), -7.0);
        assert_eq!(grid.max(), 7.0);
        assert_eq!(grid.mean(), 0.0);
    }
}
