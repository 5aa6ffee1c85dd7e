use crate::CtsDataError;
use serde::Serialize;

/// Capacity of the detection list section
pub const MAX_NUM_DETECTIONS: usize = 21;

/// CV algorithm output for one detected heat blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CvDetection {
    pub id: u8,
    pub label: u8,
    pub temperature_centre_location_x: u8,
    pub temperature_centre_location_y: u8,
    pub frames_since_motion: u32,
    pub peak_temperature: f32,
    pub foot_position_estimate_x: f32,
    pub foot_position_estimate_y: f32,
}

impl CvDetection {
    /// The list has no count field; unused slots are sent as all zero bytes.
    pub fn is_empty_slot(&self) -> bool {
        self.id == 0
            && self.label == 0
            && self.temperature_centre_location_x == 0
            && self.temperature_centre_location_y == 0
            && self.frames_since_motion == 0
            && self.peak_temperature.to_bits() == 0
            && self.foot_position_estimate_x.to_bits() == 0
            && self.foot_position_estimate_y.to_bits() == 0
    }
}

/// Fixed-capacity, ordered list of detection slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionList {
    records: Vec<CvDetection>,
}

impl DetectionList {
    pub fn new_empty() -> Self {
        Self {
            records: vec![CvDetection::default(); MAX_NUM_DETECTIONS],
        }
    }

    pub fn from_records(records: Vec<CvDetection>) -> Result<Self, CtsDataError> {
        if records.len() != MAX_NUM_DETECTIONS {
            return Err(CtsDataError::size_mismatch(
                "detection list records",
                MAX_NUM_DETECTIONS,
                records.len(),
            ));
        }
        Ok(Self { records })
    }

    /// Builds a full list from the leading detections, zero filling the remaining slots.
    pub fn from_leading(detections: &[CvDetection]) -> Result<Self, CtsDataError> {
        if detections.len() > MAX_NUM_DETECTIONS {
            return Err(CtsDataError::BadParameters(format!(
                "At most {} detections fit in a frame, {} were given!",
                MAX_NUM_DETECTIONS,
                detections.len()
            )));
        }
        let mut list = Self::new_empty();
        list.records[..detections.len()].copy_from_slice(detections);
        Ok(list)
    }

    pub fn records(&self) -> &[CvDetection] {
        &self.records
    }

    /// Slots that carry a detection, in wire order
    pub fn populated(&self) -> impl Iterator<Item = &CvDetection> {
        self.records.iter().filter(|record| !record.is_empty_slot())
    }
}

impl Default for DetectionList {
    fn default() -> Self {
        Self::new_empty()
    }
}
