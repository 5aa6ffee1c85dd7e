//! Detection section: `MAX_NUM_DETECTIONS` packed 20 byte records.
//!
//! Record layout, little endian:
//! `id:u8 | label:u8 | centre_x:u8 | centre_y:u8 | frames_since_motion:u32 | peak:f32 | foot_x:f32 | foot_y:f32`

use crate::section_kind::DETECTION_RECORD_BYTE_COUNT;
use crate::SectionPayload;
use byteorder::{ByteOrder, LittleEndian};
use cts_structures::{CtsDataError, CvDetection, DetectionList, MAX_NUM_DETECTIONS};

fn read_record(bytes: &[u8]) -> CvDetection {
    CvDetection {
        id: bytes[0],
        label: bytes[1],
        temperature_centre_location_x: bytes[2],
        temperature_centre_location_y: bytes[3],
        frames_since_motion: LittleEndian::read_u32(&bytes[4..8]),
        peak_temperature: LittleEndian::read_f32(&bytes[8..12]),
        foot_position_estimate_x: LittleEndian::read_f32(&bytes[12..16]),
        foot_position_estimate_y: LittleEndian::read_f32(&bytes[16..20]),
    }
}

fn write_record(record: &CvDetection, bytes: &mut [u8]) {
    bytes[0] = record.id;
    bytes[1] = record.label;
    bytes[2] = record.temperature_centre_location_x;
    bytes[3] = record.temperature_centre_location_y;
    LittleEndian::write_u32(&mut bytes[4..8], record.frames_since_motion);
    LittleEndian::write_f32(&mut bytes[8..12], record.peak_temperature);
    LittleEndian::write_f32(&mut bytes[12..16], record.foot_position_estimate_x);
    LittleEndian::write_f32(&mut bytes[16..20], record.foot_position_estimate_y);
}

impl SectionPayload for DetectionList {
    const PAYLOAD_BYTE_COUNT: usize = MAX_NUM_DETECTIONS * DETECTION_RECORD_BYTE_COUNT;
    const PAYLOAD_NAME: &'static str = "detection list payload";

    fn try_write_to_payload(&self, byte_destination: &mut [u8]) -> Result<(), CtsDataError> {
        Self::verify_payload_length(byte_destination)?;
        if self.records().len() != MAX_NUM_DETECTIONS {
            return Err(CtsDataError::size_mismatch(
                "detection list records",
                MAX_NUM_DETECTIONS,
                self.records().len(),
            ));
        }
        for (record, bytes) in self
            .records()
            .iter()
            .zip(byte_destination.chunks_exact_mut(DETECTION_RECORD_BYTE_COUNT))
        {
            write_record(record, bytes);
        }
        Ok(())
    }

    fn try_read_from_payload(byte_source: &[u8]) -> Result<Self, CtsDataError> {
        Self::verify_payload_length(byte_source)?;
        let records = byte_source
            .chunks_exact(DETECTION_RECORD_BYTE_COUNT)
            .map(read_record)
            .collect();
        DetectionList::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        let mut bytes = vec![0u8; DetectionList::PAYLOAD_BYTE_COUNT];
        let second = &mut bytes[DETECTION_RECORD_BYTE_COUNT..2 * DETECTION_RECORD_BYTE_COUNT];
        second[..4].copy_from_slice(&[9, 2, 11, 7]);
        second[4..8].copy_from_slice(&300u32.to_le_bytes());
        second[8..12].copy_from_slice(&36.5f32.to_le_bytes());
        second[12..16].copy_from_slice(&4.25f32.to_le_bytes());
        second[16..20].copy_from_slice(&(-1.0f32).to_le_bytes());

        let list = DetectionList::try_read_from_payload(&bytes).unwrap();
        assert!(list.records()[0].is_empty_slot());
        let record = list.records()[1];
        assert_eq!(
            record,
            CvDetection {
                id: 9,
                label: 2,
                temperature_centre_location_x: 11,
                temperature_centre_location_y: 7,
                frames_since_motion: 300,
                peak_temperature: 36.5,
                foot_position_estimate_x: 4.25,
                foot_position_estimate_y: -1.0,
            }
        );
        assert_eq!(list.populated().count(), 1);

        let mut written = vec![0u8; DetectionList::PAYLOAD_BYTE_COUNT];
        list.try_write_to_payload(&mut written).unwrap();
        assert_eq!(written, bytes);
    }

    #[test]
    fn test_every_slot_is_written() {
        let last = CvDetection { id: 99, label: 3, ..Default::default() };
        let mut records = vec![CvDetection::default(); MAX_NUM_DETECTIONS];
        records[MAX_NUM_DETECTIONS - 1] = last;
        let list = DetectionList::from_records(records).unwrap();

        let mut written = vec![0xEEu8; DetectionList::PAYLOAD_BYTE_COUNT];
        list.try_write_to_payload(&mut written).unwrap();
        assert!(written[..(MAX_NUM_DETECTIONS - 1) * DETECTION_RECORD_BYTE_COUNT]
            .iter()
            .all(|byte| *byte == 0));

        let decoded = DetectionList::try_read_from_payload(&written).unwrap();
        assert_eq!(decoded.records().len(), MAX_NUM_DETECTIONS);
        assert_eq!(decoded.records()[MAX_NUM_DETECTIONS - 1], last);
    }

    #[test]
    fn test_wrong_record_counts_never_build_a_list() {
        for count in [0, MAX_NUM_DETECTIONS - 1, MAX_NUM_DETECTIONS + 4] {
            let result = DetectionList::from_records(vec![CvDetection::default(); count]);
            assert!(matches!(
                result,
                Err(CtsDataError::SizeMismatch { expected: MAX_NUM_DETECTIONS, actual, .. }) if actual == count
            ));
        }
        let crowded = vec![CvDetection { id: 1, ..Default::default() }; MAX_NUM_DETECTIONS + 4];
        assert!(DetectionList::from_leading(&crowded).is_err());
    }
}
