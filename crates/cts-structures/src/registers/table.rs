//! The metadata register address table.
//!
//! One entry per address 0x00..=0x3F, laid out exactly as the sensor transmits them. Reserved and
//! unimplemented slots are explicit entries so the table is total over its address space. This
//! table is the wire contract with the device firmware: offsets and widths must not drift.

use super::schema::{FieldSchema, RegisterSchema};
use crate::FixedPointFormat;

/// Number of 32-bit metadata registers
pub const NUM_REGISTERS: usize = 64;

const Q8_8: FixedPointFormat = FixedPointFormat::Q8_8;

/// Lens centre coordinates: 10 bit fields with 3 fractional bits
const CENTRE_FORMAT: FixedPointFormat = FixedPointFormat::unsigned(7, 3);

const RESERVED_WORD: &[FieldSchema] = &[FieldSchema::reserved("_reserved", 0, 32)];
const UNIMPLEMENTED_WORD: &[FieldSchema] = &[FieldSchema::reserved("_unimplemented", 0, 32)];

pub const TEMP_SENSOR_TEMPERATURE: FieldSchema = FieldSchema::fixed("temperature_sensor_0", 0, Q8_8);
pub const GLOBAL_FRM_CNT_FRAME_COUNT: FieldSchema = FieldSchema::unsigned("frame_count", 0, 32);
pub const SERIAL_NUMBER_LO: FieldSchema = FieldSchema::unsigned("serial_lo", 0, 32);
pub const SERIAL_NUMBER_HI: FieldSchema = FieldSchema::unsigned("serial_hi", 0, 32);
pub const FW_VERSION_PATCH: FieldSchema = FieldSchema::unsigned("ver_patch", 0, 8);
pub const FW_VERSION_MINOR: FieldSchema = FieldSchema::unsigned("ver_minor", 8, 8);
pub const FW_VERSION_MAJOR: FieldSchema = FieldSchema::unsigned("ver_major", 16, 8);
pub const CTS_CTRL_NUM_FRAMES_TO_AVG: FieldSchema = FieldSchema::unsigned("NUM_FRAMES_TO_AVG", 8, 3);
pub const CTS_CTRL_FRAME_RATE_MODE: FieldSchema = FieldSchema::unsigned("FRAME_RATE_MODE", 12, 4);
pub const IR_RESOLUTION_ROWS: FieldSchema = FieldSchema::unsigned("ir_rows", 0, 8);
pub const IR_RESOLUTION_COLS: FieldSchema = FieldSchema::unsigned("ir_cols", 8, 8);

pub const ADDR_TEMP_SENSOR: u8 = 0x00;
pub const ADDR_GLOBAL_FRM_CNT: u8 = 0x02;
pub const ADDR_SERIAL_NUMBER_LO: u8 = 0x14;
pub const ADDR_SERIAL_NUMBER_HI: u8 = 0x15;
pub const ADDR_FW_VERSION: u8 = 0x16;
pub const ADDR_CTS_CTRL: u8 = 0x1F;
pub const ADDR_IR_RESOLUTION: u8 = 0x3C;

const fn reserved(address: u8) -> RegisterSchema {
    RegisterSchema { address, name: "RESERVED", description: "Reserved.", fields: RESERVED_WORD }
}

const fn unimplemented(address: u8, name: &'static str) -> RegisterSchema {
    RegisterSchema { address, name, description: "Unimplemented.", fields: UNIMPLEMENTED_WORD }
}

/// The full register map schema, indexed by address.
pub static REGISTER_SCHEMAS: [RegisterSchema; NUM_REGISTERS] = [
    RegisterSchema {
        address: 0x00,
        name: "TEMP_SENSOR",
        description: "CMOS image sensor temperature, updated every frame.",
        fields: &[TEMP_SENSOR_TEMPERATURE, FieldSchema::reserved("_unimplemented", 16, 16)],
    },
    RegisterSchema {
        address: 0x01,
        name: "LED_LIFETIME",
        description: "Accumulated service time since initial configuration, in minutes.",
        fields: &[FieldSchema::unsigned("minutes", 0, 32)],
    },
    RegisterSchema {
        address: 0x02,
        name: "GLOBAL_FRM_CNT",
        description: "Number of thermal frames captured since reset.",
        fields: &[GLOBAL_FRM_CNT_FRAME_COUNT],
    },
    reserved(0x03),
    reserved(0x04),
    RegisterSchema {
        address: 0x05,
        name: "EXPOSURE",
        description: "CIS exposure.",
        fields: &[FieldSchema::unsigned("exposure", 0, 32)],
    },
    RegisterSchema {
        address: 0x06,
        name: "LUMINOSITY",
        description: "Accumulated luminosity, updated every frame.",
        fields: &[FieldSchema::unsigned("luminosity", 0, 32)],
    },
    RegisterSchema {
        address: 0x07,
        name: "IS_TEMP",
        description: "Averaged CIS measured temperature.",
        fields: &[FieldSchema::signed("image_sensor_temp", 0, 32)],
    },
    RegisterSchema {
        address: 0x08,
        name: "LINEAR_COMP_INST",
        description: "Linear compensation for the current frame.",
        fields: &[FieldSchema::signed("linear_comp_inst", 0, 32)],
    },
    RegisterSchema {
        address: 0x09,
        name: "LINEAR_COMP_AVG",
        description: "Moving average of linear compensation over 16 frames.",
        fields: &[FieldSchema::signed("linear_comp_avg", 0, 32)],
    },
    RegisterSchema {
        address: 0x0A,
        name: "SHIELDED_COMP_INST",
        description: "Shielded pixel compensation for the current frame.",
        fields: &[FieldSchema::signed("shielded_comp_inst", 0, 32)],
    },
    RegisterSchema {
        address: 0x0B,
        name: "SHIELDED_COMP_AVG",
        description: "Moving average of shielded pixel compensation over 16 frames.",
        fields: &[FieldSchema::signed("shielded_comp_avg", 0, 32)],
    },
    unimplemented(0x0C, "MAGNIFICATION_COMP_INST"),
    unimplemented(0x0D, "MAGNIFICATION_COMP_AVG"),
    unimplemented(0x0E, "GRAV_COMP"),
    unimplemented(0x0F, "WARMUP_COMP"),
    unimplemented(0x10, "LONG_TERM_COMP"),
    unimplemented(0x11, "STRAY_LIGHT_COMP"),
    reserved(0x12),
    reserved(0x13),
    RegisterSchema {
        address: 0x14,
        name: "SERIAL_NUMBER_LO",
        description: "Lower word of the device serial number.",
        fields: &[SERIAL_NUMBER_LO],
    },
    RegisterSchema {
        address: 0x15,
        name: "SERIAL_NUMBER_HI",
        description: "Upper word of the device serial number.",
        fields: &[SERIAL_NUMBER_HI],
    },
    RegisterSchema {
        address: 0x16,
        name: "FW_VERSION",
        description: "Firmware semantic version.",
        fields: &[
            FW_VERSION_PATCH,
            FW_VERSION_MINOR,
            FW_VERSION_MAJOR,
            FieldSchema::reserved("_reserved", 24, 8),
        ],
    },
    RegisterSchema {
        address: 0x17,
        name: "FOV_LENS",
        description: "Field of view lens identifier.",
        fields: &[
            FieldSchema::unsigned("lens_index", 0, 6),
            FieldSchema::unsigned("assembly_type_generation_index", 6, 6),
            FieldSchema::unsigned("lens_material_index", 12, 4),
            FieldSchema::unsigned("config_type_index", 16, 6),
            FieldSchema::unsigned("metadata_version", 22, 5),
            FieldSchema::unsigned("die_type_index", 27, 5),
        ],
    },
    RegisterSchema {
        address: 0x18,
        name: "DECENTRATION",
        description: "Lens centration point and the row and column start indices for cropping.",
        fields: &[
            FieldSchema::fixed("centre_x", 0, CENTRE_FORMAT),
            FieldSchema::fixed("centre_y", 10, CENTRE_FORMAT),
            FieldSchema::unsigned("column_start", 20, 6),
            FieldSchema::unsigned("row_start", 26, 6),
        ],
    },
    RegisterSchema {
        address: 0x19,
        name: "CALIB_PARAMS",
        description: "Calibration parameters.",
        fields: &[FieldSchema::unsigned("calib_params", 0, 32)],
    },
    reserved(0x1A),
    reserved(0x1B),
    reserved(0x1C),
    reserved(0x1D),
    reserved(0x1E),
    RegisterSchema {
        address: 0x1F,
        name: "CTS_CTRL",
        description: "Image processing enables, frames averaged (2^NUM_FRAMES_TO_AVG) and frame rate mode.",
        fields: &[
            FieldSchema::unsigned("EXPOSURE_CTRL_ENABLE_BIT", 0, 1),
            FieldSchema::unsigned("BAD_PIXEL_ENABLE_BIT", 1, 1),
            FieldSchema::reserved("_reserved2", 2, 1),
            FieldSchema::reserved("_reserved3", 3, 1),
            FieldSchema::unsigned("LINEAR_COMP_ENABLE_BIT", 4, 1),
            FieldSchema::unsigned("DX_CENTROID_ENABLE_BIT", 5, 1),
            FieldSchema::reserved("_reserved6", 6, 1),
            FieldSchema::unsigned("SHIELDED_COMP_ENABLE_BIT", 7, 1),
            CTS_CTRL_NUM_FRAMES_TO_AVG,
            FieldSchema::reserved("_reserved11", 11, 1),
            CTS_CTRL_FRAME_RATE_MODE,
            FieldSchema::reserved("_reserved16_23", 16, 8),
            FieldSchema::unsigned("ENABLE_CMOS_TEST_PATTERN", 24, 1),
            FieldSchema::unsigned("ENABLE_CENTROID_TEST_PATTERN", 25, 1),
            FieldSchema::reserved("_reserved26_28", 26, 3),
            FieldSchema::unsigned("DISABLE_I2C_POLL", 29, 1),
            FieldSchema::reserved("_reserved30", 30, 1),
            FieldSchema::unsigned("DISABLE_IMG_PROC", 31, 1),
        ],
    },
    RegisterSchema {
        address: 0x20,
        name: "BB_WIDTH",
        description: "Default bounding box widths, 6 bit unsigned.",
        fields: &[
            FieldSchema::unsigned("width0", 0, 6),
            FieldSchema::reserved("_reserved6_7", 6, 2),
            FieldSchema::unsigned("width1", 8, 6),
            FieldSchema::reserved("_reserved14_15", 14, 2),
            FieldSchema::unsigned("width2", 16, 6),
            FieldSchema::reserved("_reserved22_23", 22, 2),
            FieldSchema::unsigned("width3", 24, 6),
            FieldSchema::reserved("_reserved30_31", 30, 2),
        ],
    },
    RegisterSchema {
        address: 0x21,
        name: "BB_HEIGHT",
        description: "Default bounding box heights, 6 bit unsigned.",
        fields: &[
            FieldSchema::unsigned("height0", 0, 6),
            FieldSchema::reserved("_reserved6_7", 6, 2),
            FieldSchema::unsigned("height1", 8, 6),
            FieldSchema::reserved("_reserved14_15", 14, 2),
            FieldSchema::unsigned("height2", 16, 6),
            FieldSchema::reserved("_reserved22_23", 22, 2),
            FieldSchema::unsigned("height3", 24, 6),
            FieldSchema::reserved("_reserved30_31", 30, 2),
        ],
    },
    RegisterSchema {
        address: 0x22,
        name: "THRES",
        description: "Default bounding box thresholds.",
        fields: &[
            FieldSchema::unsigned("thres0", 0, 8),
            FieldSchema::unsigned("thres1", 8, 8),
            FieldSchema::unsigned("thres2", 16, 8),
            FieldSchema::unsigned("thres3", 24, 8),
        ],
    },
    RegisterSchema {
        address: 0x23,
        name: "TEMP_OFFSET",
        description: "Per pixel temperature offset C and CIS temperature offset E, both <8,8>.",
        fields: &[
            FieldSchema::fixed("conv_temp_offset", 0, Q8_8),
            FieldSchema::fixed("is_temp_offset", 16, Q8_8),
        ],
    },
    RegisterSchema {
        address: 0x24,
        name: "EXPCTRL_LUMITGT",
        description: "Target accumulated luminosity.",
        fields: &[FieldSchema::unsigned("luminosity_target", 0, 32)],
    },
    RegisterSchema {
        address: 0x25,
        name: "EXPCTRL_LUMITHS",
        description: "Accumulated luminosity threshold.",
        fields: &[FieldSchema::unsigned("luminosity_thresh", 0, 32)],
    },
    RegisterSchema {
        address: 0x26,
        name: "EXPCTRL_EXPMAX",
        description: "Maximum corrected exposure value.",
        fields: &[FieldSchema::unsigned("exposure_max", 0, 32)],
    },
    RegisterSchema {
        address: 0x27,
        name: "EXPCTRL_EXPMIN",
        description: "Minimum corrected exposure value.",
        fields: &[FieldSchema::unsigned("exposure_min", 0, 32)],
    },
    RegisterSchema {
        address: 0x28,
        name: "EXPCTRL_CONFIG",
        description: "Exposure correction step value.",
        fields: &[
            FieldSchema::unsigned("exposure_correction", 0, 10),
            FieldSchema::reserved("_reserved10_31", 10, 22),
        ],
    },
    RegisterSchema {
        address: 0x29,
        name: "SHIELDED_COMP_CONFIG",
        description: "Constant multiplier for the shielded compensation value, <8,8> signed.",
        fields: &[
            FieldSchema::fixed("shielded_multiplier", 0, Q8_8),
            FieldSchema::reserved("_reserved16_31", 16, 16),
        ],
    },
    RegisterSchema {
        address: 0x2A,
        name: "EXPCTRL_LUMIBBTGT",
        description: "Target accumulated luminosity of bounding boxes only.",
        fields: &[FieldSchema::unsigned("bb_luminosity_target", 0, 32)],
    },
    RegisterSchema {
        address: 0x2B,
        name: "EXPCTRL_LUMIBBTHS",
        description: "Accumulated luminosity threshold of bounding boxes only.",
        fields: &[FieldSchema::unsigned("bb_luminosity_thresh", 0, 32)],
    },
    reserved(0x2C),
    reserved(0x2D),
    reserved(0x2E),
    reserved(0x2F),
    reserved(0x30),
    reserved(0x31),
    reserved(0x32),
    reserved(0x33),
    reserved(0x34),
    reserved(0x35),
    reserved(0x36),
    reserved(0x37),
    reserved(0x38),
    reserved(0x39),
    reserved(0x3A),
    reserved(0x3B),
    RegisterSchema {
        address: 0x3C,
        name: "IR_RESOLUTION",
        description: "Thermal image pixel dimensions.",
        fields: &[
            IR_RESOLUTION_ROWS,
            IR_RESOLUTION_COLS,
            FieldSchema::reserved("_reserved16_31", 16, 16),
        ],
    },
    RegisterSchema {
        address: 0x3D,
        name: "CMOS_RESOLUTION",
        description: "CIS pixel dimensions.",
        fields: &[
            FieldSchema::unsigned("cmos_rows", 0, 16),
            FieldSchema::unsigned("cmos_cols", 16, 16),
        ],
    },
    RegisterSchema {
        address: 0x3E,
        name: "CMOS_FRAME_CRC",
        description: "CMOS frame checksum and error count.",
        fields: &[
            FieldSchema::unsigned("checksum", 0, 16),
            FieldSchema::unsigned("error_count", 16, 16),
        ],
    },
    RegisterSchema {
        address: 0x3F,
        name: "CMOS_FRAME_CNT",
        description: "CMOS frame count.",
        fields: &[FieldSchema::unsigned("cmos_frame_count", 0, 32)],
    },
];
