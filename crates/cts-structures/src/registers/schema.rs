use crate::{BitRange, CtsDataError, FixedPointFormat};
use serde::Serialize;

/// How the bits of one field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    Unsigned,
    /// Two's complement over the field's own width
    Signed,
    FixedPoint(FixedPointFormat),
    /// Opaque bits; decoded raw and written back unchanged
    Reserved,
}

/// A decoded field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldValue {
    Unsigned(u32),
    Signed(i32),
    Real(f64),
    Reserved(u32),
}

impl FieldValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::Unsigned(value) | FieldValue::Reserved(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Signed(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Real(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Unsigned(value) => write!(f, "{value}"),
            FieldValue::Signed(value) => write!(f, "{value}"),
            FieldValue::Real(value) => write!(f, "{value}"),
            FieldValue::Reserved(value) => write!(f, "{value:#x}"),
        }
    }
}

/// A named bit range inside one register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub bits: BitRange,
    pub kind: FieldKind,
}

impl FieldSchema {
    pub const fn unsigned(name: &'static str, offset: u8, width: u8) -> Self {
        Self { name, bits: BitRange::new(offset, width), kind: FieldKind::Unsigned }
    }

    pub const fn signed(name: &'static str, offset: u8, width: u8) -> Self {
        Self { name, bits: BitRange::new(offset, width), kind: FieldKind::Signed }
    }

    pub const fn fixed(name: &'static str, offset: u8, format: FixedPointFormat) -> Self {
        Self {
            name,
            bits: BitRange::new(offset, format.total_bits()),
            kind: FieldKind::FixedPoint(format),
        }
    }

    pub const fn reserved(name: &'static str, offset: u8, width: u8) -> Self {
        Self { name, bits: BitRange::new(offset, width), kind: FieldKind::Reserved }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self.kind, FieldKind::Reserved)
    }

    pub fn decode(&self, word: u32) -> FieldValue {
        match self.kind {
            FieldKind::Unsigned => FieldValue::Unsigned(self.bits.extract_unsigned(word)),
            FieldKind::Signed => FieldValue::Signed(self.bits.extract_signed(word)),
            FieldKind::FixedPoint(format) => FieldValue::Real(format.extract(self.bits, word)),
            FieldKind::Reserved => FieldValue::Reserved(self.bits.extract_unsigned(word)),
        }
    }

    /// Writes `value` into this field of `word`. The value must match the field kind.
    pub fn encode(&self, word: u32, value: FieldValue) -> Result<u32, CtsDataError> {
        let written = match (self.kind, value) {
            (FieldKind::Unsigned, FieldValue::Unsigned(raw))
            | (FieldKind::Reserved, FieldValue::Reserved(raw)) => {
                self.bits.insert_unsigned(word, raw)
            }
            (FieldKind::Signed, FieldValue::Signed(raw)) => self.bits.insert_signed(word, raw),
            (FieldKind::FixedPoint(format), FieldValue::Real(real)) => {
                format.insert(self.bits, word, real)
            }
            (kind, value) => {
                return Err(CtsDataError::BadParameters(format!(
                    "Field '{}' is {:?} and cannot hold {:?}!",
                    self.name, kind, value
                )))
            }
        };
        // Re-label the generic bit range error with the field name
        written.map_err(|err| match err {
            CtsDataError::RangeError { value, width, .. } => CtsDataError::RangeError {
                field: self.name.to_string(),
                value,
                width,
            },
            other => other,
        })
    }
}

/// Layout of one 32-bit register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSchema {
    pub address: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSchema],
}

impl RegisterSchema {
    /// True when the slot holds nothing but reserved or unimplemented bits.
    pub fn is_reserved(&self) -> bool {
        self.fields.iter().all(FieldSchema::is_reserved)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Extracts every named field of `word`, reserved bits included.
    pub fn decode(&'static self, word: u32) -> DecodedRegister {
        DecodedRegister {
            schema: self,
            address: self.address,
            name: self.name,
            raw: word,
            fields: self.fields.iter().map(|field| (field.name, field.decode(word))).collect(),
        }
    }

    /// Re-encodes a decoded register. Every field, reserved ones included, is written back, so
    /// an unmodified decode round-trips bit for bit.
    pub fn encode(&self, decoded: &DecodedRegister) -> Result<u32, CtsDataError> {
        if decoded.address() != self.address {
            return Err(CtsDataError::BadParameters(format!(
                "Register 0x{:02X} cannot encode a value decoded from 0x{:02X}!",
                self.address,
                decoded.address()
            )));
        }
        let values: Vec<(&str, FieldValue)> =
            decoded.fields.iter().map(|(name, value)| (*name, *value)).collect();
        self.encode_fields(&values, decoded.raw)
    }

    /// Writes the given fields over `base_word`; bits of fields not listed keep their base value.
    pub fn encode_fields(
        &self,
        values: &[(&str, FieldValue)],
        base_word: u32,
    ) -> Result<u32, CtsDataError> {
        let mut word = base_word;
        for (name, value) in values {
            let field = self.field(name).ok_or_else(|| {
                CtsDataError::BadParameters(format!(
                    "Register {} (0x{:02X}) has no field named '{}'!",
                    self.name, self.address, name
                ))
            })?;
            word = field.encode(word, *value)?;
        }
        Ok(word)
    }
}

/// Named field values of one register word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRegister {
    #[serde(skip)]
    schema: &'static RegisterSchema,
    address: u8,
    name: &'static str,
    raw: u32,
    fields: Vec<(&'static str, FieldValue)>,
}

impl DecodedRegister {
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &'static RegisterSchema {
        self.schema
    }

    /// The word as it was read
    pub fn raw(&self) -> u32 {
        self.raw
    }

    pub fn fields(&self) -> &[(&'static str, FieldValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| *value)
    }

    /// Named fields that are not reserved
    pub fn named_fields(&self) -> impl Iterator<Item = &(&'static str, FieldValue)> {
        self.fields.iter().filter(|(_, value)| !matches!(value, FieldValue::Reserved(_)))
    }

    /// Returns a copy with one field replaced; every other bit keeps its read value.
    pub fn with_field(&self, name: &str, value: FieldValue) -> Result<DecodedRegister, CtsDataError> {
        let word = self.schema.encode_fields(&[(name, value)], self.raw)?;
        Ok(self.schema.decode(word))
    }
}
