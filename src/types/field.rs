//! Field descriptors for the metadata block

use std::borrow::Cow;
use std::fmt;

pub const VERSION_SIZE: usize = 2;
pub const WIDTH_SIZE: usize = 2;
pub const HEIGHT_SIZE: usize = 2;
pub const DATE_SIZE: usize = 14;
pub const FLOAT32_SIZE: usize = 4;
pub const EMISSIVITY_SIZE: usize = 4;
pub const AMBIENT_TEMP_SIZE: usize = 4;
pub const FOV_SIZE: usize = 1;
pub const DISTANCE_SIZE: usize = 4;
pub const HUMIDITY_SIZE: usize = 1;
pub const REFLECTIVE_TEMP_SIZE: usize = 4;
pub const MANUFACTURER_SIZE: usize = 32;
pub const PRODUCT_SIZE: usize = 32;
pub const SERIAL_NUMBER_SIZE: usize = 32;
pub const LONGITUDE_SIZE: usize = 8;
pub const LATITUDE_SIZE: usize = 8;
pub const ALTITUDE_SIZE: usize = 4;
pub const APPENDIX_LENGTH_SIZE: usize = 4;

/// Slot of a [`MetadataRecord`](super::MetadataRecord), in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Version,
    Width,
    Height,
    Date,
    Matrix,
    Emissivity,
    AmbientTemp,
    Fov,
    Distance,
    Humidity,
    ReflectiveTemp,
    Manufacturer,
    Product,
    SerialNumber,
    Longitude,
    Latitude,
    Altitude,
    AppendixLength,
    Appendix,
}

impl Field {
    /// Human-readable label used in diagnostics and errors
    pub fn label(self) -> &'static str {
        match self {
            Field::Version => "Version",
            Field::Width => "Width",
            Field::Height => "Height",
            Field::Date => "Date",
            Field::Matrix => "Matrix",
            Field::Emissivity => "Emissivity",
            Field::AmbientTemp => "Ambient Temperature",
            Field::Fov => "FOV",
            Field::Distance => "Distance",
            Field::Humidity => "Humidity",
            Field::ReflectiveTemp => "Reflective Temperature",
            Field::Manufacturer => "Manufacturer",
            Field::Product => "Product",
            Field::SerialNumber => "Serial Number",
            Field::Longitude => "Longitude",
            Field::Latitude => "Latitude",
            Field::Altitude => "Altitude",
            Field::AppendixLength => "Appendix Length",
            Field::Appendix => "Appendix",
        }
    }
}

/// Wire representation of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    F32,
    F64,
    /// Fixed-width character run, copied verbatim
    Chars,
    /// Row-major f32 cells
    FloatMatrix,
    /// Opaque byte run
    Bytes,
}

/// How many elements a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    One,
    /// `width × height`, resolved once both are decoded
    Cells,
}

/// One entry of the layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    /// Bytes per element
    pub width: usize,
    pub count: Count,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn new(field: Field, width: usize, count: Count, kind: FieldKind) -> Self {
        Self {
            field,
            width,
            count,
            kind,
        }
    }

    /// Descriptor for the trailing appendix, sized by `appendix_length`
    pub const fn appendix(length: usize) -> Self {
        Self::new(Field::Appendix, length, Count::One, FieldKind::Bytes)
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    /// Bytes occupied on the wire for `cells` matrix elements
    ///
    /// Returns `None` on overflow.
    pub fn byte_len(&self, cells: usize) -> Option<usize> {
        match self.count {
            Count::One => Some(self.width),
            Count::Cells => self.width.checked_mul(cells),
        }
    }
}

/// Fixed layout of the metadata block, in on-disk order
pub const FIELDS: [FieldDescriptor; 18] = [
    FieldDescriptor::new(Field::Version, VERSION_SIZE, Count::One, FieldKind::U16),
    FieldDescriptor::new(Field::Width, WIDTH_SIZE, Count::One, FieldKind::U16),
    FieldDescriptor::new(Field::Height, HEIGHT_SIZE, Count::One, FieldKind::U16),
    FieldDescriptor::new(Field::Date, DATE_SIZE, Count::One, FieldKind::Chars),
    FieldDescriptor::new(Field::Matrix, FLOAT32_SIZE, Count::Cells, FieldKind::FloatMatrix),
    FieldDescriptor::new(Field::Emissivity, EMISSIVITY_SIZE, Count::One, FieldKind::F32),
    FieldDescriptor::new(Field::AmbientTemp, AMBIENT_TEMP_SIZE, Count::One, FieldKind::F32),
    FieldDescriptor::new(Field::Fov, FOV_SIZE, Count::One, FieldKind::U8),
    FieldDescriptor::new(Field::Distance, DISTANCE_SIZE, Count::One, FieldKind::U32),
    FieldDescriptor::new(Field::Humidity, HUMIDITY_SIZE, Count::One, FieldKind::U8),
    FieldDescriptor::new(Field::ReflectiveTemp, REFLECTIVE_TEMP_SIZE, Count::One, FieldKind::F32),
    FieldDescriptor::new(Field::Manufacturer, MANUFACTURER_SIZE, Count::One, FieldKind::Chars),
    FieldDescriptor::new(Field::Product, PRODUCT_SIZE, Count::One, FieldKind::Chars),
    FieldDescriptor::new(Field::SerialNumber, SERIAL_NUMBER_SIZE, Count::One, FieldKind::Chars),
    FieldDescriptor::new(Field::Longitude, LONGITUDE_SIZE, Count::One, FieldKind::F64),
    FieldDescriptor::new(Field::Latitude, LATITUDE_SIZE, Count::One, FieldKind::F64),
    FieldDescriptor::new(Field::Altitude, ALTITUDE_SIZE, Count::One, FieldKind::U32),
    FieldDescriptor::new(Field::AppendixLength, APPENDIX_LENGTH_SIZE, Count::One, FieldKind::U32),
];

/// Size of the block with an empty matrix and no appendix
pub const FIXED_BLOCK_SIZE: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < FIELDS.len() {
        if let Count::One = FIELDS[i].count {
            total += FIELDS[i].width;
        }
        i += 1;
    }
    total
};

/// Decoded or borrowed value of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    F32(f32),
    F64(f64),
    Chars(Cow<'a, [u8]>),
    FloatMatrix(Cow<'a, [f32]>),
    Bytes(Cow<'a, [u8]>),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::U8(_) => FieldKind::U8,
            FieldValue::U16(_) => FieldKind::U16,
            FieldValue::U32(_) => FieldKind::U32,
            FieldValue::F32(_) => FieldKind::F32,
            FieldValue::F64(_) => FieldKind::F64,
            FieldValue::Chars(_) => FieldKind::Chars,
            FieldValue::FloatMatrix(_) => FieldKind::FloatMatrix,
            FieldValue::Bytes(_) => FieldKind::Bytes,
        }
    }

    /// Wire bits rendered as hex, for diagnostics
    pub fn raw_hex(&self) -> String {
        match self {
            FieldValue::U8(v) => format!("{v:x}"),
            FieldValue::U16(v) => format!("{v:x}"),
            FieldValue::U32(v) => format!("{v:x}"),
            FieldValue::F32(v) => format!("{:x}", v.to_bits()),
            FieldValue::F64(v) => format!("{:x}", v.to_bits()),
            FieldValue::Chars(b) | FieldValue::Bytes(b) => {
                b.iter().take(32).map(|x| format!("{x:02x}")).collect()
            }
            FieldValue::FloatMatrix(m) => m
                .iter()
                .take(2)
                .map(|v| format!("{:08x}", v.to_bits()))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::U8(v) => write!(f, "{v}"),
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v:.2}"),
            FieldValue::F64(v) => write!(f, "{v:.2}"),
            FieldValue::Chars(b) => {
                let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
                f.write_str(&String::from_utf8_lossy(&b[..end]))
            }
            FieldValue::Bytes(b) => write!(f, "{} bytes", b.len()),
            FieldValue::FloatMatrix(m) => match m.as_ref() {
                [] => write!(f, "0 cells"),
                [first] => write!(f, "1 cell, first {first:.2}"),
                [first, second, ..] => {
                    write!(f, "{} cells, first {first:.2}, second {second:.2}", m.len())
                }
            },
        }
    }
}
