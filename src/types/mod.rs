//! Core types for the sgjw trailer

mod field;
mod record;
mod text;
mod trailer;

pub use field::{
    ALTITUDE_SIZE, AMBIENT_TEMP_SIZE, APPENDIX_LENGTH_SIZE, Count, DATE_SIZE, DISTANCE_SIZE,
    EMISSIVITY_SIZE, FIELDS, FIXED_BLOCK_SIZE, FLOAT32_SIZE, FOV_SIZE, Field, FieldDescriptor,
    FieldKind, FieldValue, HEIGHT_SIZE, HUMIDITY_SIZE, LATITUDE_SIZE, LONGITUDE_SIZE,
    MANUFACTURER_SIZE, PRODUCT_SIZE, REFLECTIVE_TEMP_SIZE, SERIAL_NUMBER_SIZE, VERSION_SIZE,
    WIDTH_SIZE,
};
pub use record::{MetadataRecord, release};
pub use text::FixedText;
pub use trailer::{OFFSET_SIZE, SIGNATURE, SIGNATURE_SIZE, TRAILER_SIZE};
