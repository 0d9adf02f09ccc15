//! The metadata record

use super::field::{DATE_SIZE, MANUFACTURER_SIZE, PRODUCT_SIZE, SERIAL_NUMBER_SIZE};
use super::{Field, FieldValue, FixedText};
use std::borrow::Cow;

/// Thermal acquisition parameters carried in the trailer
///
/// Every slot is empty until populated, either field by field while decoding
/// or by the caller before encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    /// Raw hex-coded version, e.g. `0x0102`
    pub version: Option<u16>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    /// `YYYYMMDDHHMMSS`, not validated
    pub date: Option<FixedText<DATE_SIZE>>,
    /// Row-major temperatures in Celsius, `width × height` cells
    pub matrix: Option<Vec<f32>>,
    pub emissivity: Option<f32>,
    pub ambient_temp: Option<f32>,
    pub fov: Option<u8>,
    pub distance: Option<u32>,
    pub humidity: Option<u8>,
    pub reflective_temp: Option<f32>,
    pub manufacturer: Option<FixedText<MANUFACTURER_SIZE>>,
    pub product: Option<FixedText<PRODUCT_SIZE>>,
    pub serial_number: Option<FixedText<SERIAL_NUMBER_SIZE>>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub altitude: Option<u32>,
    /// Byte length of `appendix`, 0 when absent
    pub appendix_length: Option<u32>,
    pub appendix: Option<Vec<u8>>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no slot is populated
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of matrix cells implied by `width × height`
    pub fn cell_count(&self) -> Option<usize> {
        Some(usize::from(self.width?) * usize::from(self.height?))
    }

    /// Temperature at `(row, col)`
    pub fn matrix_at(&self, row: usize, col: usize) -> Option<f32> {
        let width = usize::from(self.width?);
        let height = usize::from(self.height?);
        if row >= height || col >= width {
            return None;
        }
        self.matrix.as_ref()?.get(row * width + col).copied()
    }

    /// Set the appendix and keep `appendix_length` in step with it
    ///
    /// Returns the rejected bytes if they do not fit in a u32 length.
    pub fn set_appendix(&mut self, bytes: Vec<u8>) -> Result<(), Vec<u8>> {
        let Ok(len) = u32::try_from(bytes.len()) else {
            return Err(bytes);
        };
        self.appendix_length = Some(len);
        self.appendix = if len == 0 { None } else { Some(bytes) };
        Ok(())
    }

    /// Appendix as text, up to the first NUL
    pub fn appendix_text(&self) -> Option<Cow<'_, str>> {
        let bytes = self.appendix.as_deref()?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Some(String::from_utf8_lossy(&bytes[..end]))
    }

    /// Borrow the value held in `field`
    pub fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        let value = match field {
            Field::Version => FieldValue::U16(self.version?),
            Field::Width => FieldValue::U16(self.width?),
            Field::Height => FieldValue::U16(self.height?),
            Field::Date => FieldValue::Chars(Cow::Borrowed(self.date.as_ref()?.as_bytes())),
            Field::Matrix => FieldValue::FloatMatrix(Cow::Borrowed(self.matrix.as_deref()?)),
            Field::Emissivity => FieldValue::F32(self.emissivity?),
            Field::AmbientTemp => FieldValue::F32(self.ambient_temp?),
            Field::Fov => FieldValue::U8(self.fov?),
            Field::Distance => FieldValue::U32(self.distance?),
            Field::Humidity => FieldValue::U8(self.humidity?),
            Field::ReflectiveTemp => FieldValue::F32(self.reflective_temp?),
            Field::Manufacturer => {
                FieldValue::Chars(Cow::Borrowed(self.manufacturer.as_ref()?.as_bytes()))
            }
            Field::Product => FieldValue::Chars(Cow::Borrowed(self.product.as_ref()?.as_bytes())),
            Field::SerialNumber => {
                FieldValue::Chars(Cow::Borrowed(self.serial_number.as_ref()?.as_bytes()))
            }
            Field::Longitude => FieldValue::F64(self.longitude?),
            Field::Latitude => FieldValue::F64(self.latitude?),
            Field::Altitude => FieldValue::U32(self.altitude?),
            Field::AppendixLength => FieldValue::U32(self.appendix_length?),
            Field::Appendix => FieldValue::Bytes(Cow::Borrowed(self.appendix.as_deref()?)),
        };
        Some(value)
    }

    /// Store `value` into `field`
    ///
    /// Returns the value unchanged if its kind or width does not fit the slot.
    pub fn store<'a>(&mut self, field: Field, value: FieldValue<'a>) -> Result<(), FieldValue<'a>> {
        match (field, value) {
            (Field::Version, FieldValue::U16(v)) => self.version = Some(v),
            (Field::Width, FieldValue::U16(v)) => self.width = Some(v),
            (Field::Height, FieldValue::U16(v)) => self.height = Some(v),
            (Field::Date, FieldValue::Chars(v)) => {
                self.date = Some(FixedText::from_bytes(&v).ok_or(FieldValue::Chars(v))?)
            }
            (Field::Matrix, FieldValue::FloatMatrix(v)) => self.matrix = Some(v.into_owned()),
            (Field::Emissivity, FieldValue::F32(v)) => self.emissivity = Some(v),
            (Field::AmbientTemp, FieldValue::F32(v)) => self.ambient_temp = Some(v),
            (Field::Fov, FieldValue::U8(v)) => self.fov = Some(v),
            (Field::Distance, FieldValue::U32(v)) => self.distance = Some(v),
            (Field::Humidity, FieldValue::U8(v)) => self.humidity = Some(v),
            (Field::ReflectiveTemp, FieldValue::F32(v)) => self.reflective_temp = Some(v),
            (Field::Manufacturer, FieldValue::Chars(v)) => {
                self.manufacturer = Some(FixedText::from_bytes(&v).ok_or(FieldValue::Chars(v))?)
            }
            (Field::Product, FieldValue::Chars(v)) => {
                self.product = Some(FixedText::from_bytes(&v).ok_or(FieldValue::Chars(v))?)
            }
            (Field::SerialNumber, FieldValue::Chars(v)) => {
                self.serial_number = Some(FixedText::from_bytes(&v).ok_or(FieldValue::Chars(v))?)
            }
            (Field::Longitude, FieldValue::F64(v)) => self.longitude = Some(v),
            (Field::Latitude, FieldValue::F64(v)) => self.latitude = Some(v),
            (Field::Altitude, FieldValue::U32(v)) => self.altitude = Some(v),
            (Field::AppendixLength, FieldValue::U32(v)) => self.appendix_length = Some(v),
            (Field::Appendix, FieldValue::Bytes(v)) => self.appendix = Some(v.into_owned()),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Drop every populated slot and reset to the empty state
    ///
    /// Safe to call on a partially populated or already released record.
    pub fn release(&mut self) {
        if self.is_empty() {
            return;
        }
        let populated = [
            self.version.is_some(),
            self.width.is_some(),
            self.height.is_some(),
            self.date.is_some(),
            self.matrix.is_some(),
            self.emissivity.is_some(),
            self.ambient_temp.is_some(),
            self.fov.is_some(),
            self.distance.is_some(),
            self.humidity.is_some(),
            self.reflective_temp.is_some(),
            self.manufacturer.is_some(),
            self.product.is_some(),
            self.serial_number.is_some(),
            self.longitude.is_some(),
            self.latitude.is_some(),
            self.altitude.is_some(),
            self.appendix_length.is_some(),
            self.appendix.is_some(),
        ];
        let freed = populated.iter().filter(|p| **p).count();
        *self = Self::default();
        tracing::trace!(slots = freed, "released metadata record");
    }
}

/// Release `record`, leaving it empty
pub fn release(record: &mut MetadataRecord) {
    record.release();
}
