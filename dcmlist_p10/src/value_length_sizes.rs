//! The lookup table that decides how wide the value length field of a data
//! element is in explicit VR data.

use dcmlist_core::ValueRepresentation;

/// The two possibilities for the size of the value length for a VR stored in
/// the DICOM P10 format.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueLengthSize {
  /// The value length is stored in the 2 bytes following the VR.
  U16,

  /// The VR is followed by 2 reserved bytes and then a 4-byte value length.
  U32,
}

/// The set of VRs whose value length is stored in 16 bits when reading explicit
/// VR data. All other VRs, including ones that aren't recognized, have 2
/// reserved bytes followed by a 32-bit value length.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ValueLengthSizes {
  u16_vrs: Vec<ValueRepresentation>,
}

impl ValueLengthSizes {
  /// Creates a table where the given VRs have 16-bit value lengths.
  ///
  pub fn new(u16_vrs: Vec<ValueRepresentation>) -> Self {
    Self { u16_vrs }
  }

  /// Returns the size of the value length for a VR.
  ///
  pub fn value_length_size(&self, vr: ValueRepresentation) -> ValueLengthSize {
    if self.u16_vrs.contains(&vr) {
      ValueLengthSize::U16
    } else {
      ValueLengthSize::U32
    }
  }

  /// Adds a VR to the set of VRs that have 16-bit value lengths.
  ///
  pub fn with_u16(mut self, vr: ValueRepresentation) -> Self {
    if !self.u16_vrs.contains(&vr) {
      self.u16_vrs.push(vr);
    }

    self
  }

  /// Removes a VR from the set of VRs that have 16-bit value lengths.
  ///
  pub fn with_u32(mut self, vr: ValueRepresentation) -> Self {
    self.u16_vrs.retain(|v| *v != vr);
    self
  }
}

impl Default for ValueLengthSizes {
  /// The VRs listed in DICOM PS3.5 7.1.2 as having a 16-bit value length.
  ///
  fn default() -> Self {
    Self::new(vec![
      ValueRepresentation::ApplicationEntity,
      ValueRepresentation::AgeString,
      ValueRepresentation::AttributeTag,
      ValueRepresentation::CodeString,
      ValueRepresentation::Date,
      ValueRepresentation::DecimalString,
      ValueRepresentation::DateTime,
      ValueRepresentation::FloatingPointSingle,
      ValueRepresentation::FloatingPointDouble,
      ValueRepresentation::IntegerString,
      ValueRepresentation::LongString,
      ValueRepresentation::LongText,
      ValueRepresentation::PersonName,
      ValueRepresentation::ShortString,
      ValueRepresentation::SignedLong,
      ValueRepresentation::SignedShort,
      ValueRepresentation::ShortText,
      ValueRepresentation::Time,
      ValueRepresentation::UniqueIdentifier,
      ValueRepresentation::UnsignedLong,
      ValueRepresentation::UnsignedShort,
    ])
  }
}
