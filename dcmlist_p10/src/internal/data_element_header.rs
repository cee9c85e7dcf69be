use std::io::{Read, Seek};

use dcmlist_core::{DataElementTag, ValueLength, ValueRepresentation};

use crate::internal::byte_cursor::{ByteCursor, ByteCursorError};
use crate::value_length_sizes::{ValueLengthSize, ValueLengthSizes};

/// Describes the header for a single DICOM data element, specifically its tag,
/// VR, and length in bytes. The VR is optional because it isn't stored in
/// implicit VR data, and because items and delimiters never have one.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataElementHeader {
  pub tag: DataElementTag,
  pub vr: Option<ValueRepresentation>,
  pub length: ValueLength,
}

impl std::fmt::Display for DataElementHeader {
  /// Converts a data element header to a human-readable string in the format
  /// "(GROUP,ELEMENT) VR(LENGTH)", e.g. `"(0008,0020) DA(8)"`.
  ///
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self.vr {
      Some(vr) => write!(f, "{} {}({})", self.tag, vr, self.length),
      None => write!(f, "{} ({})", self.tag, self.length),
    }
  }
}

impl DataElementHeader {
  /// Reads the explicit VR and value length that follow a data element tag.
  /// The tag itself must already have been read.
  ///
  /// Depending on the VR this reads either 4 or 8 bytes: the two VR bytes,
  /// then either a 16-bit length, or two reserved bytes and a 32-bit length.
  ///
  pub fn read_explicit_vr_and_length<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    tag: DataElementTag,
    value_length_sizes: &ValueLengthSizes,
  ) -> Result<Self, ByteCursorError> {
    let vr_bytes = cursor.read_bytes(2)?;
    let vr = ValueRepresentation::from_bytes([vr_bytes[0], vr_bytes[1]]);

    let length = match value_length_sizes.value_length_size(vr) {
      ValueLengthSize::U16 => ValueLength::new(cursor.read_u16_le()? as u32),

      ValueLengthSize::U32 => {
        cursor.skip(2)?;
        ValueLength::new(cursor.read_u32_le()?)
      }
    };

    Ok(Self {
      tag,
      vr: Some(vr),
      length,
    })
  }

  /// Reads the 32-bit value length that follows a data element tag in implicit
  /// VR data, as well as for items and delimiters in all data. The tag itself
  /// must already have been read.
  ///
  pub fn read_implicit_vr_and_length<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    tag: DataElementTag,
  ) -> Result<Self, ByteCursorError> {
    let length = ValueLength::new(cursor.read_u32_le()?);

    Ok(Self {
      tag,
      vr: None,
      length,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  const TAG: DataElementTag = DataElementTag::new(0x0008, 0x0020);

  fn cursor(bytes: &[u8]) -> ByteCursor<Cursor<Vec<u8>>> {
    ByteCursor::new(Cursor::new(bytes.to_vec())).unwrap()
  }

  #[test]
  fn read_explicit_u16_length_test() {
    let mut c = cursor(b"DA\x08\x0020230101");

    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut c,
      TAG,
      &ValueLengthSizes::default(),
    )
    .unwrap();

    assert_eq!(
      header,
      DataElementHeader {
        tag: TAG,
        vr: Some(ValueRepresentation::Date),
        length: ValueLength::new(8),
      }
    );
    assert_eq!(c.position(), 4);
  }

  #[test]
  fn read_explicit_u32_length_test() {
    let mut c = cursor(b"OB\x00\x00\x02\x00\x00\x00\x00\x01");

    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut c,
      TAG,
      &ValueLengthSizes::default(),
    )
    .unwrap();

    assert_eq!(header.vr, Some(ValueRepresentation::OtherByteString));
    assert_eq!(header.length, ValueLength::new(2));
    assert_eq!(c.position(), 8);
  }

  #[test]
  fn read_explicit_unrecognized_vr_test() {
    let mut c = cursor(b"ZZ\xAA\xBB\x04\x00\x00\x00");

    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut c,
      TAG,
      &ValueLengthSizes::default(),
    )
    .unwrap();

    assert_eq!(header.vr, Some(ValueRepresentation::Unrecognized(*b"ZZ")));
    assert_eq!(header.length, ValueLength::new(4));
    assert_eq!(c.position(), 8);
  }

  #[test]
  fn read_explicit_sequence_undefined_length_test() {
    let mut c = cursor(b"SQ\x00\x00\xFF\xFF\xFF\xFF");

    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut c,
      TAG,
      &ValueLengthSizes::default(),
    )
    .unwrap();

    assert_eq!(header.vr, Some(ValueRepresentation::Sequence));
    assert_eq!(header.length, ValueLength::Undefined);
  }

  #[test]
  fn read_explicit_with_custom_sizes_test() {
    let mut c = cursor(b"ZZ\x06\x00");

    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut c,
      TAG,
      &ValueLengthSizes::default()
        .with_u16(ValueRepresentation::Unrecognized(*b"ZZ")),
    )
    .unwrap();

    assert_eq!(header.length, ValueLength::new(6));
    assert_eq!(c.position(), 4);
  }

  #[test]
  fn read_explicit_truncated_test() {
    let mut c = cursor(b"OB\x00\x00\x02");

    assert!(matches!(
      DataElementHeader::read_explicit_vr_and_length(
        &mut c,
        TAG,
        &ValueLengthSizes::default(),
      ),
      Err(ByteCursorError::DataEnd)
    ));
  }

  #[test]
  fn read_implicit_test() {
    let mut c = cursor(&[0x0C, 0x00, 0x00, 0x00]);

    let header =
      DataElementHeader::read_implicit_vr_and_length(&mut c, TAG).unwrap();

    assert_eq!(
      header,
      DataElementHeader {
        tag: TAG,
        vr: None,
        length: ValueLength::new(12),
      }
    );
    assert!(c.at_end());
  }

  #[test]
  fn to_string_test() {
    assert_eq!(
      DataElementHeader {
        tag: TAG,
        vr: Some(ValueRepresentation::Date),
        length: ValueLength::new(8),
      }
      .to_string(),
      "(0008,0020) DA(8)"
    );

    assert_eq!(
      DataElementHeader {
        tag: DataElementTag::new(0xFFFE, 0xE000),
        vr: None,
        length: ValueLength::Undefined,
      }
      .to_string(),
      "(fffe,e000) (undefined)"
    );
  }
}
