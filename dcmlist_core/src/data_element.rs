//! A single decoded data element along with the logic for previewing its value
//! as text.

use byteorder::ByteOrder;

use crate::{DataElementTag, ValueRepresentation};

/// Values longer than this number of bytes aren't previewed when printed.
///
pub const MAX_PREVIEW_LENGTH: u32 = 1024;

/// A leaf data element read out of DICOM P10 data. Its value holds exactly
/// `length` raw bytes in the order they were stored.
///
/// The VR is only present when the data element was read from explicit VR
/// data.
///
#[derive(Clone, Debug, PartialEq)]
pub struct DataElement {
  pub tag: DataElementTag,
  pub vr: Option<ValueRepresentation>,
  pub length: u32,
  pub value: Vec<u8>,
}

impl DataElement {
  /// Creates a new data element. The length is taken from the value.
  ///
  pub fn new(
    tag: DataElementTag,
    vr: Option<ValueRepresentation>,
    value: Vec<u8>,
  ) -> Self {
    Self {
      tag,
      vr,
      length: value.len() as u32,
      value,
    }
  }

  /// Returns a human-readable preview of this data element's value.
  ///
  /// String VRs are shown as text. When there is no VR, or the VR isn't a
  /// string VR, the display form is guessed from the value's length: 1, 2, 4,
  /// and 8 bytes are shown as little endian unsigned integers, and any other
  /// length as text. The guess is wrong for e.g. a four-character string read
  /// from implicit VR data, and there is no way to do better without a data
  /// dictionary.
  ///
  pub fn value_to_string(&self) -> String {
    if self.length > MAX_PREVIEW_LENGTH {
      return "<Value is too long to display>".to_string();
    }

    match self.vr {
      Some(vr) if vr.is_string() => bytes_to_text(&self.value),
      _ => guess_value_from_length(&self.value),
    }
  }
}

impl std::fmt::Display for DataElement {
  /// Formats a data element as `"(GROUP,ELEMENT) VR(LENGTH) VALUE"`, e.g.
  /// `"(0008,0020) DA(8) 20230101"`.
  ///
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let vr = self.vr.map(|vr| vr.to_string()).unwrap_or_default();

    write!(
      f,
      "{} {}({}) {}",
      self.tag,
      vr,
      self.length,
      self.value_to_string()
    )
  }
}

fn guess_value_from_length(bytes: &[u8]) -> String {
  match bytes.len() {
    1 => bytes[0].to_string(),
    2 => byteorder::LittleEndian::read_u16(bytes).to_string(),
    4 => byteorder::LittleEndian::read_u32(bytes).to_string(),
    8 => byteorder::LittleEndian::read_u64(bytes).to_string(),
    _ => bytes_to_text(bytes),
  }
}

/// Converts raw bytes to text, dropping trailing NUL padding. Invalid UTF-8 is
/// replaced rather than rejected as no character set is applied.
///
fn bytes_to_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes)
    .trim_end_matches('\0')
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn element(vr: Option<ValueRepresentation>, value: &[u8]) -> DataElement {
    DataElement::new(DataElementTag::new(0x0008, 0x0020), vr, value.to_vec())
  }

  #[test]
  fn new_test() {
    let e = element(None, &[1, 2, 3]);
    assert_eq!(e.length, 3);
    assert_eq!(e.value.len() as u32, e.length);
  }

  #[test]
  fn value_to_string_length_heuristic_test() {
    assert_eq!(element(None, &[0xFF]).value_to_string(), "255");

    assert_eq!(element(None, &[0x01, 0x02]).value_to_string(), "513");

    assert_eq!(
      element(None, &[0x01, 0x00, 0x00, 0x80]).value_to_string(),
      "2147483649"
    );

    assert_eq!(
      element(None, &[0, 0, 0, 0, 0, 0, 0, 0x01]).value_to_string(),
      "72057594037927936"
    );

    assert_eq!(element(None, b"ABC").value_to_string(), "ABC");

    assert_eq!(element(None, b"").value_to_string(), "");
  }

  #[test]
  fn value_to_string_two_bytes_test() {
    for vr in [
      None,
      Some(ValueRepresentation::UnsignedShort),
      Some(ValueRepresentation::OtherByteString),
      Some(ValueRepresentation::Unknown),
      Some(ValueRepresentation::Unrecognized(*b"XX")),
    ] {
      assert_eq!(element(vr, &[0x00, 0x01]).value_to_string(), "256");
    }
  }

  #[test]
  fn value_to_string_string_vr_test() {
    assert_eq!(
      element(Some(ValueRepresentation::Date), b"20230101").value_to_string(),
      "20230101"
    );

    assert_eq!(
      element(Some(ValueRepresentation::CodeString), b"M ").value_to_string(),
      "M "
    );

    assert_eq!(
      element(
        Some(ValueRepresentation::UniqueIdentifier),
        b"1.2.840.10008.1.2\0"
      )
      .value_to_string(),
      "1.2.840.10008.1.2"
    );
  }

  #[test]
  fn value_to_string_too_long_test() {
    let e = element(Some(ValueRepresentation::LongText), &[b'a'; 1025]);
    assert_eq!(e.value_to_string(), "<Value is too long to display>");

    let e = element(None, &[b'a'; 1024]);
    assert_eq!(e.value_to_string(), "a".repeat(1024));
  }

  #[test]
  fn to_string_test() {
    assert_eq!(
      element(Some(ValueRepresentation::Date), b"20230101").to_string(),
      "(0008,0020) DA(8) 20230101"
    );

    assert_eq!(
      element(None, &[0x10, 0x00]).to_string(),
      "(0008,0020) (2) 16"
    );
  }
}
