//! A DICOM data element tag, defined as 16-bit `group` and `element` values.

/// A data element tag that is defined by `group` and `element` values, each of
/// which is a 16-bit unsigned integer.
///
/// Tags are only unique within the data set or sequence item they occur in,
/// not across a whole file.
///
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataElementTag {
  pub group: u16,
  pub element: u16,
}

impl std::fmt::Display for DataElementTag {
  /// Formats a data element tag as `"($group,$element)"` using lowercase
  /// hexadecimal, e.g.`"(0008,0020)"`.
  ///
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let hex_digits = self.to_hex_digits();

    write!(
      f,
      "({},{})",
      unsafe { std::str::from_utf8_unchecked(&hex_digits[0..4]) },
      unsafe { std::str::from_utf8_unchecked(&hex_digits[4..8]) }
    )
  }
}

impl DataElementTag {
  /// The all-zero tag that marks the end of a data set.
  ///
  pub const ZERO: DataElementTag = DataElementTag {
    group: 0,
    element: 0,
  };

  /// Creates a new data element tag with the given group and element values.
  ///
  pub const fn new(group: u16, element: u16) -> Self {
    Self { group, element }
  }

  /// Returns whether this tag is in the File Meta Information group, 0x0002.
  ///
  pub fn is_file_meta_information(&self) -> bool {
    self.group == 0x0002
  }

  /// Returns the eight lowercase hexadecimal digits for this data element
  /// tag's group and element values.
  ///
  pub fn to_hex_digits(&self) -> [u8; 8] {
    static HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

    [
      HEX_DIGITS[(self.group >> 12) as usize],
      HEX_DIGITS[(self.group >> 8) as usize & 0xF],
      HEX_DIGITS[(self.group >> 4) as usize & 0xF],
      HEX_DIGITS[(self.group) as usize & 0xF],
      HEX_DIGITS[(self.element >> 12) as usize],
      HEX_DIGITS[(self.element >> 8) as usize & 0xF],
      HEX_DIGITS[(self.element >> 4) as usize & 0xF],
      HEX_DIGITS[(self.element) as usize & 0xF],
    ]
  }
}
