//! DICOM value representations (VRs).
//!
//! See [section 6.2](https://dicom.nema.org/medical/dicom/current/output/chtml/part05/sect_6.2.html)
//! of the DICOM specification for VR definitions.

/// All DICOM value representations (VRs), plus a fallback that carries any
/// other two-byte code read from explicit VR data.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueRepresentation {
  AgeString,
  ApplicationEntity,
  AttributeTag,
  CodeString,
  Date,
  DateTime,
  DecimalString,
  FloatingPointDouble,
  FloatingPointSingle,
  IntegerString,
  LongString,
  LongText,
  OtherByteString,
  OtherDoubleString,
  OtherFloatString,
  OtherLongString,
  OtherVeryLongString,
  OtherWordString,
  PersonName,
  Sequence,
  ShortString,
  ShortText,
  SignedLong,
  SignedShort,
  SignedVeryLong,
  Time,
  UniqueIdentifier,
  UniversalResourceIdentifier,
  Unknown,
  UnlimitedCharacters,
  UnlimitedText,
  UnsignedLong,
  UnsignedShort,
  UnsignedVeryLong,

  /// A code that isn't one of the VRs defined by DICOM. Such codes are kept as
  /// read so they can still be printed.
  Unrecognized([u8; 2]),
}

impl std::fmt::Display for ValueRepresentation {
  /// Formats a VR as its two-character code. Bytes of unrecognized codes that
  /// aren't printable ASCII are shown as `?`.
  ///
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let s: String = self
      .to_bytes()
      .iter()
      .map(|b| {
        if b.is_ascii_graphic() || *b == b' ' {
          *b as char
        } else {
          '?'
        }
      })
      .collect();

    f.write_str(&s)
  }
}

impl ValueRepresentation {
  /// Converts a two-character code, e.g. "DA", into a value representation.
  /// Codes not defined by DICOM become [`ValueRepresentation::Unrecognized`].
  ///
  pub fn from_bytes(bytes: [u8; 2]) -> Self {
    match &bytes {
      b"AE" => ValueRepresentation::ApplicationEntity,
      b"AS" => ValueRepresentation::AgeString,
      b"AT" => ValueRepresentation::AttributeTag,
      b"CS" => ValueRepresentation::CodeString,
      b"DA" => ValueRepresentation::Date,
      b"DS" => ValueRepresentation::DecimalString,
      b"DT" => ValueRepresentation::DateTime,
      b"FD" => ValueRepresentation::FloatingPointDouble,
      b"FL" => ValueRepresentation::FloatingPointSingle,
      b"IS" => ValueRepresentation::IntegerString,
      b"LO" => ValueRepresentation::LongString,
      b"LT" => ValueRepresentation::LongText,
      b"OB" => ValueRepresentation::OtherByteString,
      b"OD" => ValueRepresentation::OtherDoubleString,
      b"OF" => ValueRepresentation::OtherFloatString,
      b"OL" => ValueRepresentation::OtherLongString,
      b"OV" => ValueRepresentation::OtherVeryLongString,
      b"OW" => ValueRepresentation::OtherWordString,
      b"PN" => ValueRepresentation::PersonName,
      b"SH" => ValueRepresentation::ShortString,
      b"SL" => ValueRepresentation::SignedLong,
      b"SQ" => ValueRepresentation::Sequence,
      b"SS" => ValueRepresentation::SignedShort,
      b"ST" => ValueRepresentation::ShortText,
      b"SV" => ValueRepresentation::SignedVeryLong,
      b"TM" => ValueRepresentation::Time,
      b"UC" => ValueRepresentation::UnlimitedCharacters,
      b"UI" => ValueRepresentation::UniqueIdentifier,
      b"UL" => ValueRepresentation::UnsignedLong,
      b"UN" => ValueRepresentation::Unknown,
      b"UR" => ValueRepresentation::UniversalResourceIdentifier,
      b"US" => ValueRepresentation::UnsignedShort,
      b"UT" => ValueRepresentation::UnlimitedText,
      b"UV" => ValueRepresentation::UnsignedVeryLong,

      _ => ValueRepresentation::Unrecognized(bytes),
    }
  }

  /// Converts a value representation to its two-byte character representation.
  ///
  pub fn to_bytes(&self) -> [u8; 2] {
    *match self {
      ValueRepresentation::AgeString => b"AS",
      ValueRepresentation::ApplicationEntity => b"AE",
      ValueRepresentation::AttributeTag => b"AT",
      ValueRepresentation::CodeString => b"CS",
      ValueRepresentation::Date => b"DA",
      ValueRepresentation::DateTime => b"DT",
      ValueRepresentation::DecimalString => b"DS",
      ValueRepresentation::FloatingPointDouble => b"FD",
      ValueRepresentation::FloatingPointSingle => b"FL",
      ValueRepresentation::IntegerString => b"IS",
      ValueRepresentation::LongString => b"LO",
      ValueRepresentation::LongText => b"LT",
      ValueRepresentation::OtherByteString => b"OB",
      ValueRepresentation::OtherDoubleString => b"OD",
      ValueRepresentation::OtherFloatString => b"OF",
      ValueRepresentation::OtherLongString => b"OL",
      ValueRepresentation::OtherVeryLongString => b"OV",
      ValueRepresentation::OtherWordString => b"OW",
      ValueRepresentation::PersonName => b"PN",
      ValueRepresentation::Sequence => b"SQ",
      ValueRepresentation::ShortString => b"SH",
      ValueRepresentation::ShortText => b"ST",
      ValueRepresentation::SignedLong => b"SL",
      ValueRepresentation::SignedShort => b"SS",
      ValueRepresentation::SignedVeryLong => b"SV",
      ValueRepresentation::Time => b"TM",
      ValueRepresentation::UniqueIdentifier => b"UI",
      ValueRepresentation::UniversalResourceIdentifier => b"UR",
      ValueRepresentation::Unknown => b"UN",
      ValueRepresentation::UnlimitedCharacters => b"UC",
      ValueRepresentation::UnlimitedText => b"UT",
      ValueRepresentation::UnsignedLong => b"UL",
      ValueRepresentation::UnsignedShort => b"US",
      ValueRepresentation::UnsignedVeryLong => b"UV",
      ValueRepresentation::Unrecognized(bytes) => bytes,
    }
  }

  /// Returns whether a value representation stores string data.
  ///
  pub fn is_string(self) -> bool {
    self == ValueRepresentation::AgeString
      || self == ValueRepresentation::ApplicationEntity
      || self == ValueRepresentation::CodeString
      || self == ValueRepresentation::Date
      || self == ValueRepresentation::DateTime
      || self == ValueRepresentation::DecimalString
      || self == ValueRepresentation::IntegerString
      || self == ValueRepresentation::LongString
      || self == ValueRepresentation::LongText
      || self == ValueRepresentation::PersonName
      || self == ValueRepresentation::ShortString
      || self == ValueRepresentation::ShortText
      || self == ValueRepresentation::Time
      || self == ValueRepresentation::UniqueIdentifier
      || self == ValueRepresentation::UniversalResourceIdentifier
      || self == ValueRepresentation::UnlimitedCharacters
      || self == ValueRepresentation::UnlimitedText
  }
}
