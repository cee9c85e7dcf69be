/// Describes a Value Length as stored in DICOM P10, which is either a defined
/// length containing a `u32` value, or an undefined length that is encoded as
/// `0xFFFFFFFF` in P10 data.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueLength {
  Defined { length: u32 },
  Undefined,
}

impl ValueLength {
  /// Constructs a new value length from the given `u32` value. `0xFFFFFFFF` is
  /// an undefined length, all other values are a defined length.
  ///
  pub fn new(length: u32) -> Self {
    match length {
      0xFFFFFFFF => Self::Undefined,
      _ => Self::Defined { length },
    }
  }

  pub const ZERO: ValueLength = ValueLength::Defined { length: 0 };
}

impl std::fmt::Display for ValueLength {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Defined { length } => write!(f, "{}", length),
      Self::Undefined => write!(f, "undefined"),
    }
  }
}
