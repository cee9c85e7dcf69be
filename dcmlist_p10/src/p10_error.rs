//! Defines the type used to describe errors that can occur when reading and
//! listing DICOM P10 data.

/// An error that occurred when reading DICOM P10 data.
///
#[derive(Clone, Debug, PartialEq)]
pub enum P10Error {
  /// This error occurs when there is an error with an underlying file or file
  /// stream, including when the listing can't be written to its output.
  FileError { when: String, details: String },

  /// This error occurs when a DICOM P10 read context is unable to read the next
  /// DICOM P10 part because the supplied data is invalid, e.g. the "DICM"
  /// prefix is missing, or a sequence isn't closed by the end of the data.
  DataInvalid {
    when: String,
    details: String,
    offset: u64,
  },

  /// This error occurs when a DICOM P10 read context reaches the end of its
  /// data while reading the next part. This means the provided data is
  /// malformed or truncated.
  DataEndedUnexpectedly { when: String, offset: u64 },

  /// This error occurs when one of the configured maximums for a DICOM P10 read
  /// context is exceeded during reading of the supplied data.
  MaximumExceeded { details: String, offset: u64 },
}

/// The broad category of a [`P10Error`].
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum P10ErrorKind {
  /// The data couldn't be read from, or the listing couldn't be written to,
  /// the underlying file or stream.
  Io,

  /// The data was read but isn't well-formed DICOM P10 data.
  Format,
}

impl std::fmt::Display for P10Error {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "DICOM P10 error: {}", self.name())
  }
}

impl P10Error {
  /// Returns the name of the error as a human-readable string.
  ///
  pub fn name(&self) -> String {
    match self {
      P10Error::FileError { .. } => "File I/O failure".to_string(),
      P10Error::DataInvalid { .. } => "Invalid data".to_string(),
      P10Error::DataEndedUnexpectedly { .. } => {
        "Unexpected end of data".to_string()
      }
      P10Error::MaximumExceeded { .. } => "Maximum exceeded".to_string(),
    }
  }

  /// Returns whether this error came from the underlying file or stream, or
  /// from the content of the data.
  ///
  pub fn kind(&self) -> P10ErrorKind {
    match self {
      P10Error::FileError { .. } => P10ErrorKind::Io,

      P10Error::DataInvalid { .. }
      | P10Error::DataEndedUnexpectedly { .. }
      | P10Error::MaximumExceeded { .. } => P10ErrorKind::Format,
    }
  }

  /// Returns the offset into the data at which the error occurred, if known.
  ///
  pub fn offset(&self) -> Option<u64> {
    match self {
      P10Error::DataInvalid { offset, .. }
      | P10Error::DataEndedUnexpectedly { offset, .. }
      | P10Error::MaximumExceeded { offset, .. } => Some(*offset),

      P10Error::FileError { .. } => None,
    }
  }
}

impl dcmlist_core::DcmlistError for P10Error {
  /// Returns lines of text that describe a DICOM P10 error in a human-readable
  /// format.
  ///
  fn to_lines(&self, task_description: &str) -> Vec<String> {
    let mut lines = vec![];

    lines.push(format!("DICOM P10 error {}", task_description));
    lines.push("".to_string());

    // Add the name of the error
    lines.push(format!("  Error: {}", self.name()));

    // Add the 'when' if it is present
    match self {
      P10Error::FileError { when, .. }
      | P10Error::DataInvalid { when, .. }
      | P10Error::DataEndedUnexpectedly { when, .. } => {
        lines.push(format!("  When: {}", when));
      }

      P10Error::MaximumExceeded { .. } => (),
    };

    // Add the details if present
    match self {
      P10Error::FileError { details, .. }
      | P10Error::DataInvalid { details, .. }
      | P10Error::MaximumExceeded { details, .. } => {
        lines.push(format!("  Details: {}", details));
      }

      P10Error::DataEndedUnexpectedly { .. } => (),
    };

    if let Some(offset) = self.offset() {
      lines.push(format!("  Offset: 0x{:X}", offset));
    }

    lines
  }
}
