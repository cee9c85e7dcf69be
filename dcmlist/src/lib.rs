//! dcmlist is a library and a CLI tool for listing the structure and content
//! of DICOM P10 files, the format used to store medical images and related
//! information.

/// Provides core DICOM concepts including data element tags, value
/// representations, transfer syntaxes, and the formatting of listing lines.
///
pub mod core {
  pub use dcmlist_core::*;
}

/// Reads the DICOM Part 10 (P10) binary format used to store and transmit
/// DICOM-based medical imaging information, and lists its content as text.
///
pub mod p10 {
  pub use dcmlist_p10::*;
}
