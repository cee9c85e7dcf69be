//! Defines the various parts of a DICOM P10 that are read out of raw DICOM P10
//! data by the `p10_read` module.

use dcmlist_core::{
  DataElement, DataElementTag, ValueLength, ValueRepresentation,
  VrSerialization,
};

/// A DICOM P10 part is the smallest piece of structured DICOM P10 data, and a
/// stream of these parts is the result of progressively reading raw DICOM P10
/// bytes.
///
#[derive(Clone, Debug, PartialEq)]
pub enum P10Part {
  /// The 128-byte File Preamble and the "DICM" prefix, which are present at the
  /// start of DICOM P10 data. The content of the File Preamble's bytes are
  /// application-defined, and in many cases are unused and set to zero.
  FilePreambleAndDICMPrefix { preamble: Box<[u8; 128]> },

  /// A data element in the File Meta Information, i.e. in group 0x0002. These
  /// are always read with explicit VRs.
  FileMetaInformationElement { element: DataElement },

  /// The end of the File Meta Information. This specifies the transfer syntax
  /// UID that was read from it, if any, and the VR serialization that will be
  /// used to read the main data set as a result.
  FileMetaInformationEnd {
    transfer_syntax_uid: Option<String>,
    vr_serialization: VrSerialization,
  },

  /// A data element in the main data set that holds a value, i.e. one that
  /// isn't a sequence.
  DataElement { element: DataElement },

  /// The start of a new sequence. The VR is only present when reading explicit
  /// VR data.
  SequenceStart {
    tag: DataElementTag,
    vr: Option<ValueRepresentation>,
    length: ValueLength,
  },

  /// The end of the current sequence. `encoded` specifies whether this came
  /// from a sequence delimitation item in the data, or whether the sequence
  /// ended because its defined length was reached.
  SequenceDelimiter { encoded: bool },

  /// The start of a new item in the current sequence.
  SequenceItemStart { length: ValueLength },

  /// The end of the current sequence item. `encoded` specifies whether this
  /// came from an item delimitation item in the data, or whether the item
  /// ended because its defined length was reached.
  SequenceItemDelimiter { encoded: bool },

  /// The end of the DICOM P10 data has been reached with all data successfully
  /// parsed.
  End,
}

impl std::fmt::Display for P10Part {
  /// Converts a DICOM P10 part to a human-readable string.
  ///
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let s = match self {
      P10Part::FilePreambleAndDICMPrefix { .. } => {
        "FilePreambleAndDICMPrefix".to_string()
      }

      P10Part::FileMetaInformationElement { element } => {
        format!("FileMetaInformationElement: {}", element)
      }

      P10Part::FileMetaInformationEnd {
        transfer_syntax_uid,
        vr_serialization,
      } => format!(
        "FileMetaInformationEnd: transfer syntax: {}, {}",
        transfer_syntax_uid.as_deref().unwrap_or("none"),
        vr_serialization
      ),

      P10Part::DataElement { element } => format!("DataElement: {}", element),

      P10Part::SequenceStart { tag, vr, length } => format!(
        "SequenceStart: {}, vr: {}, length: {}",
        tag,
        vr.map(|vr| vr.to_string()).unwrap_or_else(|| "none".to_string()),
        length
      ),

      P10Part::SequenceDelimiter { encoded } => {
        format!("SequenceDelimiter: encoded: {}", encoded)
      }

      P10Part::SequenceItemStart { length } => {
        format!("SequenceItemStart: length: {}", length)
      }

      P10Part::SequenceItemDelimiter { encoded } => {
        format!("SequenceItemDelimiter: encoded: {}", encoded)
      }

      P10Part::End => "End".to_string(),
    };

    write!(f, "{}", s)
  }
}
