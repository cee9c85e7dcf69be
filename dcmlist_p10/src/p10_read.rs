//! Converts a seekable source of binary DICOM P10 data into DICOM P10 parts.
//!
//! The read is done in two phases. First the File Preamble, "DICM" prefix, and
//! File Meta Information are read, with the File Meta Information always using
//! explicit VRs. The transfer syntax UID found in the File Meta Information
//! then decides whether the main data set that follows uses implicit or
//! explicit VRs, and the main data set is read through to its end.
//!
//! Parts are read out one at a time, either with [`P10ReadContext::read_parts`]
//! or by iterating the read context, so the whole of the data is never held in
//! memory. See the [`P10Part`] type for details on the different parts that
//! are emitted.
//!
//! Additional configuration for controlling the read is available via
//! [`P10ReadConfig`].

use std::collections::VecDeque;
use std::io::{Read, Seek};

use dcmlist_core::{
  dictionary, transfer_syntax, DataElement, DataElementTag, ValueLength,
  ValueRepresentation, VrSerialization,
};

use crate::internal::byte_cursor::{ByteCursor, ByteCursorError};
use crate::internal::data_element_header::DataElementHeader;
use crate::internal::nesting::Nesting;
use crate::value_length_sizes::ValueLengthSizes;
use crate::{P10Error, P10Part};

/// Configuration used when reading DICOM P10 data.
///
#[derive(Clone, Debug, PartialEq)]
pub struct P10ReadConfig {
  /// The VRs that have a 16-bit value length when reading explicit VR data.
  ///
  /// By default these are the VRs specified by the DICOM standard. Any VR not
  /// in this set, including one that isn't recognized, has two reserved bytes
  /// followed by a 32-bit value length.
  ///
  pub value_length_sizes: ValueLengthSizes,

  /// The maximum sequence depth that can be read by a read context. This can be
  /// used to reject malformed or malicious DICOM P10 data.
  ///
  /// By default the maximum sequence depth is set to ten thousand, i.e. no
  /// meaningful maximum is enforced.
  ///
  pub max_sequence_depth: u32,
}

impl Default for P10ReadConfig {
  fn default() -> Self {
    Self {
      value_length_sizes: ValueLengthSizes::default(),
      max_sequence_depth: 10_000,
    }
  }
}

/// A read context holds the current state of an in-progress DICOM P10 read of
/// a seekable source of bytes, e.g. an open file. DICOM P10 parts are read out
/// of it with [`Self::read_parts`], or by using it as an iterator.
///
/// Once the [`P10Part::End`] part has been returned, or an error has occurred,
/// the read context is done and no further parts will be read.
///
pub struct P10ReadContext<R> {
  config: P10ReadConfig,
  cursor: ByteCursor<R>,
  next_action: NextAction,
  transfer_syntax_uid: Option<String>,
  vr_serialization: VrSerialization,
  nesting: Nesting,
  pending_parts: VecDeque<P10Part>,
}

/// The next action specifies what will be attempted to be read next from a read
/// context by `read_parts`.
///
#[derive(Clone, Copy, Debug, PartialEq)]
enum NextAction {
  ReadFilePreambleAndDICMPrefix,
  ReadFileMetaInformation,
  ReadDataSet,
  Done,
}

impl<R: Read + Seek> P10ReadContext<R> {
  /// Creates a new read context that reads DICOM P10 data from the current
  /// position of the given reader through to its end.
  ///
  pub fn new(reader: R) -> Result<Self, P10Error> {
    let cursor = ByteCursor::new(reader)
      .map_err(|e| map_byte_cursor_error(e, "Opening DICOM P10 data", 0))?;

    Ok(Self {
      config: P10ReadConfig::default(),
      cursor,
      next_action: NextAction::ReadFilePreambleAndDICMPrefix,
      transfer_syntax_uid: None,
      vr_serialization: VrSerialization::VrExplicit,
      nesting: Nesting::new(),
      pending_parts: VecDeque::new(),
    })
  }

  /// Updates the config for a read context. This should be done prior to
  /// reading any DICOM P10 parts from the read context.
  ///
  pub fn set_config(&mut self, config: &P10ReadConfig) {
    self.config = config.clone();
  }

  /// Returns the transfer syntax UID read from the File Meta Information. This
  /// is `None` until the File Meta Information has been read, and also when it
  /// doesn't specify a transfer syntax.
  ///
  pub fn transfer_syntax_uid(&self) -> Option<&str> {
    self.transfer_syntax_uid.as_deref()
  }

  /// Returns the VR serialization used to read the main data set. This is only
  /// meaningful once the File Meta Information has been read.
  ///
  pub fn vr_serialization(&self) -> VrSerialization {
    self.vr_serialization
  }

  /// Returns the number of sequences and items that are currently open.
  ///
  pub fn depth(&self) -> usize {
    self.nesting.depth()
  }

  /// Returns whether the read has completed, either because the end of the
  /// data was reached or because an error occurred.
  ///
  pub fn is_done(&self) -> bool {
    self.next_action == NextAction::Done
  }

  /// Reads the next DICOM P10 parts from a read context. On success, zero or
  /// more parts are returned and the function can be called again to read
  /// further parts. Once the read is done an empty list of parts is returned.
  ///
  /// When an error is returned the read context is done, and no further parts
  /// will be read from it.
  ///
  pub fn read_parts(&mut self) -> Result<Vec<P10Part>, P10Error> {
    let result = match self.next_action {
      NextAction::ReadFilePreambleAndDICMPrefix => {
        self.read_file_preamble_and_dicm_prefix_part()
      }

      NextAction::ReadFileMetaInformation => {
        self.read_file_meta_information_part()
      }

      NextAction::ReadDataSet => self.read_data_set_part(),

      NextAction::Done => Ok(vec![]),
    };

    if result.is_err() {
      self.next_action = NextAction::Done;
    }

    result
  }

  /// Reads the 128-byte File Preamble and the 4-byte `DICM` prefix following
  /// it. If the `DICM` prefix isn't present then this isn't DICOM P10 data and
  /// an error is returned.
  ///
  fn read_file_preamble_and_dicm_prefix_part(
    &mut self,
  ) -> Result<Vec<P10Part>, P10Error> {
    let when = "Reading file header";

    let data = self.cursor.read_bytes(132).map_err(|e| match e {
      ByteCursorError::DataEnd => P10Error::DataInvalid {
        when: when.to_string(),
        details: "Data is too short to contain a File Preamble and \"DICM\" \
          prefix"
          .to_string(),
        offset: self.cursor.position(),
      },
      e => self.map_byte_cursor_error(e, when),
    })?;

    if &data[128..132] != b"DICM" {
      return Err(P10Error::DataInvalid {
        when: when.to_string(),
        details: "File Preamble is not followed by the \"DICM\" prefix"
          .to_string(),
        offset: self.cursor.position() - 4,
      });
    }

    let mut preamble = Box::new([0u8; 128]);
    preamble.copy_from_slice(&data[0..128]);

    self.next_action = NextAction::ReadFileMetaInformation;

    Ok(vec![P10Part::FilePreambleAndDICMPrefix { preamble }])
  }

  /// Reads the next data element in the File Meta Information. The File Meta
  /// Information ends at the first data element that isn't in group 0x0002,
  /// which is then left to be read as part of the main data set, or at the
  /// end of the data.
  ///
  fn read_file_meta_information_part(
    &mut self,
  ) -> Result<Vec<P10Part>, P10Error> {
    if self.cursor.at_end() {
      return Ok(vec![self.end_file_meta_information()]);
    }

    let offset = self.cursor.position();
    let tag = self.read_tag("Reading File Meta Information")?;

    if !tag.is_file_meta_information() {
      self.rewind_tag()?;
      return Ok(vec![self.end_file_meta_information()]);
    }

    // The File Meta Information always uses explicit VRs
    let header = DataElementHeader::read_explicit_vr_and_length(
      &mut self.cursor,
      tag,
      &self.config.value_length_sizes,
    )
    .map_err(|e| {
      self.map_byte_cursor_error(e, "Reading File Meta Information")
    })?;

    let length = match header {
      DataElementHeader {
        vr: Some(ValueRepresentation::Sequence),
        ..
      } => Err(P10Error::DataInvalid {
        when: "Reading File Meta Information".to_string(),
        details: format!(
          "Data element '{}' in File Meta Information is a sequence",
          tag
        ),
        offset,
      }),

      DataElementHeader {
        length: ValueLength::Defined { length },
        ..
      } => Ok(length),

      _ => Err(P10Error::DataInvalid {
        when: "Reading File Meta Information".to_string(),
        details: format!(
          "Data element '{}' in File Meta Information has an undefined length",
          tag
        ),
        offset,
      }),
    }?;

    let value = self.read_value_bytes(
      length,
      "Reading File Meta Information data element value",
    )?;

    // Only the first transfer syntax UID in the File Meta Information is used
    if tag == dictionary::TRANSFER_SYNTAX_UID.tag
      && self.transfer_syntax_uid.is_none()
    {
      self.transfer_syntax_uid =
        Some(transfer_syntax::uid_from_bytes(&value));
    }

    Ok(vec![P10Part::FileMetaInformationElement {
      element: DataElement::new(tag, header.vr, value),
    }])
  }

  /// Decides the VR serialization of the main data set based on the transfer
  /// syntax UID, and moves on to reading the main data set.
  ///
  fn end_file_meta_information(&mut self) -> P10Part {
    self.vr_serialization = transfer_syntax::vr_serialization_for_uid(
      self.transfer_syntax_uid.as_deref(),
    );

    self.next_action = NextAction::ReadDataSet;

    P10Part::FileMetaInformationEnd {
      transfer_syntax_uid: self.transfer_syntax_uid.clone(),
      vr_serialization: self.vr_serialization,
    }
  }

  fn read_data_set_part(&mut self) -> Result<Vec<P10Part>, P10Error> {
    let offset = self.cursor.position();

    let next_tag = if self.cursor.at_end() {
      None
    } else {
      Some(self.read_tag("Reading data element header")?)
    };

    // If a sequence or item with a defined length has ended then emit its
    // delimiter, and leave the tag to be read again
    if let Some(part) = self.nesting.next_delimiter_part(offset, next_tag) {
      if next_tag.is_some() {
        self.rewind_tag()?;
      }

      return Ok(vec![part]);
    }

    // The end of the data, or a zero tag, ends the main data set
    let tag = match next_tag {
      Some(tag) if tag != DataElementTag::ZERO => tag,
      _ => return self.end_data_set(offset),
    };

    let header = self.read_data_element_header(tag)?;

    match (header.tag, header.vr, header.length) {
      // If this is the start of a new sequence item then add it to the nesting
      (tag, None, length) if tag == dictionary::ITEM.tag => {
        self
          .nesting
          .add_item(length, self.cursor.position())
          .map_err(|details| P10Error::DataInvalid {
            when: "Reading sequence item".to_string(),
            details,
            offset,
          })?;

        Ok(vec![P10Part::SequenceItemStart { length }])
      }

      // If this is an item delimitation item then remove the current item from
      // the nesting
      (tag, None, _) if tag == dictionary::ITEM_DELIMITATION_ITEM.tag => {
        self
          .nesting
          .end_item()
          .map_err(|details| P10Error::DataInvalid {
            when: "Reading item delimitation item".to_string(),
            details,
            offset,
          })?;

        Ok(vec![P10Part::SequenceItemDelimiter { encoded: true }])
      }

      // If this is a sequence delimitation item then remove the current
      // sequence from the nesting. A sequence delimiter outside of a sequence
      // is skipped over as such data has been observed in the wild.
      (tag, None, _) if tag == dictionary::SEQUENCE_DELIMITATION_ITEM.tag => {
        match self.nesting.end_sequence() {
          Ok(()) => Ok(vec![P10Part::SequenceDelimiter { encoded: true }]),
          Err(_) => Ok(vec![]),
        }
      }

      // Sequences never have a value read for them, instead their items are
      // read as the data that follows. With implicit VRs a sequence is only
      // recognizable by its undefined length.
      (tag, Some(ValueRepresentation::Sequence), length)
      | (tag, None, length @ ValueLength::Undefined) => {
        if self.nesting.sequence_depth()
          >= self.config.max_sequence_depth as usize
        {
          return Err(P10Error::MaximumExceeded {
            details: "Maximum allowed sequence depth reached".to_string(),
            offset,
          });
        }

        self
          .nesting
          .add_sequence(tag, length, self.cursor.position())
          .map_err(|details| P10Error::DataInvalid {
            when: "Reading data element header".to_string(),
            details,
            offset,
          })?;

        Ok(vec![P10Part::SequenceStart {
          tag,
          vr: header.vr,
          length,
        }])
      }

      // For all other cases this is a data element that has its value read
      (tag, vr, ValueLength::Defined { length }) => {
        let value = self.read_value_bytes(
          length,
          &format!("Reading {} data element value bytes", length),
        )?;

        Ok(vec![P10Part::DataElement {
          element: DataElement::new(tag, vr, value),
        }])
      }

      (_, _, ValueLength::Undefined) => Err(P10Error::DataInvalid {
        when: "Reading data element header".to_string(),
        details: format!(
          "Data element '{}' has an undefined length but isn't a sequence",
          header
        ),
        offset,
      }),
    }
  }

  /// Ends the main data set. All sequences and items must have been closed by
  /// this point.
  ///
  fn end_data_set(&mut self, offset: u64) -> Result<Vec<P10Part>, P10Error> {
    if !self.nesting.is_empty() {
      return Err(P10Error::DataInvalid {
        when: "Reading end of data set".to_string(),
        details: format!(
          "Data ended with {} sequence(s) or item(s) still open",
          self.nesting.depth()
        ),
        offset,
      });
    }

    self.next_action = NextAction::Done;

    Ok(vec![P10Part::End])
  }

  /// Reads the group and element of the next data element.
  ///
  fn read_tag(&mut self, when: &str) -> Result<DataElementTag, P10Error> {
    let group = self
      .cursor
      .read_u16_le()
      .map_err(|e| self.map_byte_cursor_error(e, when))?;

    let element = self
      .cursor
      .read_u16_le()
      .map_err(|e| self.map_byte_cursor_error(e, when))?;

    Ok(DataElementTag::new(group, element))
  }

  /// Moves back over the tag that was just read so that it is read again by
  /// the next call to [`Self::read_tag`].
  ///
  fn rewind_tag(&mut self) -> Result<(), P10Error> {
    self
      .cursor
      .seek_relative(-4)
      .map_err(|e| self.map_byte_cursor_error(e, "Rewinding data element tag"))
  }

  /// Reads the VR and value length following a data element tag. Items and
  /// delimitation items never have a VR, so are always read as implicit VR.
  ///
  fn read_data_element_header(
    &mut self,
    tag: DataElementTag,
  ) -> Result<DataElementHeader, P10Error> {
    let vr_serialization = if dictionary::is_item_or_delimiter(tag) {
      VrSerialization::VrImplicit
    } else {
      self.vr_serialization
    };

    let header = match vr_serialization {
      VrSerialization::VrExplicit => {
        DataElementHeader::read_explicit_vr_and_length(
          &mut self.cursor,
          tag,
          &self.config.value_length_sizes,
        )
      }

      VrSerialization::VrImplicit => {
        DataElementHeader::read_implicit_vr_and_length(&mut self.cursor, tag)
      }
    };

    header.map_err(|e| {
      self.map_byte_cursor_error(e, "Reading data element header")
    })
  }

  fn read_value_bytes(
    &mut self,
    length: u32,
    when: &str,
  ) -> Result<Vec<u8>, P10Error> {
    self
      .cursor
      .read_bytes(length as usize)
      .map_err(|e| self.map_byte_cursor_error(e, when))
  }

  /// Takes an error from the byte cursor and maps it through to a P10 error.
  ///
  fn map_byte_cursor_error(
    &self,
    error: ByteCursorError,
    when: &str,
  ) -> P10Error {
    map_byte_cursor_error(error, when, self.cursor.position())
  }
}

impl<R: Read + Seek> Iterator for P10ReadContext<R> {
  type Item = Result<P10Part, P10Error>;

  /// Returns the next DICOM P10 part. Iteration stops after the
  /// [`P10Part::End`] part or the first error.
  ///
  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(part) = self.pending_parts.pop_front() {
        return Some(Ok(part));
      }

      if self.is_done() {
        return None;
      }

      match self.read_parts() {
        Ok(parts) => self.pending_parts.extend(parts),
        Err(e) => return Some(Err(e)),
      }
    }
  }
}

/// Takes an error from the byte cursor and maps it through to a P10 error.
///
fn map_byte_cursor_error(
  error: ByteCursorError,
  when: &str,
  offset: u64,
) -> P10Error {
  match error {
    ByteCursorError::DataEnd => P10Error::DataEndedUnexpectedly {
      when: when.to_string(),
      offset,
    },

    ByteCursorError::SeekOutOfBounds { delta } => P10Error::DataInvalid {
      when: when.to_string(),
      details: format!("Seek by {} bytes is out of bounds", delta),
      offset,
    },

    ByteCursorError::Io(e) => P10Error::FileError {
      when: when.to_string(),
      details: e.to_string(),
    },
  }
}
