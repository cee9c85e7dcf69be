//! Tracks where in the hierarchy of sequences and items a DICOM P10 read is up
//! to.
//!
//! The nesting is a stack of entries, one for each open sequence and one for
//! each open item, with the most recently opened one at the end. Its size is
//! the current depth of the read, and is used as the indent level when the
//! read's parts are printed.
//!
//! Sequences and items with a defined length don't have delimitation items in
//! the data, so the nesting is also responsible for detecting when they end.
//! This is done in two ways:
//!
//! 1. A sequence counts down the lengths of the items it contains. When the
//!    count reaches exactly zero the sequence has ended.
//!
//! 2. Sequences and items record the offset at which their data ends. Items
//!    end once this offset is reached. Sequences end once this offset is
//!    reached and the next data element isn't another item, which allows for
//!    data where the sequence length also counts the 8-byte item headers.

use dcmlist_core::{dictionary, DataElementTag, ValueLength};

use crate::P10Part;

/// The stack of sequences and items that are open at the current point in a
/// DICOM P10 read.
///
#[derive(Debug, Default)]
pub struct Nesting {
  entries: Vec<NestingEntry>,
}

#[derive(Debug, PartialEq)]
enum NestingEntry {
  Sequence {
    item_bytes_remaining: Option<u32>,
    ends_at: Option<u64>,
  },
  Item {
    ends_at: Option<u64>,
  },
}

impl Nesting {
  /// Creates a new empty nesting.
  ///
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of open sequences and items.
  ///
  pub fn depth(&self) -> usize {
    self.entries.len()
  }

  /// Returns whether there are no open sequences or items.
  ///
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns the number of open sequences.
  ///
  pub fn sequence_depth(&self) -> usize {
    self
      .entries
      .iter()
      .filter(|entry| matches!(entry, NestingEntry::Sequence { .. }))
      .count()
  }

  /// Returns the next delimiter part for a sequence or item that has ended by
  /// reaching its defined length. Only one entry is ended per call, so this
  /// should be called repeatedly until it returns `None`.
  ///
  /// `next_tag` is the tag of the data element that follows the current
  /// position, or `None` at the end of the data.
  ///
  pub fn next_delimiter_part(
    &mut self,
    bytes_read: u64,
    next_tag: Option<DataElementTag>,
  ) -> Option<P10Part> {
    // An item that has reached its end also ends everything nested inside it
    let item_has_ended = self.entries.iter().any(|entry| {
      matches!(
        entry,
        NestingEntry::Item { ends_at: Some(ends_at) } if *ends_at <= bytes_read
      )
    });

    let next_tag_is_item = next_tag == Some(dictionary::ITEM.tag);

    let is_ended = item_has_ended
      || match self.entries.last() {
        Some(NestingEntry::Sequence {
          item_bytes_remaining: Some(0),
          ..
        }) => true,

        Some(NestingEntry::Sequence {
          ends_at: Some(ends_at),
          ..
        }) => *ends_at <= bytes_read && !next_tag_is_item,

        _ => false,
      };

    if !is_ended {
      return None;
    }

    match self.entries.pop()? {
      NestingEntry::Sequence { .. } => {
        Some(P10Part::SequenceDelimiter { encoded: false })
      }
      NestingEntry::Item { .. } => {
        Some(P10Part::SequenceItemDelimiter { encoded: false })
      }
    }
  }

  /// Adds a new sequence whose header ended at the given offset.
  ///
  pub fn add_sequence(
    &mut self,
    tag: DataElementTag,
    length: ValueLength,
    bytes_read: u64,
  ) -> Result<(), String> {
    if let Some(NestingEntry::Sequence { .. }) = self.entries.last() {
      return Err(format!(
        "Sequence data element '{}' encountered outside of the root data set \
          or an item",
        tag
      ));
    }

    let (item_bytes_remaining, ends_at) = match length {
      ValueLength::Defined { length } => {
        (Some(length), Some(bytes_read + length as u64))
      }
      ValueLength::Undefined => (None, None),
    };

    self.entries.push(NestingEntry::Sequence {
      item_bytes_remaining,
      ends_at,
    });

    Ok(())
  }

  /// Ends the current sequence because its sequence delimitation item was
  /// read.
  ///
  pub fn end_sequence(&mut self) -> Result<(), String> {
    match self.entries.last() {
      Some(NestingEntry::Sequence { .. }) => {
        self.entries.pop();
        Ok(())
      }

      _ => {
        Err("Sequence delimiter encountered outside of a sequence".to_string())
      }
    }
  }

  /// Adds a new item whose header ended at the given offset. The item's length
  /// is counted against the length of the sequence that contains it.
  ///
  pub fn add_item(
    &mut self,
    length: ValueLength,
    bytes_read: u64,
  ) -> Result<(), String> {
    match self.entries.last_mut() {
      Some(NestingEntry::Sequence {
        item_bytes_remaining,
        ..
      }) => {
        if let (Some(remaining), ValueLength::Defined { length }) =
          (item_bytes_remaining.as_mut(), length)
        {
          if length > *remaining {
            return Err(format!(
              "Item length of {} bytes exceeds the {} bytes remaining in its \
                sequence",
              length, remaining
            ));
          }

          *remaining -= length;
        }

        let ends_at = match length {
          ValueLength::Defined { length } => Some(bytes_read + length as u64),
          ValueLength::Undefined => None,
        };

        self.entries.push(NestingEntry::Item { ends_at });

        Ok(())
      }

      _ => Err(format!(
        "Item encountered outside of a sequence, length: {} bytes",
        length
      )),
    }
  }

  /// Ends the current item because its item delimitation item was read.
  ///
  pub fn end_item(&mut self) -> Result<(), String> {
    match self.entries.last() {
      Some(NestingEntry::Item { .. }) => {
        self.entries.pop();
        Ok(())
      }

      _ => Err("Item delimiter encountered outside of an item".to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SEQUENCE_TAG: DataElementTag = DataElementTag::new(0x0008, 0x1115);
  const OTHER_TAG: DataElementTag = DataElementTag::new(0x0010, 0x0010);

  fn drain_delimiter_parts(
    nesting: &mut Nesting,
    bytes_read: u64,
    next_tag: Option<DataElementTag>,
  ) -> Vec<P10Part> {
    std::iter::from_fn(|| nesting.next_delimiter_part(bytes_read, next_tag))
      .collect()
  }

  #[test]
  fn item_lengths_count_down_sequence_length_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::new(12), 100)
      .unwrap();
    assert_eq!(nesting.depth(), 1);

    nesting.add_item(ValueLength::new(12), 108).unwrap();
    assert_eq!(nesting.depth(), 2);
    assert_eq!(
      nesting.entries[0],
      NestingEntry::Sequence {
        item_bytes_remaining: Some(0),
        ends_at: Some(112),
      }
    );

    // Nothing ends while the item's data is being read
    assert_eq!(nesting.next_delimiter_part(112, Some(OTHER_TAG)), None);

    assert_eq!(
      drain_delimiter_parts(&mut nesting, 120, Some(OTHER_TAG)),
      vec![
        P10Part::SequenceItemDelimiter { encoded: false },
        P10Part::SequenceDelimiter { encoded: false },
      ]
    );
    assert!(nesting.is_empty());
  }

  #[test]
  fn item_longer_than_sequence_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::new(10), 0)
      .unwrap();
    nesting.add_item(ValueLength::new(4), 8).unwrap();
    nesting.end_item().unwrap();

    assert!(nesting.add_item(ValueLength::new(8), 20).is_err());
  }

  #[test]
  fn sequence_length_including_item_headers_test() {
    let mut nesting = Nesting::new();

    // A sequence of 20 bytes holding one item header and 12 bytes of item data
    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::new(20), 0)
      .unwrap();
    nesting.add_item(ValueLength::new(12), 8).unwrap();

    assert_eq!(
      drain_delimiter_parts(&mut nesting, 20, Some(OTHER_TAG)),
      vec![
        P10Part::SequenceItemDelimiter { encoded: false },
        P10Part::SequenceDelimiter { encoded: false },
      ]
    );
  }

  #[test]
  fn sequence_stays_open_for_following_item_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::new(16), 0)
      .unwrap();
    nesting.add_item(ValueLength::new(4), 8).unwrap();
    nesting
      .add_sequence(OTHER_TAG, ValueLength::Undefined, 8)
      .unwrap();

    assert_eq!(
      nesting.next_delimiter_part(16, Some(dictionary::ITEM.tag)),
      Some(P10Part::SequenceDelimiter { encoded: false })
    );
    assert_eq!(
      nesting.next_delimiter_part(16, Some(dictionary::ITEM.tag)),
      Some(P10Part::SequenceItemDelimiter { encoded: false })
    );

    // The sequence's end offset has been reached but another item follows
    assert_eq!(
      nesting.next_delimiter_part(16, Some(dictionary::ITEM.tag)),
      None
    );
    assert_eq!(nesting.depth(), 1);
  }

  #[test]
  fn empty_sequence_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::ZERO, 0)
      .unwrap();

    assert_eq!(
      nesting.next_delimiter_part(0, Some(dictionary::ITEM.tag)),
      Some(P10Part::SequenceDelimiter { encoded: false })
    );
    assert!(nesting.is_empty());
  }

  #[test]
  fn undefined_lengths_only_end_on_delimiters_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::Undefined, 0)
      .unwrap();
    nesting.add_item(ValueLength::Undefined, 8).unwrap();

    assert_eq!(nesting.next_delimiter_part(1000, None), None);

    nesting.end_item().unwrap();
    assert!(nesting.end_item().is_err());

    nesting.end_sequence().unwrap();
    assert!(nesting.end_sequence().is_err());
    assert!(nesting.is_empty());
  }

  #[test]
  fn nested_sequences_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::Undefined, 0)
      .unwrap();
    nesting.add_item(ValueLength::Undefined, 8).unwrap();
    nesting
      .add_sequence(OTHER_TAG, ValueLength::Undefined, 20)
      .unwrap();
    nesting.add_item(ValueLength::new(0), 28).unwrap();

    assert_eq!(nesting.depth(), 4);
    assert_eq!(nesting.sequence_depth(), 2);

    assert_eq!(
      nesting.next_delimiter_part(28, None),
      Some(P10Part::SequenceItemDelimiter { encoded: false })
    );
    assert_eq!(nesting.next_delimiter_part(28, None), None);
    assert_eq!(nesting.depth(), 3);
  }

  #[test]
  fn item_end_closes_nested_entries_test() {
    let mut nesting = Nesting::new();

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::Undefined, 0)
      .unwrap();
    nesting.add_item(ValueLength::new(30), 8).unwrap();
    nesting
      .add_sequence(OTHER_TAG, ValueLength::Undefined, 20)
      .unwrap();

    assert_eq!(
      drain_delimiter_parts(&mut nesting, 38, None),
      vec![
        P10Part::SequenceDelimiter { encoded: false },
        P10Part::SequenceItemDelimiter { encoded: false },
      ]
    );
    assert_eq!(nesting.depth(), 1);
  }

  #[test]
  fn invalid_placement_test() {
    let mut nesting = Nesting::new();

    assert!(nesting.add_item(ValueLength::new(4), 0).is_err());
    assert!(nesting.end_item().is_err());

    nesting
      .add_sequence(SEQUENCE_TAG, ValueLength::Undefined, 0)
      .unwrap();
    assert!(nesting
      .add_sequence(OTHER_TAG, ValueLength::Undefined, 8)
      .is_err());
  }
}
