//! The handful of data elements that drive the structure of DICOM P10 data.
//!
//! This is not a data dictionary. Tags outside this list are never looked up
//! or validated.

use crate::DataElementTag;

/// A data element that has special meaning when reading DICOM P10 data.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
  pub tag: DataElementTag,
}

pub const TRANSFER_SYNTAX_UID: Item = Item {
  tag: DataElementTag::new(0x0002, 0x0010),
};

pub const ITEM: Item = Item {
  tag: DataElementTag::new(0xFFFE, 0xE000),
};

pub const ITEM_DELIMITATION_ITEM: Item = Item {
  tag: DataElementTag::new(0xFFFE, 0xE00D),
};

pub const SEQUENCE_DELIMITATION_ITEM: Item = Item {
  tag: DataElementTag::new(0xFFFE, 0xE0DD),
};

/// Returns whether a tag is one of the three item and delimitation tags. These
/// never have a VR, even in explicit VR transfer syntaxes.
///
pub fn is_item_or_delimiter(tag: DataElementTag) -> bool {
  tag == ITEM.tag
    || tag == ITEM_DELIMITATION_ITEM.tag
    || tag == SEQUENCE_DELIMITATION_ITEM.tag
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn is_item_or_delimiter_test() {
    assert!(is_item_or_delimiter(ITEM.tag));
    assert!(is_item_or_delimiter(ITEM_DELIMITATION_ITEM.tag));
    assert!(is_item_or_delimiter(SEQUENCE_DELIMITATION_ITEM.tag));

    assert!(!is_item_or_delimiter(TRANSFER_SYNTAX_UID.tag));
    assert!(!is_item_or_delimiter(DataElementTag::new(0xFFFE, 0xE001)));
  }
}
