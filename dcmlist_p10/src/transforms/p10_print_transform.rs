use dcmlist_core::{
  dictionary, print, DataElement, DataElementTag, PrintOptions, ValueLength,
  ValueRepresentation,
};

use crate::P10Part;

/// Transform that converts a stream of DICOM P10 parts into printable text
/// that lists the structure and content of the contained DICOM data, one line
/// per data element, item, and delimiter.
///
/// This is used for printing DICOM P10 data on the command line, and the
/// output can be styled via [`PrintOptions`].
///
pub struct P10PrintTransform {
  print_options: PrintOptions,
  indent: usize,
}

impl P10PrintTransform {
  /// Constructs a new DICOM P10 print transform with the specified print
  /// options.
  ///
  pub fn new(print_options: &PrintOptions) -> Self {
    Self {
      print_options: print_options.clone(),
      indent: 0,
    }
  }

  /// Adds the next DICOM P10 part to be printed and returns the next piece of
  /// text output to be displayed.
  ///
  pub fn add_part(&mut self, part: &P10Part) -> String {
    match part {
      P10Part::FilePreambleAndDICMPrefix { .. } => {
        "Meta Header:\n".to_string()
      }

      P10Part::FileMetaInformationElement { element }
      | P10Part::DataElement { element } => self.format_data_element(element),

      P10Part::FileMetaInformationEnd { .. } => "\nData Set:\n".to_string(),

      P10Part::SequenceStart { tag, vr, length } => {
        let s = self.format_marker(*tag, *vr, *length, "<Sequence of Items>");

        self.indent += 1;

        s
      }

      P10Part::SequenceItemStart { length } => {
        let s = self.format_marker(
          dictionary::ITEM.tag,
          None,
          *length,
          "<Sequence Item>",
        );

        self.indent += 1;

        s
      }

      P10Part::SequenceItemDelimiter { encoded } => {
        self.indent = self.indent.saturating_sub(1);

        // Items that ended because their length was reached have no
        // delimitation item in the data, so aren't printed
        if *encoded {
          self.format_marker(
            dictionary::ITEM_DELIMITATION_ITEM.tag,
            None,
            ValueLength::ZERO,
            "<Item Delimiter>",
          )
        } else {
          "".to_string()
        }
      }

      P10Part::SequenceDelimiter { encoded } => {
        self.indent = self.indent.saturating_sub(1);

        if *encoded {
          self.format_marker(
            dictionary::SEQUENCE_DELIMITATION_ITEM.tag,
            None,
            ValueLength::ZERO,
            "<Sequence Delimiter>",
          )
        } else {
          "".to_string()
        }
      }

      P10Part::End => "".to_string(),
    }
  }

  fn format_data_element(&self, element: &DataElement) -> String {
    let prefix = print::format_data_element_prefix(
      element.tag,
      element.vr,
      ValueLength::new(element.length),
      self.indent,
      &self.print_options,
    );

    format!("{} {}\n", prefix, element.value_to_string())
  }

  fn format_marker(
    &self,
    tag: DataElementTag,
    vr: Option<ValueRepresentation>,
    length: ValueLength,
    marker: &str,
  ) -> String {
    let prefix = print::format_data_element_prefix(
      tag,
      vr,
      length,
      self.indent,
      &self.print_options,
    );

    format!("{} {}\n", prefix, marker)
  }
}

#[cfg(test)]
mod tests {
  use dcmlist_core::VrSerialization;

  use super::*;

  fn print_parts(parts: &[P10Part]) -> String {
    let mut transform =
      P10PrintTransform::new(&PrintOptions::new().styled(false));

    parts.iter().map(|part| transform.add_part(part)).collect()
  }

  #[test]
  fn headings_test() {
    assert_eq!(
      print_parts(&[
        P10Part::FilePreambleAndDICMPrefix {
          preamble: Box::new([0; 128]),
        },
        P10Part::FileMetaInformationElement {
          element: DataElement::new(
            dictionary::TRANSFER_SYNTAX_UID.tag,
            Some(ValueRepresentation::UniqueIdentifier),
            b"1.2.840.10008.1.2\0".to_vec(),
          ),
        },
        P10Part::FileMetaInformationEnd {
          transfer_syntax_uid: Some("1.2.840.10008.1.2".to_string()),
          vr_serialization: VrSerialization::VrImplicit,
        },
        P10Part::End,
      ]),
      "Meta Header:\n\
       (0002,0010) UI(18) 1.2.840.10008.1.2\n\
       \n\
       Data Set:\n"
    );
  }

  #[test]
  fn sequence_indent_test() {
    let sequence_tag = DataElementTag::new(0x0008, 0x1115);

    assert_eq!(
      print_parts(&[
        P10Part::SequenceStart {
          tag: sequence_tag,
          vr: Some(ValueRepresentation::Sequence),
          length: ValueLength::new(12),
        },
        P10Part::SequenceItemStart {
          length: ValueLength::new(12),
        },
        P10Part::DataElement {
          element: DataElement::new(
            DataElementTag::new(0x0010, 0x0020),
            Some(ValueRepresentation::LongString),
            b"ID01".to_vec(),
          ),
        },
        P10Part::SequenceItemDelimiter { encoded: false },
        P10Part::SequenceDelimiter { encoded: false },
        P10Part::DataElement {
          element: DataElement::new(
            DataElementTag::new(0x0028, 0x0010),
            None,
            vec![0x00, 0x02],
          ),
        },
      ]),
      "(0008,1115) SQ(12) <Sequence of Items>\n  \
         (fffe,e000) (12) <Sequence Item>\n    \
           (0010,0020) LO(4) ID01\n\
       (0028,0010) (2) 512\n"
    );
  }

  #[test]
  fn encoded_delimiters_test() {
    assert_eq!(
      print_parts(&[
        P10Part::SequenceStart {
          tag: DataElementTag::new(0x0008, 0x1115),
          vr: None,
          length: ValueLength::Undefined,
        },
        P10Part::SequenceItemStart {
          length: ValueLength::Undefined,
        },
        P10Part::SequenceItemDelimiter { encoded: true },
        P10Part::SequenceDelimiter { encoded: true },
      ]),
      "(0008,1115) (undefined) <Sequence of Items>\n  \
         (fffe,e000) (undefined) <Sequence Item>\n  \
         (fffe,e00d) (0) <Item Delimiter>\n\
       (fffe,e0dd) (0) <Sequence Delimiter>\n"
    );
  }
}
