//! Core DICOM concepts used when listing DICOM P10 data: data element tags,
//! value representations, transfer syntaxes, decoded data elements, and the
//! formatting of listing lines.

pub mod data_element;
pub mod data_element_tag;
pub mod dictionary;
pub mod error;
pub mod print;
pub mod transfer_syntax;
pub mod value_length;
pub mod value_representation;

pub use data_element::DataElement;
pub use data_element_tag::DataElementTag;
pub use error::DcmlistError;
pub use print::PrintOptions;
pub use transfer_syntax::{TransferSyntax, VrSerialization};
pub use value_length::ValueLength;
pub use value_representation::ValueRepresentation;
