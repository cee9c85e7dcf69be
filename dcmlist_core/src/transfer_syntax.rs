//! Defines the transfer syntaxes that decide how the main data set of DICOM
//! P10 data is decoded.

/// The value representation (VR) serialization mode of a transfer syntax. This
/// is either implicit or explicit.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VrSerialization {
  VrImplicit,
  VrExplicit,
}

impl std::fmt::Display for VrSerialization {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      VrSerialization::VrImplicit => write!(f, "Implicit VR"),
      VrSerialization::VrExplicit => write!(f, "Explicit VR"),
    }
  }
}

/// Describes a single DICOM transfer syntax, with its UID and how it
/// serializes value representations (implicit vs explicit).
///
#[derive(Debug, PartialEq)]
pub struct TransferSyntax {
  pub uid: &'static str,
  pub vr_serialization: VrSerialization,
}

/// The 'Implicit VR Little Endian' transfer syntax.
///
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
  uid: "1.2.840.10008.1.2",
  vr_serialization: VrSerialization::VrImplicit,
};

/// The 'Explicit VR Little Endian' transfer syntax.
///
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
  uid: "1.2.840.10008.1.2.1",
  vr_serialization: VrSerialization::VrExplicit,
};

/// Returns the VR serialization to use for the main data set given the
/// transfer syntax UID read from the File Meta Information, if any.
///
/// Only 'Implicit VR Little Endian' selects implicit VRs. Every other UID,
/// including unknown ones, and a missing UID select explicit VRs.
///
pub fn vr_serialization_for_uid(uid: Option<&str>) -> VrSerialization {
  match uid {
    Some(uid) if uid == IMPLICIT_VR_LITTLE_ENDIAN.uid => {
      IMPLICIT_VR_LITTLE_ENDIAN.vr_serialization
    }
    _ => EXPLICIT_VR_LITTLE_ENDIAN.vr_serialization,
  }
}

/// Converts the raw bytes of a UID value into a string by removing the
/// trailing NUL or space padding that makes its length even.
///
pub fn uid_from_bytes(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes)
    .trim_end_matches(['\0', ' '])
    .to_string()
}
