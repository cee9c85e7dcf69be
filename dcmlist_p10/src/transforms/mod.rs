//! Transforms that operate on a stream of DICOM P10 parts to convert it to a
//! different format.

pub mod p10_print_transform;
