//! Reads the DICOM Part 10 (P10) binary format used to store and transmit
//! DICOM-based medical imaging information, and lists its content as text.

pub mod p10_error;
pub mod p10_part;
pub mod p10_read;
pub mod transforms;
pub mod value_length_sizes;

mod internal;

use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};

use dcmlist_core::PrintOptions;

pub use p10_error::{P10Error, P10ErrorKind};
pub use p10_part::P10Part;
pub use p10_read::{P10ReadConfig, P10ReadContext};
pub use transforms::p10_print_transform::P10PrintTransform;
pub use value_length_sizes::{ValueLengthSize, ValueLengthSizes};

/// Returns whether a file contains DICOM P10 data by checking for the presence
/// of the 128-byte File Preamble followed by the "DICM" prefix.
///
pub fn is_valid_file(filename: &str) -> bool {
  match File::open(filename) {
    Ok(mut file) => {
      let mut buffer = vec![0u8; 132];
      match file.read_exact(&mut buffer) {
        Ok(_) => is_valid_bytes(&buffer),
        Err(_) => false,
      }
    }
    Err(_) => false,
  }
}

/// Returns whether the given bytes contain DICOM P10 data by checking for the
/// presence of the 128-byte File Preamble followed by the "DICM" prefix.
///
pub fn is_valid_bytes(bytes: &[u8]) -> bool {
  if bytes.len() < 132 {
    return false;
  }

  bytes[128..132] == *b"DICM".as_slice()
}

/// Opens a file and returns a read context that reads its DICOM P10 parts.
/// The file is closed when the read context is dropped.
///
pub fn read_file(
  filename: &str,
) -> Result<P10ReadContext<BufReader<File>>, P10Error> {
  match File::open(filename) {
    Ok(file) => read_stream(BufReader::new(file)),
    Err(e) => Err(P10Error::FileError {
      when: "Opening file".to_string(),
      details: e.to_string(),
    }),
  }
}

/// Returns a read context that reads DICOM P10 parts from a read stream,
/// starting at its current position.
///
pub fn read_stream<R: Read + Seek>(
  stream: R,
) -> Result<P10ReadContext<R>, P10Error> {
  P10ReadContext::new(stream)
}

/// Prints a listing of the content of a DICOM P10 file to an output stream.
///
/// Lines are written as their parts are read, so when an error occurs the
/// lines for all data prior to the error will already have been written.
///
pub fn print_file(
  filename: &str,
  output: &mut dyn Write,
  print_options: &PrintOptions,
) -> Result<(), P10Error> {
  print_parts(read_file(filename)?, output, print_options)
}

/// Prints a listing of the content of DICOM P10 data in a read stream to an
/// output stream.
///
pub fn print_stream<R: Read + Seek>(
  stream: R,
  output: &mut dyn Write,
  print_options: &PrintOptions,
) -> Result<(), P10Error> {
  print_parts(read_stream(stream)?, output, print_options)
}

fn print_parts<R: Read + Seek>(
  context: P10ReadContext<R>,
  output: &mut dyn Write,
  print_options: &PrintOptions,
) -> Result<(), P10Error> {
  let map_write_error = |e: std::io::Error| P10Error::FileError {
    when: "Writing to output stream".to_string(),
    details: e.to_string(),
  };

  let mut p10_print_transform = P10PrintTransform::new(print_options);

  for part in context {
    let s = p10_print_transform.add_part(&part?);

    output.write_all(s.as_bytes()).map_err(map_write_error)?;
  }

  output.flush().map_err(map_write_error)
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::io::{Cursor, SeekFrom};
  use std::rc::Rc;

  use super::*;

  /// Reader that counts the bytes pulled from it.
  ///
  struct CountingReader {
    inner: Cursor<Vec<u8>>,
    bytes_read: Rc<Cell<usize>>,
  }

  impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
      let n = self.inner.read(buf)?;
      self.bytes_read.set(self.bytes_read.get() + n);
      Ok(n)
    }
  }

  impl Seek for CountingReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
      self.inner.seek(pos)
    }
  }

  #[test]
  fn is_valid_bytes_test() {
    let mut bytes = vec![0u8; 128];
    assert!(!is_valid_bytes(&bytes));

    bytes.extend_from_slice(b"DICM");
    assert!(is_valid_bytes(&bytes));

    bytes[131] = b'X';
    assert!(!is_valid_bytes(&bytes));
  }

  #[test]
  fn read_file_missing_test() {
    let result = read_file("missing-file.dcm");

    assert!(matches!(result, Err(P10Error::FileError { .. })));
    assert!(!is_valid_file("missing-file.dcm"));
  }

  #[test]
  fn print_stream_test() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(b"\x02\x00\x10\x00UI\x12\x00");
    bytes.extend_from_slice(b"1.2.840.10008.1.2\0");
    bytes.extend_from_slice(&[0, 0, 0, 0]);

    let mut output = vec![];
    print_stream(
      Cursor::new(bytes),
      &mut output,
      &PrintOptions::new().styled(false),
    )
    .unwrap();

    assert_eq!(
      String::from_utf8(output).unwrap(),
      "Meta Header:\n\
       (0002,0010) UI(18) 1.2.840.10008.1.2\n\
       \n\
       Data Set:\n"
    );
  }

  #[test]
  fn print_stream_error_test() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(b"\x02\x00\x10\x00UI\x12\x00");
    bytes.extend_from_slice(b"1.2.840");

    let mut output = vec![];
    let result = print_stream(
      Cursor::new(bytes),
      &mut output,
      &PrintOptions::new().styled(false),
    );

    assert!(matches!(
      result,
      Err(P10Error::DataEndedUnexpectedly { offset: 140, .. })
    ));
    assert_eq!(String::from_utf8(output).unwrap(), "Meta Header:\n");
  }

  #[test]
  fn buffered_read_test() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(b"\x02\x00\x10\x00UI\x14\x00");
    bytes.extend_from_slice(b"1.2.840.10008.1.2.1\0");

    // Each OB header has two reserved bytes that are skipped over
    for _ in 0..2000 {
      bytes.extend_from_slice(b"\x11\x00\x10\x00OB\x00\x00");
      bytes.extend_from_slice(&[2, 0, 0, 0, 0xAB, 0xCD]);
    }

    let file_size = bytes.len();
    let bytes_read = Rc::new(Cell::new(0));

    let reader = CountingReader {
      inner: Cursor::new(bytes),
      bytes_read: bytes_read.clone(),
    };

    let parts = read_stream(BufReader::new(reader))
      .unwrap()
      .collect::<Result<Vec<_>, _>>()
      .unwrap();

    assert_eq!(parts.len(), 2004);
    assert_eq!(parts.last(), Some(&P10Part::End));
    assert!(
      bytes_read.get() <= file_size * 2,
      "Read {} bytes from a {} byte source",
      bytes_read.get(),
      file_size
    );
  }
}
