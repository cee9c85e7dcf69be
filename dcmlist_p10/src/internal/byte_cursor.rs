use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

/// A sequential reader over a seekable source of bytes, e.g. an open file,
/// that reads little endian integers and raw bytes and is able to move
/// backwards and forwards by a number of bytes.
///
/// The total length of the source is determined up front, which means a read
/// that would go past the end fails before any bytes are consumed or any
/// memory is allocated for it.
///
#[derive(Debug)]
pub struct ByteCursor<R> {
  reader: R,
  position: u64,
  length: u64,
}

#[derive(Debug)]
pub enum ByteCursorError {
  /// Data was not read because it would go past the end of the source.
  DataEnd,

  /// A seek was not performed because it would move before the start or past
  /// the end of the source.
  SeekOutOfBounds { delta: i64 },

  /// The underlying reader failed.
  Io(std::io::Error),
}

impl From<std::io::Error> for ByteCursorError {
  fn from(error: std::io::Error) -> Self {
    match error.kind() {
      std::io::ErrorKind::UnexpectedEof => ByteCursorError::DataEnd,
      _ => ByteCursorError::Io(error),
    }
  }
}

impl<R: Read + Seek> ByteCursor<R> {
  /// Creates a new byte cursor that starts reading at the reader's current
  /// position.
  ///
  pub fn new(mut reader: R) -> Result<Self, ByteCursorError> {
    let position = reader.stream_position()?;
    let length = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(position))?;

    Ok(Self {
      reader,
      position,
      length,
    })
  }

  /// Returns the current offset into the source.
  ///
  pub fn position(&self) -> u64 {
    self.position
  }

  /// Returns whether all bytes in the source have been read.
  ///
  pub fn at_end(&self) -> bool {
    self.position >= self.length
  }

  /// Reads a little endian `u16`.
  ///
  pub fn read_u16_le(&mut self) -> Result<u16, ByteCursorError> {
    self.check_available(2)?;

    let value = self.reader.read_u16::<LittleEndian>()?;
    self.position += 2;

    Ok(value)
  }

  /// Reads a little endian `u32`.
  ///
  pub fn read_u32_le(&mut self) -> Result<u32, ByteCursorError> {
    self.check_available(4)?;

    let value = self.reader.read_u32::<LittleEndian>()?;
    self.position += 4;

    Ok(value)
  }

  /// Reads the given number of raw bytes. Reading zero bytes always succeeds
  /// and leaves the source untouched.
  ///
  pub fn read_bytes(
    &mut self,
    byte_count: usize,
  ) -> Result<Vec<u8>, ByteCursorError> {
    if byte_count == 0 {
      return Ok(vec![]);
    }

    self.check_available(byte_count as u64)?;

    let mut buffer = vec![0u8; byte_count];
    self.reader.read_exact(&mut buffer)?;
    self.position += byte_count as u64;

    Ok(buffer)
  }

  /// Moves the read position by the given number of bytes, which can be
  /// negative in order to re-read bytes. A buffered reader keeps its buffer
  /// when the move stays inside it.
  ///
  pub fn seek_relative(&mut self, delta: i64) -> Result<(), ByteCursorError> {
    let target = self.position as i128 + delta as i128;
    if target < 0 || target > self.length as i128 {
      return Err(ByteCursorError::SeekOutOfBounds { delta });
    }

    self.reader.seek_relative(delta)?;
    self.position = target as u64;

    Ok(())
  }

  /// Skips over the given number of bytes. Skipping past the end of the source
  /// is an error in the same way as reading past it.
  ///
  pub fn skip(&mut self, byte_count: u64) -> Result<(), ByteCursorError> {
    self.check_available(byte_count)?;
    self.seek_relative(byte_count as i64)
  }

  fn check_available(&self, byte_count: u64) -> Result<(), ByteCursorError> {
    if byte_count > self.length.saturating_sub(self.position) {
      Err(ByteCursorError::DataEnd)
    } else {
      Ok(())
    }
  }
}
