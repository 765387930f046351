use core::fmt;

use crate::png::{ChunkType, ColorType};

/// An error from the `pngwalk` crate.
///
/// Every parsing operation reports exactly one of these. None of them are
/// fatal to the process, the caller decides what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The first 8 bytes didn't match the PNG signature.
  ///
  /// `found` is `None` when the stream ended before `offset`.
  InvalidSignature { offset: u64, found: Option<u8> },

  /// A read wanted more bytes than the stream had left.
  UnexpectedEof { offset: u64, wanted: usize },

  /// A seek would have moved the cursor before the start of the stream (or
  /// past `u64::MAX`).
  InvalidSeek { from: u64, delta: i64 },

  /// A chunk declared more data than the stream holds.
  TruncatedChunk { chunk_type: ChunkType, declared_length: u32, available: u64 },

  /// The first chunk wasn't an `IHDR`.
  MissingIhdr { found: ChunkType },

  /// The `IHDR` chunk didn't have a length of 13.
  MalformedIhdr { length: u32 },

  /// Width or height was 0, or above `2^31 - 1`.
  InvalidDimensions { width: u32, height: u32 },

  /// The color type byte isn't one of 0, 2, 3, 4, or 6.
  InvalidColorType(u8),

  /// The compression method byte wasn't 0.
  UnsupportedCompression(u8),

  /// The filter method byte wasn't 0.
  UnsupportedFilter(u8),

  /// The interlace method byte wasn't 0 or 1.
  InvalidInterlace(u8),

  /// The bit depth isn't allowed for the color type.
  IncompatibleBitDepth { color_type: ColorType, bit_depth: u8 },

  /// The CRC stored after a chunk doesn't match the computed CRC.
  CrcMismatch { chunk_type: ChunkType, declared: u32, actual: u32 },

  /// The allocator couldn't give us enough space.
  #[cfg(feature = "alloc")]
  Alloc,

  /// The underlying reader failed.
  #[cfg(feature = "std")]
  Io(std::io::ErrorKind),
}

/// Shorthand for results with a [`PngError`].
pub type PngResult<T> = Result<T, PngError>;

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::InvalidSignature { offset, found: Some(b) } => {
        write!(f, "not a PNG signature: byte {b} at offset {offset}")
      }
      Self::InvalidSignature { offset, found: None } => {
        write!(f, "not a PNG signature: stream ends at offset {offset}")
      }
      Self::UnexpectedEof { offset, wanted } => {
        write!(f, "unexpected end of stream reading {wanted} bytes at offset {offset}")
      }
      Self::InvalidSeek { from, delta } => write!(f, "invalid seek by {delta} from offset {from}"),
      Self::TruncatedChunk { chunk_type, declared_length, available } => write!(
        f,
        "chunk {chunk_type} declares {declared_length} bytes but only {available} remain"
      ),
      Self::MissingIhdr { found } => write!(f, "first chunk is {found}, expected IHDR"),
      Self::MalformedIhdr { length } => write!(f, "IHDR length is {length}, expected 13"),
      Self::InvalidDimensions { width, height } => {
        write!(f, "invalid image dimensions {width}x{height}")
      }
      Self::InvalidColorType(c) => write!(f, "invalid color type {c}"),
      Self::UnsupportedCompression(c) => write!(f, "unsupported compression method {c}"),
      Self::UnsupportedFilter(c) => write!(f, "unsupported filter method {c}"),
      Self::InvalidInterlace(c) => write!(f, "invalid interlace method {c}"),
      Self::IncompatibleBitDepth { color_type, bit_depth } => {
        write!(f, "bit depth {bit_depth} is not allowed for {color_type:?}")
      }
      Self::CrcMismatch { chunk_type, declared, actual } => write!(
        f,
        "chunk {chunk_type} CRC mismatch: declared {declared:#010X}, actual {actual:#010X}"
      ),
      #[cfg(feature = "alloc")]
      Self::Alloc => write!(f, "allocation failed"),
      #[cfg(feature = "std")]
      Self::Io(kind) => write!(f, "I/O error: {kind}"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PngError {}

#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PngError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    Self::Io(e.kind())
  }
}
