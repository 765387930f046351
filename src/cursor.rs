//! Bounds checked, big-endian reading over a random-access byte source.

use bytemuck::Pod;

use crate::{PngError, PngResult};

/// Something that holds a known number of bytes and can copy any range of
/// them out on request.
pub trait ByteSource {
  /// Total length of the source in bytes.
  fn total_len(&self) -> u64;

  /// Fills `buf` with the bytes starting at `offset`.
  ///
  /// The cursor has already checked that `offset + buf.len()` is within
  /// [`total_len`](ByteSource::total_len).
  fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> PngResult<()>;
}

impl ByteSource for &[u8] {
  #[inline]
  fn total_len(&self) -> u64 {
    self.len() as u64
  }
  #[inline]
  fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> PngResult<()> {
    let eof = PngError::UnexpectedEof { offset, wanted: buf.len() };
    let start = usize::try_from(offset).map_err(|_| eof)?;
    let end = start.checked_add(buf.len()).ok_or(eof)?;
    buf.copy_from_slice(self.get(start..end).ok_or(eof)?);
    Ok(())
  }
}

/// Adapts any `Read + Seek` (such as a [`File`](std::fs::File)) into a
/// [`ByteSource`].
///
/// The length is measured once when the source is made, so the underlying
/// data shouldn't change size while it's being parsed.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
  reader: R,
  len: u64,
}
#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> IoSource<R> {
  /// Wraps the reader, seeking to its end to learn the length.
  pub fn new(mut reader: R) -> PngResult<Self> {
    let len = reader.seek(std::io::SeekFrom::End(0))?;
    Ok(Self { reader, len })
  }
  /// Gives back the reader.
  #[inline]
  pub fn into_inner(self) -> R {
    self.reader
  }
}
#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> ByteSource for IoSource<R> {
  #[inline]
  fn total_len(&self) -> u64 {
    self.len
  }
  fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> PngResult<()> {
    self.reader.seek(std::io::SeekFrom::Start(offset))?;
    self.reader.read_exact(buf).map_err(|e| match e.kind() {
      std::io::ErrorKind::UnexpectedEof => PngError::UnexpectedEof { offset, wanted: buf.len() },
      _ => PngError::from(e),
    })
  }
}

/// Where a seek is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
  /// An absolute offset from the start of the stream.
  Start(u64),
  /// A signed offset from the cursor's current position.
  Current(i64),
}

/// A read position over a [`ByteSource`].
///
/// Every read advances the position by the number of bytes read. A read that
/// can't be fully satisfied fails with
/// [`UnexpectedEof`](PngError::UnexpectedEof) and leaves the position where it
/// was.
///
/// All multi-byte integers are big-endian, as PNG requires.
#[derive(Debug, Clone)]
pub struct ByteCursor<S> {
  source: S,
  pos: u64,
}
impl<'b> ByteCursor<&'b [u8]> {
  /// A cursor at the start of a byte slice.
  #[inline]
  #[must_use]
  pub const fn from_slice(bytes: &'b [u8]) -> Self {
    Self { source: bytes, pos: 0 }
  }
}
impl<S: ByteSource> ByteCursor<S> {
  /// A cursor at the start of the source.
  #[inline]
  #[must_use]
  pub const fn new(source: S) -> Self {
    Self { source, pos: 0 }
  }

  /// The current absolute offset.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> u64 {
    self.pos
  }

  /// Total length of the underlying source.
  #[inline]
  #[must_use]
  pub fn total_len(&self) -> u64 {
    self.source.total_len()
  }

  /// Bytes left between the position and the end. This is 0 when the cursor
  /// has been seeked past the end.
  #[inline]
  #[must_use]
  pub fn remaining(&self) -> u64 {
    self.total_len().saturating_sub(self.pos)
  }

  /// Moves the cursor and returns the new absolute offset.
  ///
  /// Seeking past the end is allowed, later reads will fail instead.
  pub fn seek(&mut self, origin: SeekOrigin) -> PngResult<u64> {
    self.pos = match origin {
      SeekOrigin::Start(offset) => offset,
      SeekOrigin::Current(delta) => self
        .pos
        .checked_add_signed(delta)
        .ok_or(PngError::InvalidSeek { from: self.pos, delta })?,
    };
    Ok(self.pos)
  }

  /// Fills the whole buffer from the current position.
  pub fn read_bytes_into(&mut self, buf: &mut [u8]) -> PngResult<()> {
    if buf.is_empty() {
      return Ok(());
    }
    if (buf.len() as u64) > self.remaining() {
      return Err(PngError::UnexpectedEof { offset: self.pos, wanted: buf.len() });
    }
    self.source.read_at(self.pos, buf)?;
    self.pos += buf.len() as u64;
    Ok(())
  }

  /// Reads `N` bytes as an array.
  #[inline]
  pub fn read_array<const N: usize>(&mut self) -> PngResult<[u8; N]> {
    let mut a = [0_u8; N];
    self.read_bytes_into(&mut a)?;
    Ok(a)
  }

  /// Reads one byte.
  #[inline]
  pub fn read_u8(&mut self) -> PngResult<u8> {
    self.read_array::<1>().map(|[b]| b)
  }

  /// Reads a big-endian `u32`.
  #[inline]
  pub fn read_u32_be(&mut self) -> PngResult<u32> {
    self.read_array::<4>().map(u32::from_be_bytes)
  }

  /// Reads a plain-old-data value directly out of the stream.
  ///
  /// The type should be built from byte-aligned fields (such as
  /// [`pack1::U32BE`]) so that it has no padding and its layout is the same
  /// as the bytes on disk.
  #[inline]
  pub fn read_pod<T: Pod>(&mut self) -> PngResult<T> {
    let mut out = T::zeroed();
    self.read_bytes_into(bytemuck::bytes_of_mut(&mut out))?;
    Ok(out)
  }

  /// Reads `n` bytes into a new `Vec`.
  ///
  /// The length is checked against the stream before any allocation happens,
  /// so a corrupt length can't trigger a giant allocation.
  #[cfg(feature = "alloc")]
  pub fn read_bytes(&mut self, n: usize) -> PngResult<alloc::vec::Vec<u8>> {
    if (n as u64) > self.remaining() {
      return Err(PngError::UnexpectedEof { offset: self.pos, wanted: n });
    }
    let mut v = alloc::vec::Vec::new();
    v.try_reserve_exact(n)?;
    v.resize(n, 0);
    self.read_bytes_into(&mut v)?;
    Ok(v)
  }

  /// Gives back the source.
  #[inline]
  pub fn into_inner(self) -> S {
    self.source
  }
}
