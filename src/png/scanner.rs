use super::*;

/// Bytes of CRC that trail every chunk's data.
pub const CRC_LEN: u64 = 4;

/// The length and type tag that start every chunk, exactly as stored.
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct RawChunkPrefix {
  length: U32BE,
  chunk_type: ChunkType,
}

/// Where one chunk lives in the stream.
///
/// This only describes the chunk, none of its data has been read. Seek to
/// `data_offset` to get at the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkHeader {
  /// Bytes of chunk data (not counting the length, type, or CRC).
  pub length: u32,
  /// The chunk's type tag.
  pub chunk_type: ChunkType,
  /// Absolute offset of the first data byte.
  pub data_offset: u64,
}
impl ChunkHeader {
  /// Absolute offset of the length field that starts this chunk.
  #[inline]
  #[must_use]
  pub const fn header_offset(&self) -> u64 {
    self.data_offset.saturating_sub(8)
  }
  /// Absolute offset of the CRC that follows the data.
  #[inline]
  #[must_use]
  pub const fn crc_offset(&self) -> u64 {
    self.data_offset + self.length as u64
  }
  /// Absolute offset where the next chunk's header begins.
  #[inline]
  #[must_use]
  pub const fn next_chunk_offset(&self) -> u64 {
    self.crc_offset() + CRC_LEN
  }

  /// Reads the chunk's data.
  ///
  /// **Post:** the cursor is at [`crc_offset`](Self::crc_offset).
  #[cfg(feature = "alloc")]
  pub fn read_data<S: ByteSource>(&self, cursor: &mut ByteCursor<S>) -> PngResult<Vec<u8>> {
    cursor.seek(SeekOrigin::Start(self.data_offset))?;
    cursor.read_bytes(self.length as usize)
  }

  /// Reads the CRC value stored after the data, without checking it.
  ///
  /// **Post:** the cursor is at [`next_chunk_offset`](Self::next_chunk_offset).
  pub fn read_declared_crc<S: ByteSource>(&self, cursor: &mut ByteCursor<S>) -> PngResult<u32> {
    cursor.seek(SeekOrigin::Start(self.crc_offset()))?;
    cursor.read_u32_be()
  }
}

/// Reads one chunk header and skips past the chunk's data and CRC.
///
/// * **Pre:** the cursor is at the start of a chunk.
/// * **Post:** on success the cursor is at the start of the following chunk.
///
/// The declared length is checked against what's left in the stream before
/// anything else trusts it. The CRC is only skipped, so a chunk whose CRC is cut
/// off still reads fine, and the next read past it fails instead.
pub fn read_chunk_header<S: ByteSource>(cursor: &mut ByteCursor<S>) -> PngResult<ChunkHeader> {
  let prefix: RawChunkPrefix = cursor.read_pod()?;
  let header = ChunkHeader {
    length: prefix.length.get(),
    chunk_type: prefix.chunk_type,
    data_offset: cursor.position(),
  };
  let available = cursor.remaining();
  if u64::from(header.length) > available {
    warn!(
      "chunk {} at offset {} declares {} bytes, only {available} remain",
      header.chunk_type,
      header.header_offset(),
      header.length
    );
    return Err(PngError::TruncatedChunk {
      chunk_type: header.chunk_type,
      declared_length: header.length,
      available,
    });
  }
  cursor.seek(SeekOrigin::Start(header.next_chunk_offset()))?;
  trace!("chunk {} len={} data_offset={}", header.chunk_type, header.length, header.data_offset);
  Ok(header)
}

/// An iterator over the chunk headers of a PNG stream.
///
/// Each step seeks to the offset where the previous chunk ended and reads one
/// header with [`read_chunk_header`], so nothing else using the cursor between
/// steps can throw the scan off.
///
/// The scan ends after yielding the `IEND` chunk, or after yielding the first
/// error. Running out of stream before `IEND` is an
/// [`UnexpectedEof`](PngError::UnexpectedEof) error, since a PNG must end with
/// `IEND`.
///
/// The scanner does no work beyond the last header you pull from it, so just
/// stop iterating when you've seen enough.
#[derive(Debug)]
pub struct ChunkScanner<'c, S> {
  cursor: &'c mut ByteCursor<S>,
  next_offset: u64,
  finished: bool,
}
impl<'c, S: ByteSource> ChunkScanner<'c, S> {
  /// Scans from offset 8, the first chunk after the signature.
  #[inline]
  pub fn new(cursor: &'c mut ByteCursor<S>) -> Self {
    Self::starting_at(cursor, PNG_SIGNATURE.len() as u64)
  }

  /// Scans from any absolute offset, which should be the start of a chunk.
  ///
  /// This is also how to restart a scan: hold on to a
  /// [`header_offset`](ChunkHeader::header_offset) and scan from there again.
  #[inline]
  pub fn starting_at(cursor: &'c mut ByteCursor<S>, offset: u64) -> Self {
    Self { cursor, next_offset: offset, finished: false }
  }

  /// Scans from wherever the cursor is now.
  #[inline]
  pub fn from_current(cursor: &'c mut ByteCursor<S>) -> Self {
    let offset = cursor.position();
    Self::starting_at(cursor, offset)
  }

  /// Offset where the next step will read a header.
  #[inline]
  #[must_use]
  pub const fn next_offset(&self) -> u64 {
    self.next_offset
  }

  /// If the scan has reached `IEND` or an error.
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    self.finished
  }

  fn step(&mut self) -> PngResult<ChunkHeader> {
    self.cursor.seek(SeekOrigin::Start(self.next_offset))?;
    if self.cursor.remaining() == 0 {
      warn!("stream ended at offset {} without an IEND chunk", self.next_offset);
    }
    let header = read_chunk_header(self.cursor)?;
    self.next_offset = header.next_chunk_offset();
    Ok(header)
  }
}
impl<S: ByteSource> Iterator for ChunkScanner<'_, S> {
  type Item = PngResult<ChunkHeader>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    let out = self.step();
    self.finished = match &out {
      Ok(header) => header.chunk_type == ChunkType::IEND,
      Err(_) => true,
    };
    Some(out)
  }
}
impl<S: ByteSource> core::iter::FusedIterator for ChunkScanner<'_, S> {}
