use super::*;

/// An iterator over just the chunks of one type, in file order.
///
/// Made by [`find_all`] or [`idat_chunks`].
#[derive(Debug)]
pub struct FindAll<'c, S> {
  scanner: ChunkScanner<'c, S>,
  target: ChunkType,
}
impl<'c, S: ByteSource> FindAll<'c, S> {
  /// Filters an existing scan.
  #[inline]
  pub fn new(scanner: ChunkScanner<'c, S>, target: ChunkType) -> Self {
    Self { scanner, target }
  }
}
impl<S: ByteSource> Iterator for FindAll<'_, S> {
  type Item = PngResult<ChunkHeader>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      match self.scanner.next()? {
        Ok(header) if header.chunk_type == self.target => return Some(Ok(header)),
        Ok(_) => continue,
        Err(e) => return Some(Err(e)),
      }
    }
  }
}
impl<S: ByteSource> core::iter::FusedIterator for FindAll<'_, S> {}

/// Every chunk of the target type, starting from the cursor's position.
///
/// * **Pre:** the cursor is at the start of a chunk.
///
/// Scan errors are passed along (after which the iterator ends). Chunk data
/// is never read.
#[inline]
pub fn find_all<S: ByteSource>(cursor: &mut ByteCursor<S>, target: ChunkType) -> FindAll<'_, S> {
  FindAll::new(ChunkScanner::from_current(cursor), target)
}

/// The first chunk of the target type, starting from the cursor's position.
///
/// Gives `Ok(None)` if the scan reached `IEND` without a match. The scan stops
/// as soon as a match is found, leaving the cursor at the start of the chunk
/// after it.
#[inline]
pub fn find_first<S: ByteSource>(
  cursor: &mut ByteCursor<S>, target: ChunkType,
) -> PngResult<Option<ChunkHeader>> {
  find_all(cursor, target).next().transpose()
}

/// Every `IDAT` chunk, scanning from just after the signature.
///
/// All of the `IDAT` data taken together forms a single zlib stream.
#[inline]
pub fn idat_chunks<S: ByteSource>(cursor: &mut ByteCursor<S>) -> FindAll<'_, S> {
  FindAll::new(ChunkScanner::new(cursor), ChunkType::IDAT)
}
