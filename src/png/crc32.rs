//! Opt-in chunk integrity checking.
//!
//! The scanner never looks at CRCs. Call [`verify_crc`] on the chunks you
//! care about if you want them checked.

use super::*;

/// Per-byte remainders for the reflected polynomial `0xEDB88320`.
const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320_u32 ^ (c >> 1) } else { c >> 1 };
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

#[inline]
fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// The CRC-32 that PNG stores after each chunk.
///
/// Feed it the chunk's type bytes followed by its data bytes.
#[inline]
#[must_use]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}

/// Computes the chunk's CRC and compares it to the stored one.
///
/// The data is streamed through a small stack buffer, nothing is allocated.
/// Returns the CRC on a match.
///
/// **Post:** the cursor is at the start of the following chunk.
pub fn verify_crc<S: ByteSource>(cursor: &mut ByteCursor<S>, chunk: &ChunkHeader) -> PngResult<u32> {
  let mut crc = update_crc(u32::MAX, chunk.chunk_type.as_bytes().iter().copied());
  cursor.seek(SeekOrigin::Start(chunk.data_offset))?;
  let mut buf = [0_u8; 256];
  let mut left = chunk.length as usize;
  while left > 0 {
    let part = &mut buf[..left.min(256)];
    cursor.read_bytes_into(part)?;
    crc = update_crc(crc, part.iter().copied());
    left -= part.len();
  }
  let actual = crc ^ u32::MAX;
  let declared = cursor.read_u32_be()?;
  if declared == actual {
    Ok(actual)
  } else {
    warn!("chunk {} CRC mismatch: {declared:#010X} != {actual:#010X}", chunk.chunk_type);
    Err(PngError::CrcMismatch { chunk_type: chunk.chunk_type, declared, actual })
  }
}

#[test]
fn test_png_crc_of_iend() {
  // every IEND chunk ends with these bytes.
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
}
