use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Checks the 8 signature bytes at the cursor.
///
/// * **Pre:** the cursor should be at offset 0.
/// * **Post:** the cursor is 8 bytes past where it started, success or not.
///
/// On a mismatch the error names the first bad offset and the byte found
/// there (`None` if the stream was shorter than that).
pub fn validate_signature<S: ByteSource>(cursor: &mut ByteCursor<S>) -> PngResult<()> {
  let start = cursor.position();
  let available = cursor.remaining().min(PNG_SIGNATURE.len() as u64) as usize;
  let mut head = [0_u8; 8];
  cursor.read_bytes_into(&mut head[..available])?;
  cursor.seek(SeekOrigin::Start(start.saturating_add(PNG_SIGNATURE.len() as u64)))?;
  let mismatch = PNG_SIGNATURE.iter().enumerate().find_map(|(i, expected)| {
    match head[..available].get(i) {
      Some(b) if b == expected => None,
      Some(b) => Some((i, Some(*b))),
      None => Some((i, None)),
    }
  });
  match mismatch {
    None => Ok(()),
    Some((i, found)) => {
      let offset = start.saturating_add(i as u64);
      warn!("bad PNG signature at offset {offset}: {found:?}");
      Err(PngError::InvalidSignature { offset, found })
    }
  }
}
