use super::*;

/// The 4-byte tag naming a chunk's type.
///
/// Tags are conventionally ASCII letters, but nothing stops a corrupt file from
/// having any bytes here, so they're kept as raw bytes. The `Debug` and
/// `Display` impls just `as` cast each byte into a character.
///
/// Bit 5 of each tag byte (the lowercase bit, for ASCII letters) is a property
/// flag, see the `is_*` methods.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const tIME: Self = Self(*b"tIME");

  /// The raw tag bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// Ancillary chunks can be ignored by a decoder that doesn't know them.
  /// Critical chunks (the uppercase first letter ones) can't.
  #[inline]
  #[must_use]
  pub fn is_ancillary(self) -> bool {
    u8_get_bit(5, self.0[0])
  }
  /// Private chunks aren't part of any public registry.
  #[inline]
  #[must_use]
  pub fn is_private(self) -> bool {
    u8_get_bit(5, self.0[1])
  }
  /// Must be clear in all chunks conforming to the current PNG version.
  #[inline]
  #[must_use]
  pub fn is_reserved_bit_set(self) -> bool {
    u8_get_bit(5, self.0[2])
  }
  /// Safe-to-copy chunks can be copied by an editor that doesn't recognize
  /// them, even if it changed the critical chunks.
  #[inline]
  #[must_use]
  pub fn is_safe_to_copy(self) -> bool {
    u8_get_bit(5, self.0[3])
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  fn from(tag: [u8; 4]) -> Self {
    Self(tag)
  }
}
impl From<&[u8; 4]> for ChunkType {
  #[inline]
  fn from(tag: &[u8; 4]) -> Self {
    Self(*tag)
  }
}

#[test]
fn test_chunk_type_property_bits() {
  assert!(!ChunkType::IHDR.is_ancillary());
  assert!(!ChunkType::IDAT.is_private());
  assert!(!ChunkType::IEND.is_safe_to_copy());
  assert!(ChunkType::tEXt.is_ancillary());
  assert!(ChunkType::tEXt.is_safe_to_copy());
  assert!(!ChunkType::gAMA.is_safe_to_copy());
  let private = ChunkType(*b"meMe");
  assert!(private.is_ancillary());
  assert!(private.is_private());
  assert!(!private.is_reserved_bit_set());
  assert!(ChunkType(*b"abcd").is_reserved_bit_set());
}

#[test]
fn test_chunk_type_fmt() {
  extern crate alloc;
  use alloc::format;
  assert_eq!(format!("{}", ChunkType::IDAT), "IDAT");
  assert_eq!(format!("{:?}", ChunkType::sRGB), "\"sRGB\"");
}

#[test]
fn test_chunk_type_from_tag() {
  assert_eq!(ChunkType::from(*b"IDAT"), ChunkType::IDAT);
  assert_eq!(ChunkType::from(b"tIME"), ChunkType::tIME);
}
