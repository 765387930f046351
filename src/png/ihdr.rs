use super::*;

/// Bytes of data in every `IHDR` chunk.
pub const IHDR_LEN: u32 = 13;

/// PNG limits width and height to `2^31 - 1`.
const MAX_DIMENSION: u32 = i32::MAX as u32;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale
  Grayscale = 0,
  /// Red, Green, Blue
  TrueColor = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Indexed = 3,
  /// Greyscale + Alpha
  GrayscaleAlpha = 4,
  /// Red, Green, Blue, Alpha
  TrueColorAlpha = 6,
}
impl ColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Grayscale => 1,
      Self::TrueColor => 3,
      Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::TrueColorAlpha => 4,
    }
  }

  /// The bit depths PNG allows with this color type.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Grayscale => &[1, 2, 4, 8, 16],
      Self::TrueColor => &[8, 16],
      Self::Indexed => &[1, 2, 4, 8],
      Self::GrayscaleAlpha => &[8, 16],
      Self::TrueColorAlpha => &[8, 16],
    }
  }

  /// If the bit depth is allowed with this color type.
  #[inline]
  #[must_use]
  pub fn allows_bit_depth(self, bit_depth: u8) -> bool {
    self.allowed_bit_depths().contains(&bit_depth)
  }
}
impl TryFrom<u8> for ColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => ColorType::Grayscale,
      2 => ColorType::TrueColor,
      3 => ColorType::Indexed,
      4 => ColorType::GrayscaleAlpha,
      6 => ColorType::TrueColorAlpha,
      _ => return Err(PngError::InvalidColorType(value)),
    })
  }
}

/// The `IHDR` payload, exactly as stored.
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct RawIhdr {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}

/// Image Header
///
/// Only ever built from a fully validated `IHDR` payload, so every value of
/// this type describes a legal PNG image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: ColorType,
  /// always 0 (deflate)
  pub compression_method: u8,
  /// always 0 (adaptive filtering)
  pub filter_method: u8,
  /// 0 for no interlace, 1 for Adam7
  pub interlace_method: u8,
}
impl ImageHeader {
  /// Validates a 13-byte `IHDR` payload.
  ///
  /// Checks go in stored field order, then the bit depth is checked against
  /// the color type last.
  pub fn from_ihdr_payload(payload: [u8; 13]) -> PngResult<Self> {
    let raw: RawIhdr = bytemuck::cast(payload);
    let width = raw.width.get();
    let height = raw.height.get();
    for dim in [width, height] {
      if dim == 0 || dim > MAX_DIMENSION {
        return Err(PngError::InvalidDimensions { width, height });
      }
    }
    let color_type = ColorType::try_from(raw.color_type)?;
    if raw.compression_method != 0 {
      return Err(PngError::UnsupportedCompression(raw.compression_method));
    }
    if raw.filter_method != 0 {
      return Err(PngError::UnsupportedFilter(raw.filter_method));
    }
    if raw.interlace_method > 1 {
      return Err(PngError::InvalidInterlace(raw.interlace_method));
    }
    if !color_type.allows_bit_depth(raw.bit_depth) {
      return Err(PngError::IncompatibleBitDepth { color_type, bit_depth: raw.bit_depth });
    }
    Ok(Self {
      width,
      height,
      bit_depth: raw.bit_depth,
      color_type,
      compression_method: raw.compression_method,
      filter_method: raw.filter_method,
      interlace_method: raw.interlace_method,
    })
  }

  /// If the image data is stored with Adam7 interlacing.
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }

  /// Bits used by a single pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }
}
impl Display for ImageHeader {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    writeln!(f, "width: {}", self.width)?;
    writeln!(f, "height: {}", self.height)?;
    writeln!(f, "bit depth: {}", self.bit_depth)?;
    writeln!(f, "color type: {} ({:?})", self.color_type as u8, self.color_type)?;
    writeln!(f, "compression method: {}", self.compression_method)?;
    writeln!(f, "filter method: {}", self.filter_method)?;
    writeln!(f, "interlace method: {}", self.interlace_method)
  }
}

/// Reads and validates the `IHDR` chunk.
///
/// * **Pre:** the cursor is at the first chunk (offset 8).
/// * **Post:** on success the cursor is just past the 13 data bytes. The CRC
///   has *not* been skipped.
///
/// This only moves forward. If you want the cursor back where it was, save
/// [`position`](ByteCursor::position) before calling.
pub fn decode_ihdr<S: ByteSource>(cursor: &mut ByteCursor<S>) -> PngResult<ImageHeader> {
  let chunk = read_chunk_header(cursor)?;
  if chunk.chunk_type != ChunkType::IHDR {
    return Err(PngError::MissingIhdr { found: chunk.chunk_type });
  }
  if chunk.length != IHDR_LEN {
    return Err(PngError::MalformedIhdr { length: chunk.length });
  }
  cursor.seek(SeekOrigin::Start(chunk.data_offset))?;
  let header = ImageHeader::from_ihdr_payload(cursor.read_array()?)?;
  debug!(
    "IHDR: {}x{} {:?} depth={} interlace={}",
    header.width, header.height, header.color_type, header.bit_depth, header.interlace_method
  );
  Ok(header)
}

/// Checks the signature and then decodes the `IHDR`.
///
/// The cursor is moved to offset 0 first, wherever it was. Afterwards it's
/// where [`decode_ihdr`] leaves it.
pub fn read_png_header<S: ByteSource>(cursor: &mut ByteCursor<S>) -> PngResult<ImageHeader> {
  cursor.seek(SeekOrigin::Start(0))?;
  validate_signature(cursor)?;
  decode_ihdr(cursor)
}
