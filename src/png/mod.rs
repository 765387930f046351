#![forbid(unsafe_code)]

//! Holds all the tools for walking PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! The general format of a PNG is an 8 byte signature followed by "chunks".
//! Each chunk is laid out as:
//!
//! ```text
//! [length: u32 BE][type: 4 bytes][data: length bytes][crc: u32 BE]
//! ```
//!
//! The first chunk is always the `IHDR` (image header), and the last is always
//! an `IEND` with no data. One or more `IDAT` chunks hold the compressed image
//! data, and should appear one after the other.
//!
//! This module only reads the *structure* of a PNG. It finds the header and
//! tells you where each chunk's data lives, but it doesn't decompress or
//! unfilter any pixel data.
//!
//! ## Step By Step
//!
//! Put a [`ByteCursor`] over your data, check the signature, and decode the
//! header.
//!
//! ```
//! use pngwalk::{png::*, ByteCursor, PngError};
//! # fn or_png_error(png: &[u8]) -> Result<(), PngError> {
//! let mut cursor = ByteCursor::from_slice(png);
//! validate_signature(&mut cursor)?;
//! let header: ImageHeader = decode_ihdr(&mut cursor)?;
//! # Ok(())
//! # }
//! ```
//!
//! Then walk the chunks you're interested in. The locations come back as
//! [`ChunkHeader`] values, and you seek to `data_offset` yourself if you need
//! the bytes.
//!
//! ```
//! # use pngwalk::{png::*, ByteCursor, PngError};
//! # fn or_png_error(png: &[u8]) -> Result<(), PngError> {
//! # let mut cursor = ByteCursor::from_slice(png);
//! for idat in idat_chunks(&mut cursor) {
//!   let idat = idat?;
//!   // idat.data_offset .. idat.data_offset + idat.length
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing Errors
//!
//! Every operation returns a [`PngResult`]. Nothing here panics on bad input or
//! ends the process. Chunk CRCs are *not* checked while scanning, call
//! [`verify_crc`] if you want that.

use core::fmt::{Debug, Display, Write};

use bitfrob::u8_get_bit;
use bytemuck::{Pod, Zeroable};
use log::{debug, trace, warn};
use pack1::U32BE;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{ByteCursor, ByteSource, PngError, PngResult, SeekOrigin};

mod chunk_type;
pub use chunk_type::*;

mod signature;
pub use signature::*;

mod scanner;
pub use scanner::*;

mod ihdr;
pub use ihdr::*;

mod locate;
pub use locate::*;

mod crc32;
pub use crc32::*;
