#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! A crate for walking the chunk structure of PNG data.
//!
//! It checks the signature, decodes and validates the image header, and finds
//! where every chunk (particularly the `IDAT` image data chunks) lives in the
//! stream. It does *not* decompress or unfilter pixel data.
//!
//! Data is read through a [`ByteCursor`], which can sit on top of a byte slice
//! or (with the `std` feature) any `Read + Seek` such as an open file. Each
//! parse session owns its own cursor, so parsing the same data twice at once
//! just means making two cursors.
//!
//! ## Features
//! * `alloc`: reading chunk data into a `Vec`.
//! * `std` (default): [`IoSource`] and `std::error::Error` support.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

mod cursor;
pub use cursor::*;

pub mod png;
