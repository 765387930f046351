use pngwalk::{png::*, ByteCursor, ByteSource, IoSource, PngError, SeekOrigin};
use walkdir::WalkDir;

fn push_chunk(out: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  out.extend_from_slice(&png_crc(ty.iter().chain(data).copied()).to_be_bytes());
}

fn png_with_ihdr(bit_depth: u8, color_type: u8) -> Vec<u8> {
  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&7_u32.to_be_bytes());
  ihdr.extend_from_slice(&3_u32.to_be_bytes());
  ihdr.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
  let mut png = PNG_SIGNATURE.to_vec();
  push_chunk(&mut png, b"IHDR", &ihdr);
  push_chunk(&mut png, b"IDAT", &[0x78, 0x9C, 0x03, 0x00]);
  push_chunk(&mut png, b"IEND", &[]);
  png
}

/// Walks the whole stream, the way a caller that wants everything would.
fn walk_everything<S: ByteSource>(cursor: &mut ByteCursor<S>) -> Result<usize, PngError> {
  let _header = read_png_header(cursor)?;
  let mut count = 0;
  for chunk in ChunkScanner::new(cursor) {
    let _ = chunk?;
    count += 1;
  }
  Ok(count)
}

#[test]
fn test_bit_depth_table_exhaustive() {
  const TABLE: &[(u8, &[u8])] =
    &[(0, &[1, 2, 4, 8, 16]), (2, &[8, 16]), (3, &[1, 2, 4, 8]), (4, &[8, 16]), (6, &[8, 16])];
  let mut accepted = 0;
  for color_type in 0..=u8::MAX {
    for bit_depth in 0..=u8::MAX {
      let png = png_with_ihdr(bit_depth, color_type);
      let mut c = ByteCursor::from_slice(&png);
      c.seek(SeekOrigin::Start(8)).unwrap();
      let result = decode_ihdr(&mut c);
      match TABLE.iter().find(|(ct, _)| *ct == color_type) {
        None => assert_eq!(result, Err(PngError::InvalidColorType(color_type))),
        Some((_, depths)) if depths.contains(&bit_depth) => {
          let header = result.unwrap();
          assert_eq!(header.color_type as u8, color_type);
          assert_eq!(header.bit_depth, bit_depth);
          assert_eq!(header.color_type.allowed_bit_depths(), *depths);
          accepted += 1;
        }
        Some(_) => assert!(
          matches!(result, Err(PngError::IncompatibleBitDepth { bit_depth: b, color_type: ct })
            if b == bit_depth && ct as u8 == color_type),
          "color_type: {color_type}, bit_depth: {bit_depth}, result: {result:?}"
        ),
      }
    }
  }
  assert_eq!(accepted, 15);
}

#[test]
fn test_scanner_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if entry.file_type().is_dir() {
      continue;
    }
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let mut c = ByteCursor::from_slice(&v);
    // source files don't start with a PNG signature.
    assert!(walk_everything(&mut c).is_err());
  }
  // even totally random data should never panic the scanner!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let mut c = ByteCursor::from_slice(&v);
    for _ in ChunkScanner::new(&mut c) {
      //
    }
    let mut c = ByteCursor::from_slice(&v);
    let _ = walk_everything(&mut c);
  }
}

#[test]
fn test_random_chunk_bodies_no_panics() {
  // a real signature and header, then garbage.
  for _ in 0..10 {
    let mut v = png_with_ihdr(8, 6);
    v.truncate(33);
    v.extend(super::rand_bytes(512));
    let mut c = ByteCursor::from_slice(&v);
    let results: Vec<_> = ChunkScanner::new(&mut c).collect();
    assert!(results.len() >= 1);
    assert!(results[..results.len() - 1].iter().all(|r| r.is_ok()));
    let mut c = ByteCursor::from_slice(&v);
    c.seek(SeekOrigin::Start(33)).unwrap();
    for _ in find_all(&mut c, ChunkType::IDAT) {
      //
    }
  }
}

#[test]
fn test_file_backed_cursor() {
  let png = png_with_ihdr(16, 4);
  let path = std::env::temp_dir().join(format!("pngwalk-test-{}.png", std::process::id()));
  std::fs::write(&path, &png).unwrap();
  let file = std::fs::File::open(&path).unwrap();
  let mut c = ByteCursor::new(IoSource::new(file).unwrap());
  assert_eq!(c.total_len(), png.len() as u64);
  let header = read_png_header(&mut c).unwrap();
  assert_eq!(header.color_type, ColorType::GrayscaleAlpha);
  assert_eq!(header.bit_depth, 16);
  assert_eq!((header.width, header.height), (7, 3));
  c.seek(SeekOrigin::Start(8)).unwrap();
  let idat = idat_chunks(&mut c).next().unwrap().unwrap();
  assert_eq!(idat.read_data(&mut c).unwrap(), [0x78, 0x9C, 0x03, 0x00]);
  assert!(verify_crc(&mut c, &idat).is_ok());
  assert_eq!(walk_everything(&mut c), Ok(3));
  drop(c);
  let _ = std::fs::remove_file(&path);
}

#[test]
fn test_header_display() {
  let png = png_with_ihdr(4, 3);
  let mut c = ByteCursor::from_slice(&png);
  let header = read_png_header(&mut c).unwrap();
  assert_eq!(
    header.to_string(),
    "width: 7\nheight: 3\nbit depth: 4\ncolor type: 3 (Indexed)\n\
     compression method: 0\nfilter method: 0\ninterlace method: 0\n"
  );
}

#[test]
fn test_error_display() {
  let e = PngError::TruncatedChunk { chunk_type: ChunkType::IDAT, declared_length: 50, available: 9 };
  assert_eq!(e.to_string(), "chunk IDAT declares 50 bytes but only 9 remain");
  let e: Box<dyn std::error::Error> = Box::new(PngError::MalformedIhdr { length: 12 });
  assert_eq!(e.to_string(), "IHDR length is 12, expected 13");
}
