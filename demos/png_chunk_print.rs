use pngwalk::{png::*, ByteCursor, IoSource, PngResult};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    println!("Reading `{}`... ", path.display());
    if let Err(e) = print_png_file(path) {
      println!("{e}");
    }
  }
}

fn print_png_file(path: &std::path::Path) -> PngResult<()> {
  let file = std::fs::File::open(path)?;
  let mut cursor = ByteCursor::new(IoSource::new(file)?);
  let header = read_png_header(&mut cursor)?;
  println!("{header}");
  for (n, chunk) in ChunkScanner::new(&mut cursor).enumerate() {
    let chunk = chunk?;
    println!(
      "{n}: {} len={} data_offset={} ancillary={}",
      chunk.chunk_type,
      chunk.length,
      chunk.data_offset,
      chunk.chunk_type.is_ancillary()
    );
  }
  Ok(())
}
