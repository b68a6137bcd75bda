//! ASCII PPM (P3) sink — the one place this crate's tracing surface touches
//! fallible I/O (spec.md §7).

use crate::error::{Context, Result};
use crate::image_buf::Image;
use std::io::Write;
use std::path::Path;

/// Writes `image` as ASCII PPM (P3) to `writer`: a `P3` header, width and
/// height, max channel value, then one row per image row of
/// space-separated `R G B` triples, top-to-bottom / left-to-right.
pub fn write<W: Write>(image: &Image, mut writer: W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        let mut line = String::with_capacity(row.len() * 12);
        for (i, pixel) in row.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&format!("{} {} {}", pixel.x, pixel.y, pixel.z));
        }
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

/// Convenience wrapper that creates (or overwrites) the file at `path`.
pub fn write_to_file(image: &Image, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not create PPM file at {}", path.display()))?;
    write(image, std::io::BufWriter::new(file))
        .with_context(|| format!("could not write PPM data to {}", path.display()))
}
