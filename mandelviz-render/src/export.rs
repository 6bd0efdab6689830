//! PNG export with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::buffer::FrameImage;

/// Metadata to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    /// Complex bounds in the `x_min, x_max, y_min, y_max` text form.
    pub bounds: String,
    pub max_iterations: u32,
    pub colormap: String,
    pub resolution: String,
}

/// Write a rendered frame as a PNG file with embedded view metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool, IrfanView, XnView, etc., so a saved image carries enough
/// information to reproduce the view it shows.
pub fn export_png(
    image: &FrameImage,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Mandelviz".to_string())?;
    encoder.add_text_chunk(
        "Description".to_string(),
        format!(
            "Mandelbrot set - Bounds: [{}], Iterations: {}, Colormap: {}",
            metadata.bounds, metadata.max_iterations, metadata.colormap,
        ),
    )?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&image.pixels)?;

    debug!(
        "Exported PNG {}x{} to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    vec![
        ("Mandelviz.Bounds".into(), meta.bounds.clone()),
        (
            "Mandelviz.MaxIterations".into(),
            meta.max_iterations.to_string(),
        ),
        ("Mandelviz.Colormap".into(), meta.colormap.clone()),
        ("Mandelviz.Resolution".into(), meta.resolution.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use mandelviz_core::GridSize;

    fn sample_metadata() -> ExportMetadata {
        ExportMetadata {
            bounds: "-2, 0.5, -1, 1".into(),
            max_iterations: 100,
            colormap: "viridis".into(),
            resolution: "30x45".into(),
        }
    }

    #[test]
    fn export_creates_valid_png() {
        let image = FrameImage::new(GridSize::new(4, 6).unwrap());
        let dir = std::env::temp_dir().join("mandelviz_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&image, &path, &sample_metadata()).expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let image = FrameImage::new(GridSize::new(2, 3).unwrap());
        let dir = std::env::temp_dir().join("mandelviz_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        export_png(&image, &path, &sample_metadata()).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let reader = decoder.read_info().expect("should read info");
        let info = reader.info();
        let texts: Vec<_> = info.uncompressed_latin1_text.iter().collect();
        assert!(
            texts
                .iter()
                .any(|t| t.keyword == "Software" && t.text == "Mandelviz"),
            "Should contain Software text chunk"
        );
        assert!(
            texts
                .iter()
                .any(|t| t.keyword == "Mandelviz.Bounds" && t.text == "-2, 0.5, -1, 1"),
            "Should contain bounds chunk"
        );
        assert!(
            texts
                .iter()
                .any(|t| t.keyword == "Mandelviz.Colormap" && t.text == "viridis"),
            "Should contain colormap chunk"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
