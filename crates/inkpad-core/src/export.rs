//! PNG export of the drawing surface.

use crate::surface::Surface;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default file name offered for downloads.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "painting.png";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding error: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Encode the surface as an RGBA8 PNG.
pub fn encode_png(surface: &Surface) -> ExportResult<Vec<u8>> {
    encode_rgba(&surface.to_rgba8(), surface.width(), surface.height())
}

/// Encode RGBA pixel data to PNG bytes.
fn encode_rgba(rgba_data: &[u8], width: u32, height: u32) -> ExportResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Encode(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| ExportError::Encode(format!("Failed to write PNG data: {}", e)))?;
    }
    Ok(png_data)
}

/// Encode the surface and write it to `path`.
pub fn write_png(surface: &Surface, path: &Path) -> ExportResult<()> {
    let png_data = encode_png(surface)?;
    fs::write(path, &png_data)
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Exported PNG to {} ({} bytes)", path.display(), png_data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_png_header_and_pixels() {
        let surface = Surface::new(3, 2, Rgba::rgb(10, 20, 30)).unwrap();
        let bytes = encode_png(&surface).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&pixels[..4], &[10, 20, 30, 255]);
        assert_eq!(pixels.len(), 3 * 2 * 4);
    }

    #[test]
    fn test_write_png_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE_NAME);
        let surface = Surface::new(4, 4, Rgba::WHITE).unwrap();

        write_png(&surface, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_write_png_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let surface = Surface::new(4, 4, Rgba::WHITE).unwrap();
        assert!(matches!(write_png(&surface, &path), Err(ExportError::Io(_))));
    }
}
