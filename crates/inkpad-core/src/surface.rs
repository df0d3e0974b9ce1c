//! Raster drawing surface backed by a tiny-skia pixmap.

use crate::brush::{self, BrushConfig, CapShape};
use crate::color::Rgba;
use kurbo::Point;
use std::fmt;
use thiserror::Error;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Segments shorter than this are drawn as a single dot.
const DOT_EPSILON: f64 = 1e-6;

/// Surface errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },
    #[error("Snapshot is {found:?} but surface is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// An owned copy of a surface's pixels at one point in time.
///
/// Pixels are stored premultiplied, exactly as the surface keeps them, so a
/// restore is a straight copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size of the pixel data in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

pub(crate) fn validate_dimensions(width: i64, height: i64) -> SurfaceResult<(u32, u32)> {
    let invalid = || SurfaceError::InvalidDimension { width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid());
    }
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    Ok((w, h))
}

fn blank_pixmap(width: i64, height: i64, background: Rgba) -> SurfaceResult<Pixmap> {
    let (w, h) = validate_dimensions(width, height)?;
    let mut pixmap = Pixmap::new(w, h).ok_or(SurfaceError::InvalidDimension { width, height })?;
    pixmap.fill(background.to_skia());
    Ok(pixmap)
}

/// The live raster buffer strokes are composited onto.
pub struct Surface {
    pixmap: Pixmap,
    background: Rgba,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .finish()
    }
}

impl Surface {
    /// Create a surface cleared to `background`.
    pub fn new(width: i64, height: i64, background: Rgba) -> SurfaceResult<Self> {
        let pixmap = blank_pixmap(width, height, background)?;
        Ok(Self { pixmap, background })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Reallocate at a new size and clear to the background.
    ///
    /// Returns a snapshot of the new blank buffer. On error nothing changes.
    pub fn resize(&mut self, width: i64, height: i64) -> SurfaceResult<Snapshot> {
        self.pixmap = blank_pixmap(width, height, self.background)?;
        log::info!("Surface resized to {}x{}", self.width(), self.height());
        Ok(self.read_all())
    }

    /// Fill the whole surface with the background color.
    pub fn clear(&mut self) {
        self.pixmap.fill(self.background.to_skia());
    }

    /// Draw one segment of a stroke.
    pub fn composite_segment(&mut self, from: Point, to: Point, config: &BrushConfig) {
        let paint = brush::resolve_paint(config, self.background, self.width(), self.height());
        let width = config.width as f32;

        if (to - from).hypot() < DOT_EPSILON {
            self.composite_dot(to, config.cap, width, &paint);
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: config.cap.to_line_cap(),
            dash: brush::resolve_pattern(config.pattern, config.width)
                .and_then(|d| d.to_stroke_dash()),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// A zero-length segment: the cap alone. Butt caps leave no mark.
    fn composite_dot(&mut self, center: Point, cap: CapShape, width: f32, paint: &Paint<'_>) {
        let radius = width / 2.0;
        let (cx, cy) = (center.x as f32, center.y as f32);
        match cap {
            CapShape::Round => {
                if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
                    self.pixmap
                        .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            CapShape::Square => {
                if let Some(rect) = Rect::from_xywh(cx - radius, cy - radius, width, width) {
                    self.pixmap.fill_rect(rect, paint, Transform::identity(), None);
                }
            }
            CapShape::Butt => {}
        }
    }

    /// Copy the full pixel buffer.
    pub fn read_all(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data().to_vec(),
        }
    }

    /// Replace the full pixel buffer. The snapshot must match the current size.
    pub fn write_all(&mut self, snapshot: &Snapshot) -> SurfaceResult<()> {
        if snapshot.size() != self.size() {
            return Err(SurfaceError::DimensionMismatch {
                expected: self.size(),
                found: snapshot.size(),
            });
        }
        self.pixmap.data_mut().copy_from_slice(&snapshot.data);
        Ok(())
    }

    /// Demultiplied color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| Rgba::from(p.demultiply()))
    }

    /// Demultiplied RGBA8 rows, top to bottom, for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Packed `0x00RRGGBB` words, composited over the background, for window
    /// framebuffers that ignore alpha.
    pub fn to_0rgb(&self) -> Vec<u32> {
        let bg = self.background;
        self.pixmap
            .pixels()
            .iter()
            .map(|pixel| {
                let c = Rgba::from(pixel.demultiply());
                if c.a == 255 {
                    return c.to_0rgb();
                }
                let blend = |fg: u8, back: u8| {
                    let a = u32::from(c.a);
                    ((u32::from(fg) * a + u32::from(back) * (255 - a) + 127) / 255) as u8
                };
                Rgba::rgb(blend(c.r, bg.r), blend(c.g, bg.g), blend(c.b, bg.b)).to_0rgb()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushColor, BrushMode, LinePattern};
    use crate::color::GradientDescriptor;

    fn black_brush(width: f64) -> BrushConfig {
        BrushConfig::new(width, Rgba::BLACK).unwrap()
    }

    #[test]
    fn test_new_surface_is_background() {
        let surface = Surface::new(10, 8, Rgba::WHITE).unwrap();
        assert_eq!(surface.size(), (10, 8));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(9, 7), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(10, 0), None);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Surface::new(0, 10, Rgba::WHITE).unwrap_err(),
            SurfaceError::InvalidDimension { width: 0, height: 10 }
        );
        assert!(Surface::new(10, -1, Rgba::WHITE).is_err());
        assert!(Surface::new(i64::from(u32::MAX) + 1, 1, Rgba::WHITE).is_err());
    }

    #[test]
    fn test_resize_clears_and_keeps_on_error() {
        let mut surface = Surface::new(20, 20, Rgba::WHITE).unwrap();
        surface.composite_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), &black_brush(4.0));
        let drawn = surface.read_all();

        assert!(surface.resize(0, 5).is_err());
        assert_eq!(surface.read_all(), drawn);

        let blank = surface.resize(30, 12).unwrap();
        assert_eq!(blank.size(), (30, 12));
        assert_eq!(surface.size(), (30, 12));
        assert_eq!(surface.pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_vertical_stroke_pixels() {
        let mut surface = Surface::new(100, 100, Rgba::WHITE).unwrap();
        surface.composite_segment(
            Point::new(10.0, 10.0),
            Point::new(10.0, 50.0),
            &black_brush(4.0),
        );

        assert_eq!(surface.pixel(10, 30), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(9, 30), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(20, 30), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(10, 70), Some(Rgba::WHITE));
    }

    #[test]
    fn test_dashed_segment_gaps() {
        let mut surface = Surface::new(100, 100, Rgba::WHITE).unwrap();
        let config = black_brush(4.0)
            .with_cap(CapShape::Butt)
            .with_pattern(LinePattern::Dashed);
        surface.composite_segment(Point::new(0.0, 50.0), Point::new(100.0, 50.0), &config);

        // 16 on, 4 off
        assert_eq!(surface.pixel(8, 50), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(17, 50), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(25, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_dotted_segment_gaps() {
        let mut surface = Surface::new(100, 100, Rgba::WHITE).unwrap();
        let config = black_brush(4.0)
            .with_cap(CapShape::Butt)
            .with_pattern(LinePattern::Dotted);
        surface.composite_segment(Point::new(0.0, 50.0), Point::new(100.0, 50.0), &config);

        // 8 on, 8 off
        assert_eq!(surface.pixel(4, 50), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(12, 50), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(20, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_zero_length_segment_dot() {
        let mut surface = Surface::new(40, 40, Rgba::WHITE).unwrap();
        let p = Point::new(20.0, 20.0);

        surface.composite_segment(p, p, &black_brush(10.0).with_cap(CapShape::Butt));
        assert_eq!(surface.pixel(20, 20), Some(Rgba::WHITE));

        surface.composite_segment(p, p, &black_brush(10.0));
        assert_eq!(surface.pixel(20, 20), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(30, 30), Some(Rgba::WHITE));

        let q = Point::new(8.0, 8.0);
        surface.composite_segment(q, q, &black_brush(6.0).with_cap(CapShape::Square));
        // square dot reaches the corners a round dot would miss
        assert_eq!(surface.pixel(5, 5), Some(Rgba::BLACK));
    }

    #[test]
    fn test_erase_restores_background() {
        let mut surface = Surface::new(50, 50, Rgba::WHITE).unwrap();
        surface.composite_segment(Point::new(5.0, 25.0), Point::new(45.0, 25.0), &black_brush(4.0));
        assert_eq!(surface.pixel(25, 25), Some(Rgba::BLACK));

        let eraser = BrushConfig::new(8.0, Rgba::rgb(255, 0, 0))
            .unwrap()
            .with_mode(BrushMode::Erase);
        surface.composite_segment(Point::new(5.0, 25.0), Point::new(45.0, 25.0), &eraser);
        assert_eq!(surface.pixel(25, 25), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(25, 24), Some(Rgba::WHITE));
    }

    #[test]
    fn test_erase_on_transparent_background() {
        let mut surface = Surface::new(30, 30, Rgba::TRANSPARENT).unwrap();
        surface.composite_segment(Point::new(2.0, 15.0), Point::new(28.0, 15.0), &black_brush(4.0));
        let eraser = black_brush(8.0).with_mode(BrushMode::Erase);
        surface.composite_segment(Point::new(2.0, 15.0), Point::new(28.0, 15.0), &eraser);
        assert_eq!(surface.pixel(15, 15).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_gradient_depends_on_position() {
        let mut surface = Surface::new(100, 100, Rgba::WHITE).unwrap();
        let config =
            black_brush(6.0).with_color(BrushColor::Gradient(GradientDescriptor::rgb_ramp()));

        surface.composite_segment(Point::new(3.0, 5.0), Point::new(7.0, 5.0), &config);
        surface.composite_segment(Point::new(93.0, 95.0), Point::new(97.0, 95.0), &config);

        let near_origin = surface.pixel(5, 5).unwrap();
        let near_corner = surface.pixel(95, 95).unwrap();
        assert!(near_origin.r > near_origin.g && near_origin.r > near_origin.b);
        assert!(near_corner.b > near_corner.r && near_corner.b > near_corner.g);
    }

    #[test]
    fn test_write_all_dimension_mismatch() {
        let small = Surface::new(4, 4, Rgba::WHITE).unwrap().read_all();
        let mut surface = Surface::new(5, 4, Rgba::BLACK).unwrap();
        let before = surface.read_all();

        assert_eq!(
            surface.write_all(&small),
            Err(SurfaceError::DimensionMismatch {
                expected: (5, 4),
                found: (4, 4)
            })
        );
        assert_eq!(surface.read_all(), before);
    }

    #[test]
    fn test_read_write_roundtrip() {
        let mut surface = Surface::new(16, 16, Rgba::WHITE).unwrap();
        let blank = surface.read_all();
        assert_eq!(blank.byte_len(), 16 * 16 * 4);
        surface.composite_segment(Point::new(0.0, 8.0), Point::new(16.0, 8.0), &black_brush(2.0));
        assert_ne!(surface.read_all(), blank);

        surface.write_all(&blank).unwrap();
        assert_eq!(surface.read_all(), blank);
    }

    #[test]
    fn test_pixel_format_conversions() {
        let surface = Surface::new(2, 1, Rgba::rgb(0x10, 0x20, 0x30)).unwrap();
        assert_eq!(surface.to_rgba8(), vec![0x10, 0x20, 0x30, 0xFF, 0x10, 0x20, 0x30, 0xFF]);
        assert_eq!(surface.to_0rgb(), vec![0x0010_2030, 0x0010_2030]);
    }
}
