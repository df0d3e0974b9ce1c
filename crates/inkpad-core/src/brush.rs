//! Brush configuration and the per-segment stroke engine.

use crate::color::{GradientDescriptor, Rgba};
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_skia::{
    BlendMode, LineCap, LinearGradient, Paint, Shader, SpreadMode, StrokeDash, Transform,
};

/// Brush errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrushError {
    #[error("Brush width must be a positive finite number, got {0}")]
    InvalidBrushWidth(f64),
}

/// Result type for brush operations.
pub type BrushResult<T> = Result<T, BrushError>;

/// Shape drawn at the ends of each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapShape {
    #[default]
    Round,
    Square,
    Butt,
}

impl CapShape {
    /// Cycle to the next cap shape.
    pub fn next(self) -> Self {
        match self {
            CapShape::Round => CapShape::Square,
            CapShape::Square => CapShape::Butt,
            CapShape::Butt => CapShape::Round,
        }
    }

    pub fn to_line_cap(self) -> LineCap {
        match self {
            CapShape::Round => LineCap::Round,
            CapShape::Square => LineCap::Square,
            CapShape::Butt => LineCap::Butt,
        }
    }
}

/// Line pattern along a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LinePattern {
    /// Cycle to the next pattern.
    pub fn next(self) -> Self {
        match self {
            LinePattern::Solid => LinePattern::Dashed,
            LinePattern::Dashed => LinePattern::Dotted,
            LinePattern::Dotted => LinePattern::Solid,
        }
    }
}

/// Whether the brush paints or erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushMode {
    #[default]
    Draw,
    Erase,
}

/// Paint source of the brush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrushColor {
    Solid(Rgba),
    Gradient(GradientDescriptor),
}

impl Default for BrushColor {
    fn default() -> Self {
        BrushColor::Solid(Rgba::BLACK)
    }
}

/// Everything needed to composite one segment.
///
/// Passed by value into every composite call; nothing here is cached across
/// calls, so a change made between two pointer moves applies to the very next
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Stroke width in surface pixels.
    pub width: f64,
    pub cap: CapShape,
    pub color: BrushColor,
    pub pattern: LinePattern,
    pub mode: BrushMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            width: 5.0,
            cap: CapShape::default(),
            color: BrushColor::default(),
            pattern: LinePattern::default(),
            mode: BrushMode::default(),
        }
    }
}

impl BrushConfig {
    /// Create a solid-color drawing brush.
    pub fn new(width: f64, color: Rgba) -> BrushResult<Self> {
        let config = Self {
            width,
            color: BrushColor::Solid(color),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BrushResult<()> {
        if self.width.is_finite() && self.width > 0.0 {
            Ok(())
        } else {
            Err(BrushError::InvalidBrushWidth(self.width))
        }
    }

    pub fn with_width(mut self, width: f64) -> BrushResult<Self> {
        self.width = width;
        self.validate()?;
        Ok(self)
    }

    pub fn with_cap(mut self, cap: CapShape) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_color(mut self, color: BrushColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_mode(mut self, mode: BrushMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_erasing(&self) -> bool {
        self.mode == BrushMode::Erase
    }
}

/// On/off lengths of a dash pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
}

impl DashPattern {
    /// Dash starting at phase zero, so every segment begins "on".
    pub fn to_stroke_dash(self) -> Option<StrokeDash> {
        StrokeDash::new(vec![self.on as f32, self.off as f32], 0.0)
    }
}

/// Resolve a line pattern at a given width. `None` means a continuous line.
pub fn resolve_pattern(pattern: LinePattern, width: f64) -> Option<DashPattern> {
    match pattern {
        LinePattern::Solid => None,
        LinePattern::Dotted => Some(DashPattern {
            on: 2.0 * width,
            off: 2.0 * width,
        }),
        LinePattern::Dashed => Some(DashPattern {
            on: 4.0 * width,
            off: width,
        }),
    }
}

/// Build the paint for one segment on a surface of the given size.
///
/// Erasing replaces pixels with `background` outright, so it also works on
/// a transparent background.
pub fn resolve_paint(
    config: &BrushConfig,
    background: Rgba,
    width: u32,
    height: u32,
) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };

    if config.is_erasing() {
        paint.set_color(background.to_skia());
        paint.blend_mode = BlendMode::Source;
        return paint;
    }

    match &config.color {
        BrushColor::Solid(color) => paint.set_color(color.to_skia()),
        BrushColor::Gradient(gradient) => paint.shader = gradient_shader(gradient, width, height),
    }
    paint
}

fn gradient_shader(gradient: &GradientDescriptor, width: u32, height: u32) -> Shader<'static> {
    let stops = gradient.to_skia_stops();
    LinearGradient::new(
        tiny_skia::Point::from_xy(0.0, 0.0),
        tiny_skia::Point::from_xy(width as f32, height as f32),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .unwrap_or_else(|| Shader::SolidColor(gradient.fallback_color().to_skia()))
}

/// Per-stroke state: the last point composited, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeState {
    last_point: Option<Point>,
    segments: usize,
}

impl StrokeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Number of composites issued so far, including the initial dot.
    pub fn segments(&self) -> usize {
        self.segments
    }
}

/// Composite the next piece of a stroke and advance `state` to `point`.
///
/// The first point of a stroke composites a zero-length segment, which shows
/// up as a dot for round and square caps.
pub fn extend_stroke(
    surface: &mut Surface,
    state: &mut StrokeState,
    point: Point,
    config: &BrushConfig,
) {
    let from = state.last_point.unwrap_or(point);
    surface.composite_segment(from, point, config);
    state.last_point = Some(point);
    state.segments += 1;
}
