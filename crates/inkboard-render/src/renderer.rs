//! Renderer trait abstraction.

use inkboard_core::canvas::Canvas;
use inkboard_core::config::BackgroundPattern;
use inkboard_core::shapes::HexColor;
use kurbo::Size;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in logical (client) pixels.
    pub viewport_size: Size,
    /// Backing pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Background color.
    pub background: HexColor,
    /// Background pattern drawn under the elements.
    pub pattern: BackgroundPattern,
}

impl<'a> RenderContext<'a> {
    /// Create a render context from the canvas viewport and configuration.
    pub fn new(canvas: &'a Canvas) -> Self {
        let config = canvas.config();
        Self {
            canvas,
            viewport_size: canvas.viewport_size(),
            device_pixel_ratio: canvas.camera().device_pixel_ratio(),
            background: config.background,
            pattern: config.pattern,
        }
    }

    /// Override the viewport size.
    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the device pixel ratio for HiDPI.
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: HexColor) -> Self {
        self.background = color;
        self
    }

    /// Set the background pattern.
    pub fn with_pattern(mut self, pattern: BackgroundPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Backing surface size in whole physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        let scale = |v: f64| {
            let scaled = (v * self.device_pixel_ratio).round();
            if scaled.is_finite() && scaled > 0.0 {
                scaled.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        (scale(self.viewport_size.width), scale(self.viewport_size.height))
    }
}

/// Trait for rendering backends.
///
/// A frame is always derived in full from the current canvas state.
pub trait Renderer: Send + Sync {
    /// Draw one complete frame.
    fn render_frame(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> HexColor {
        ctx.background
    }
}
