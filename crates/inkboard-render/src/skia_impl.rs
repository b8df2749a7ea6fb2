//! tiny-skia based renderer implementation.

use crate::pattern::{PatternPaint, build_pattern, pattern_color};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::sketch::sketch_strokes;
use inkboard_core::shapes::{Element, HexColor, Shape};
use kurbo::{Affine, BezPath, Circle, PathEl, Shape as KurboShape};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Convert a kurbo path to a tiny-skia path. Empty paths yield `None`.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Convert a kurbo affine to a tiny-skia transform.
fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn paint_for(color: HexColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64) -> Stroke {
    Stroke {
        width: width.max(0.0) as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// CPU renderer drawing into an RGBA pixmap at backing-store resolution.
#[derive(Default)]
pub struct SkiaRenderer {
    /// Surface of the last frame; reused while the size is unchanged.
    pixmap: Option<Pixmap>,
}

impl SkiaRenderer {
    /// Create a new renderer with no surface yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame, if any.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Surface size in physical pixels, `(0, 0)` before the first frame.
    pub fn size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |pixmap| (pixmap.width(), pixmap.height()))
    }

    /// Straight-alpha RGBA of one pixel in the last frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Straight-alpha RGBA bytes of the last frame (4 bytes per pixel).
    pub fn rgba_data(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        let mut data = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        data
    }

    /// Encode the last frame as PNG at its backing resolution.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidSize { width, height });
        }

        let data = self.rgba_data();
        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RendererError::Encode(e.to_string()))?;

        log::debug!("Encoded {width}x{height} PNG ({} bytes)", buf.len());
        Ok(buf)
    }

    /// Render one frame and encode it.
    pub fn render_png(&mut self, ctx: &RenderContext) -> RenderResult<Vec<u8>> {
        self.render_frame(ctx)?;
        self.encode_png()
    }

    /// Fetch a surface of the requested size, reusing the previous one.
    fn surface(&mut self, width: u32, height: u32) -> RenderResult<&mut Pixmap> {
        let reusable = self
            .pixmap
            .as_ref()
            .is_some_and(|pixmap| pixmap.width() == width && pixmap.height() == height);
        if !reusable {
            let pixmap = Pixmap::new(width, height)
                .ok_or(RendererError::InvalidSize { width, height })?;
            self.pixmap = Some(pixmap);
        }
        self.pixmap
            .as_mut()
            .ok_or(RendererError::InvalidSize { width, height })
    }
}

impl Renderer for SkiaRenderer {
    fn render_frame(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let (width, height) = ctx.surface_size();
        if width == 0 || height == 0 {
            log::warn!(
                "Refusing to render into an empty surface ({}x{} at {}x)",
                ctx.viewport_size.width,
                ctx.viewport_size.height,
                ctx.device_pixel_ratio
            );
            return Err(RendererError::InvalidSize { width, height });
        }

        let background = self.background_color(ctx);
        let camera = ctx.canvas.camera();
        let device_scale = Affine::scale(ctx.device_pixel_ratio);
        let world_transform = to_skia_transform(device_scale * camera.transform());

        let pixmap = self.surface(width, height)?;

        // Clear, then fill the logical viewport under the device scale
        pixmap.fill(Color::TRANSPARENT);
        if let Some(rect) = tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            ctx.viewport_size.width as f32,
            ctx.viewport_size.height as f32,
        ) {
            pixmap.fill_rect(rect, &paint_for(background), to_skia_transform(device_scale), None);
        }

        let visible = camera.visible_world_rect(ctx.viewport_size);
        if let Some(pattern) = build_pattern(ctx.pattern, visible, camera.zoom())
            && let Some(path) = to_skia_path(&pattern.path)
        {
            let paint = paint_for(pattern_color(background));
            match pattern.paint {
                PatternPaint::Stroke(width) => {
                    let stroke = Stroke {
                        width: width as f32,
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, world_transform, None);
                }
                PatternPaint::Fill => {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, world_transform, None);
                }
            }
        }

        for element in ctx.canvas.visible_elements() {
            draw_element(pixmap, element, world_transform);
        }
        if let Some(preview) = ctx.canvas.preview() {
            draw_element(pixmap, preview, world_transform);
        }

        log::trace!("Rendered frame {width}x{height}, revision {}", ctx.canvas.revision());
        Ok(())
    }
}

/// Draw one element in world coordinates.
fn draw_element(pixmap: &mut Pixmap, element: &Element, transform: Transform) {
    let paint = paint_for(element.color);
    let stroke = round_stroke(element.stroke_width);

    match &element.shape {
        Shape::Rectangle(_) | Shape::Ellipse(_) | Shape::Line(_) => {
            draw_sketchy(pixmap, &element.shape.to_path(), element.seed, &paint, &stroke, transform);
        }
        Shape::Arrow(arrow) => {
            draw_sketchy(pixmap, &element.shape.to_path(), element.seed, &paint, &stroke, transform);
            if let Some(head) = arrow.head_path(element.stroke_width).as_ref().and_then(to_skia_path) {
                pixmap.fill_path(&head, &paint, FillRule::Winding, transform, None);
            }
        }
        Shape::Freehand(freehand) => match freehand.points.as_slice() {
            [] => {}
            [point] => {
                let dot = Circle::new(*point, element.stroke_width.max(0.0) / 2.0).to_path(0.1);
                if let Some(path) = to_skia_path(&dot) {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
            _ => {
                if let Some(path) = to_skia_path(&element.shape.to_path()) {
                    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
                }
            }
        },
    }
}

fn draw_sketchy(
    pixmap: &mut Pixmap,
    path: &BezPath,
    seed: u32,
    paint: &Paint,
    stroke: &Stroke,
    transform: Transform,
) {
    for pass in sketch_strokes(path, seed) {
        if let Some(path) = to_skia_path(&pass) {
            pixmap.stroke_path(&path, paint, stroke, transform, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::Canvas;
    use inkboard_core::config::BackgroundPattern;
    use inkboard_core::shapes::{Arrow, Freehand, Rectangle};
    use kurbo::{Point, Size};

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn plain(canvas: &Canvas) -> RenderContext<'_> {
        RenderContext::new(canvas)
            .with_viewport_size(Size::new(200.0, 150.0))
            .with_pattern(BackgroundPattern::None)
    }

    fn painted_pixels(renderer: &SkiaRenderer) -> usize {
        renderer
            .rgba_data()
            .chunks_exact(4)
            .filter(|px| *px != WHITE)
            .count()
    }

    #[test]
    fn test_surface_is_backing_resolution() {
        let canvas = Canvas::new();
        let mut renderer = SkiaRenderer::new();
        renderer.render_frame(&plain(&canvas)).unwrap();
        assert_eq!(renderer.size(), (400, 300));
        assert_eq!(renderer.pixel(0, 0), Some(WHITE));
        assert_eq!(renderer.pixel(399, 299), Some(WHITE));
        assert_eq!(painted_pixels(&renderer), 0);
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let canvas = Canvas::new();
        let mut renderer = SkiaRenderer::new();
        let ctx = plain(&canvas).with_viewport_size(Size::new(0.0, 0.0));
        assert!(matches!(
            renderer.render_frame(&ctx),
            Err(RendererError::InvalidSize { width: 0, height: 0 })
        ));
        assert!(renderer.encode_png().is_err());
    }

    #[test]
    fn test_background_color() {
        let canvas = Canvas::new();
        let mut renderer = SkiaRenderer::new();
        let ctx = plain(&canvas).with_background(HexColor::rgb(10, 20, 30));
        renderer.render_frame(&ctx).unwrap();
        assert_eq!(renderer.pixel(5, 5), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_grid_pattern_draws_on_empty_scene() {
        let canvas = Canvas::new();
        let mut renderer = SkiaRenderer::new();
        let ctx = plain(&canvas).with_pattern(BackgroundPattern::Grid);
        renderer.render_frame(&ctx).unwrap();
        assert!(painted_pixels(&renderer) > 0);
    }

    #[test]
    fn test_elements_and_hidden_elements() {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(Element::new(
            Shape::Rectangle(Rectangle::new(20.0, 20.0, 60.0, 40.0)),
            HexColor::rgb(255, 0, 0),
            3.0,
        ));
        let mut renderer = SkiaRenderer::new();
        renderer.render_frame(&plain(&canvas)).unwrap();
        assert!(painted_pixels(&renderer) > 0);
        // Interior stays background
        assert_eq!(renderer.pixel(100, 80), Some(WHITE));

        canvas.set_visibility(id, false);
        renderer.render_frame(&plain(&canvas)).unwrap();
        assert_eq!(painted_pixels(&renderer), 0);
    }

    #[test]
    fn test_arrow_head_is_filled() {
        let mut canvas = Canvas::new();
        canvas.add_element(Element::new(
            Shape::Arrow(Arrow::new(Point::new(10.0, 50.0), Point::new(150.0, 50.0))),
            HexColor::black(),
            4.0,
        ));
        let mut renderer = SkiaRenderer::new();
        renderer.render_frame(&plain(&canvas)).unwrap();
        // Head spans back 12 units from the tip; its centroid is solid
        assert_eq!(renderer.pixel(2 * 142, 2 * 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_single_point_freehand_is_a_dot() {
        let mut canvas = Canvas::new();
        canvas.add_element(Element::new(
            Shape::Freehand(Freehand::new(Point::new(50.0, 50.0))),
            HexColor::black(),
            6.0,
        ));
        let mut renderer = SkiaRenderer::new();
        renderer.render_frame(&plain(&canvas)).unwrap();
        assert_eq!(renderer.pixel(100, 100), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_png_signature() {
        let canvas = Canvas::new();
        let mut renderer = SkiaRenderer::new();
        let png = renderer.render_png(&plain(&canvas)).unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
