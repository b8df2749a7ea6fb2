use inkboard_core::shapes::{Ellipse, Line, Rectangle};
use inkboard_core::{
    BackgroundPattern, Canvas, Element, HexColor, Modifiers, MouseButton, PointerEvent, Shape,
    ToolKind,
};
use inkboard_render::{RenderContext, Renderer, SkiaRenderer};
use kurbo::{Point, Size};

fn scene_with_seed(seed: u32) -> Canvas {
    let mut canvas = Canvas::new();
    let color = HexColor::rgb(0x1e, 0x1e, 0x1e);
    canvas.add_element(Element::with_seed(
        Shape::Rectangle(Rectangle::new(30.0, 30.0, 120.0, 80.0)),
        color,
        2.0,
        seed,
    ));
    canvas.add_element(Element::with_seed(
        Shape::Ellipse(Ellipse::new(160.0, 40.0, 60.0, 90.0)),
        color,
        2.0,
        seed.wrapping_add(1),
    ));
    canvas.add_element(Element::with_seed(
        Shape::Line(Line::new(Point::new(20.0, 200.0), Point::new(260.0, 180.0))),
        color,
        2.0,
        seed.wrapping_add(2),
    ));
    canvas
}

fn render(canvas: &Canvas) -> Vec<u8> {
    let mut renderer = SkiaRenderer::new();
    let ctx = RenderContext::new(canvas).with_viewport_size(Size::new(300.0, 240.0));
    renderer.render_frame(&ctx).unwrap();
    renderer.rgba_data()
}

#[test]
fn test_redraw_is_pixel_identical() {
    let canvas = scene_with_seed(1234);
    let mut renderer = SkiaRenderer::new();
    let ctx = RenderContext::new(&canvas).with_viewport_size(Size::new(300.0, 240.0));
    renderer.render_frame(&ctx).unwrap();
    let first = renderer.rgba_data();
    for _ in 0..3 {
        renderer.render_frame(&ctx).unwrap();
        assert_eq!(renderer.rgba_data(), first);
    }
}

#[test]
fn test_same_seed_same_pixels_across_canvases() {
    assert_eq!(render(&scene_with_seed(99)), render(&scene_with_seed(99)));
}

#[test]
fn test_different_seed_changes_strokes() {
    assert_ne!(render(&scene_with_seed(99)), render(&scene_with_seed(100)));
}

#[test]
fn test_json_round_trip_renders_identically() {
    let canvas = scene_with_seed(4242);
    let json = canvas.export_scene(inkboard_core::ExportFormat::Json).unwrap();
    let mut restored = Canvas::new();
    restored.import_json(&json).unwrap();
    assert_eq!(render(&canvas), render(&restored));
}

#[test]
fn test_preview_is_drawn_but_not_committed() {
    let mut canvas = Canvas::new();
    canvas.set_viewport_size(300.0, 240.0);
    let empty = render(&canvas);

    canvas.set_tool(ToolKind::Rectangle);
    canvas.handle_pointer_event(PointerEvent::Down {
        position: Point::new(20.0, 20.0),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
    canvas.handle_pointer_event(PointerEvent::Move {
        position: Point::new(120.0, 100.0),
    });
    assert!(canvas.elements().is_empty());
    assert_ne!(render(&canvas), empty);
}

#[test]
fn test_pan_shifts_content() {
    let mut canvas = Canvas::with_config(inkboard_core::CanvasConfig {
        pattern: BackgroundPattern::None,
        ..Default::default()
    });
    canvas.add_element(Element::new(
        Shape::Ellipse(Ellipse::new(40.0, 40.0, 20.0, 20.0)),
        HexColor::black(),
        30.0,
    ));
    let mut renderer = SkiaRenderer::new();
    let size = Size::new(200.0, 200.0);

    renderer
        .render_frame(&RenderContext::new(&canvas).with_viewport_size(size))
        .unwrap();
    // Ellipse center (50, 50) lies inside the 30-unit stroke ring
    assert_eq!(renderer.pixel(100, 100), Some([0, 0, 0, 255]));
    assert_eq!(renderer.pixel(300, 300), Some([255, 255, 255, 255]));

    canvas.pan(100.0, 100.0);
    renderer
        .render_frame(&RenderContext::new(&canvas).with_viewport_size(size))
        .unwrap();
    assert_eq!(renderer.pixel(100, 100), Some([255, 255, 255, 255]));
    assert_eq!(renderer.pixel(300, 300), Some([0, 0, 0, 255]));
}
