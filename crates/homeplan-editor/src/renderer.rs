//! Deterministic scene renderer.
//!
//! Renders the editor's scene to an image buffer using tiny-skia, in a
//! fixed painter order: background, grid, objects in insertion order
//! (filtered by the active layer), selection indicators, wifi heatmap,
//! and the in-progress polygon preview. Rendering never mutates the
//! scene, so repeated renders of the same state produce identical
//! images.

use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Scale};
use tiny_skia::{
    Color, FillRule, GradientStop, Paint, PathBuilder, Pixmap, RadialGradient, SpreadMode, Stroke,
    StrokeDash, Transform,
};
use tracing::trace;

use homeplan_core::constants::{
    HANDLE_DRAW_SIZE, HEATMAP_RADIUS, MARKER_RADIUS, SELECTED_MARKER_RING_RADIUS,
};
use homeplan_core::geometry::rotated_bounding_box;

use crate::editor::FloorPlanEditor;
use crate::font::label_font;
use crate::interaction::handles;
use crate::scene::{RectObject, SceneObject};

const LABEL_SIZE: f32 = 12.0;

fn outline_color() -> Color {
    Color::from_rgba8(0x33, 0x41, 0x55, 255)
}
fn opening_outline_color() -> Color {
    Color::from_rgba8(0x47, 0x55, 0x69, 255)
}
fn poly_stroke_color() -> Color {
    Color::from_rgba8(0x64, 0x74, 0x8b, 255)
}
fn marker_color() -> Color {
    Color::from_rgba8(0x0e, 0xa5, 0xe9, 255)
}
fn selection_color() -> Color {
    Color::from_rgba8(0x25, 0x63, 0xeb, 255)
}
fn label_color() -> Color {
    Color::from_rgba8(0x1f, 0x29, 0x37, 255)
}

/// Parses a CSS-style color: `#rgb`, `#rrggbb`, or `rgba(r, g, b, a)`
/// with `a` in `0.0..=1.0`. Returns `None` for anything else.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in hex.chars().enumerate() {
                    let v = ch.to_digit(16)? as u8;
                    c[i] = v * 16 + v;
                }
                Some(Color::from_rgba8(c[0], c[1], c[2], 255))
            }
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Color::from_rgba8(
                    (v >> 16) as u8,
                    (v >> 8) as u8,
                    v as u8,
                    255,
                ))
            }
            _ => None,
        };
    }
    if let Some(body) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return None;
        }
        let r: u8 = parts[0].parse().ok()?;
        let g: u8 = parts[1].parse().ok()?;
        let b: u8 = parts[2].parse().ok()?;
        let a: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        return Some(Color::from_rgba8(r, g, b, (a * 255.0).round() as u8));
    }
    None
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn thin_stroke(scale: f32) -> Stroke {
    Stroke {
        width: 1.0 / scale,
        ..Default::default()
    }
}

fn dashed_stroke(scale: f32) -> Stroke {
    Stroke {
        width: 1.0 / scale,
        dash: StrokeDash::new(vec![6.0 / scale, 4.0 / scale], 0.0),
        ..Default::default()
    }
}

/// Renders the editor state to an RGB image of the given size.
pub fn render(editor: &FloorPlanEditor, width: u32, height: u32) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(Color::WHITE);

    let state = editor.state();
    let scale = state.view.scale as f32;
    let transform =
        Transform::from_scale(scale, scale).post_translate(state.view.ox as f32, state.view.oy as f32);

    draw_grid(&mut pixmap, editor, width, height, transform, scale);

    let layer = state.layer.as_str();
    for object in editor.scene().objects() {
        if !object.visible_on(layer) {
            continue;
        }
        match object {
            SceneObject::Marker(m) => {
                let path = PathBuilder::from_circle(m.x as f32, m.y as f32, MARKER_RADIUS as f32);
                if let Some(p) = path {
                    pixmap.fill_path(
                        &p,
                        &solid_paint(marker_color()),
                        FillRule::Winding,
                        transform,
                        None,
                    );
                }
                draw_label(
                    &mut pixmap,
                    &m.kind,
                    m.x + MARKER_RADIUS + 4.0,
                    m.y - MARKER_RADIUS,
                    state.view,
                    width,
                    height,
                );
            }
            SceneObject::PolyRoom(poly) => {
                let mut pb = PathBuilder::new();
                for (i, p) in poly.points.iter().enumerate() {
                    if i == 0 {
                        pb.move_to(p.x as f32, p.y as f32);
                    } else {
                        pb.line_to(p.x as f32, p.y as f32);
                    }
                }
                pb.close();
                if let Some(path) = pb.finish() {
                    let fill = parse_color(&poly.color)
                        .unwrap_or_else(|| Color::from_rgba8(0xdb, 0xea, 0xfe, 153));
                    pixmap.fill_path(&path, &solid_paint(fill), FillRule::Winding, transform, None);
                    pixmap.stroke_path(
                        &path,
                        &solid_paint(poly_stroke_color()),
                        &thin_stroke(scale),
                        transform,
                        None,
                    );
                }
                if let Some(bounds) = poly.bounds() {
                    let c = bounds.center();
                    draw_label(&mut pixmap, &poly.name, c.x, c.y, state.view, width, height);
                }
            }
            SceneObject::Room(r)
            | SceneObject::Furniture(r)
            | SceneObject::Custom(r)
            | SceneObject::Door(r)
            | SceneObject::Window(r) => {
                let stroke = if object.kind().is_opening() {
                    opening_outline_color()
                } else {
                    outline_color()
                };
                draw_rect_object(&mut pixmap, r, stroke, transform, scale);
                let c = r.center();
                draw_label(&mut pixmap, &r.name, c.x, c.y, state.view, width, height);
            }
        }
    }

    if let Some(index) = editor.scene().selected() {
        if let Some(object) = editor.scene().get(index) {
            if object.visible_on(layer) {
                draw_selection(&mut pixmap, object, transform, scale);
            }
        }
    }

    if state.heatmap {
        draw_heatmap(&mut pixmap, editor, transform);
    }

    if let Some(poly) = &state.poly {
        draw_poly_preview(&mut pixmap, poly, transform, scale);
    }

    trace!(width, height, objects = editor.scene().len(), "rendered scene");

    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

fn draw_grid(
    pixmap: &mut Pixmap,
    editor: &FloorPlanEditor,
    width: u32,
    height: u32,
    transform: Transform,
    scale: f32,
) {
    let grid = editor.options().grid.size;
    if grid <= 0.0 {
        return;
    }
    let color = parse_color(&editor.options().grid.color)
        .unwrap_or_else(|| Color::from_rgba8(0xee, 0xee, 0xee, 255));
    let mut paint = solid_paint(color);
    paint.anti_alias = false;

    let view = editor.state().view;
    // Visible world region.
    let min = view.screen_to_world(homeplan_core::geometry::Point::new(0.0, 0.0));
    let max = view.screen_to_world(homeplan_core::geometry::Point::new(
        width as f64,
        height as f64,
    ));

    let mut pb = PathBuilder::new();
    let mut x = (min.x / grid).floor() * grid;
    while x <= max.x {
        pb.move_to(x as f32, min.y as f32);
        pb.line_to(x as f32, max.y as f32);
        x += grid;
    }
    let mut y = (min.y / grid).floor() * grid;
    while y <= max.y {
        pb.move_to(min.x as f32, y as f32);
        pb.line_to(max.x as f32, y as f32);
        y += grid;
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &thin_stroke(scale), transform, None);
    }
}

fn draw_rect_object(
    pixmap: &mut Pixmap,
    r: &RectObject,
    stroke_color: Color,
    transform: Transform,
    scale: f32,
) {
    let Some(rect) =
        tiny_skia::Rect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
    else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let rotated = rotation_at_center(r).post_concat(transform);

    let fill = parse_color(&r.color).unwrap_or_else(|| Color::from_rgba8(0xdb, 0xea, 0xfe, 255));
    pixmap.fill_path(&path, &solid_paint(fill), FillRule::Winding, rotated, None);
    pixmap.stroke_path(
        &path,
        &solid_paint(stroke_color),
        &thin_stroke(scale),
        rotated,
        None,
    );
}

fn rotation_at_center(r: &RectObject) -> Transform {
    let c = r.center();
    Transform::from_rotate_at(r.angle as f32, c.x as f32, c.y as f32)
}

fn draw_heatmap(pixmap: &mut Pixmap, editor: &FloorPlanEditor, transform: Transform) {
    for object in editor.scene().objects() {
        let SceneObject::Marker(m) = object else {
            continue;
        };
        if m.kind != "wifi" {
            continue;
        }
        let center = tiny_skia::Point::from_xy(m.x as f32, m.y as f32);
        let Some(shader) = RadialGradient::new(
            center,
            center,
            HEATMAP_RADIUS as f32,
            vec![
                GradientStop::new(0.0, Color::from_rgba8(0x0e, 0xa5, 0xe9, 89)),
                GradientStop::new(1.0, Color::from_rgba8(0x0e, 0xa5, 0xe9, 0)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            continue;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        if let Some(circle) =
            PathBuilder::from_circle(m.x as f32, m.y as f32, HEATMAP_RADIUS as f32)
        {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, transform, None);
        }
    }
}

fn draw_selection(pixmap: &mut Pixmap, object: &SceneObject, transform: Transform, scale: f32) {
    let paint = solid_paint(selection_color());
    match object {
        SceneObject::Marker(m) => {
            if let Some(ring) = PathBuilder::from_circle(
                m.x as f32,
                m.y as f32,
                SELECTED_MARKER_RING_RADIUS as f32,
            ) {
                pixmap.stroke_path(&ring, &paint, &dashed_stroke(scale), transform, None);
            }
        }
        SceneObject::PolyRoom(poly) => {
            let mut pb = PathBuilder::new();
            for (i, p) in poly.points.iter().enumerate() {
                if i == 0 {
                    pb.move_to(p.x as f32, p.y as f32);
                } else {
                    pb.line_to(p.x as f32, p.y as f32);
                }
            }
            pb.close();
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &dashed_stroke(scale), transform, None);
            }
        }
        SceneObject::Room(r)
        | SceneObject::Furniture(r)
        | SceneObject::Custom(r)
        | SceneObject::Door(r)
        | SceneObject::Window(r) => {
            let bbox = rotated_bounding_box(r.rect(), r.angle);
            // Outline sits two units outside the bounding box.
            if let Some(outline) = tiny_skia::Rect::from_xywh(
                (bbox.x - 2.0) as f32,
                (bbox.y - 2.0) as f32,
                (bbox.w + 4.0) as f32,
                (bbox.h + 4.0) as f32,
            ) {
                let path = PathBuilder::from_rect(outline);
                pixmap.stroke_path(&path, &paint, &dashed_stroke(scale), transform, None);
            }
            let half = HANDLE_DRAW_SIZE / 2.0;
            for handle in handles(bbox) {
                let Some(square) = tiny_skia::Rect::from_xywh(
                    (handle.x - half) as f32,
                    (handle.y - half) as f32,
                    HANDLE_DRAW_SIZE as f32,
                    HANDLE_DRAW_SIZE as f32,
                ) else {
                    continue;
                };
                let square_path = PathBuilder::from_rect(square);
                pixmap.fill_path(&square_path, &paint, FillRule::Winding, transform, None);
                pixmap.stroke_path(
                    &square_path,
                    &solid_paint(Color::WHITE),
                    &thin_stroke(scale),
                    transform,
                    None,
                );
            }
        }
    }
}

fn draw_poly_preview(
    pixmap: &mut Pixmap,
    poly: &crate::interaction::PolySession,
    transform: Transform,
    scale: f32,
) {
    if poly.points.is_empty() {
        return;
    }
    let mut pb = PathBuilder::new();
    for (i, p) in poly.points.iter().enumerate() {
        if i == 0 {
            pb.move_to(p.x as f32, p.y as f32);
        } else {
            pb.line_to(p.x as f32, p.y as f32);
        }
    }
    if let Some(cursor) = poly.cursor {
        pb.line_to(cursor.x as f32, cursor.y as f32);
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &solid_paint(selection_color()),
            &dashed_stroke(scale),
            transform,
            None,
        );
    }
}

fn draw_label(
    pixmap: &mut Pixmap,
    text: &str,
    world_x: f64,
    world_y: f64,
    view: crate::editor::ViewTransform,
    width: u32,
    height: u32,
) {
    if text.is_empty() {
        return;
    }
    let Some(font) = label_font() else {
        return;
    };
    let screen = view.world_to_screen(homeplan_core::geometry::Point::new(world_x, world_y));
    let scale = Scale::uniform(LABEL_SIZE * view.scale as f32);
    let v_metrics = font.v_metrics(scale);
    let start = rt_point(screen.x as f32, screen.y as f32 + v_metrics.ascent / 2.0);
    let color = label_color();

    for glyph in font.layout(text, scale, start) {
        if let Some(bounding_box) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bounding_box.min.x;
                let py = gy as i32 + bounding_box.min.y;
                if px < 0 || px >= width as i32 || py < 0 || py >= height as i32 {
                    return;
                }
                let alpha = (v * 255.0) as u16;
                if alpha == 0 {
                    return;
                }
                let idx = ((py as u32 * width + px as u32) * 4) as usize;
                let pixel = &mut pixmap.data_mut()[idx..idx + 4];
                // Blend the label over whatever is already drawn.
                let blend = |src: u8, dst: u8| {
                    ((src as u16 * alpha + dst as u16 * (255 - alpha)) / 255) as u8
                };
                pixel[0] = blend((color.red() * 255.0) as u8, pixel[0]);
                pixel[1] = blend((color.green() * 255.0) as u8, pixel[1]);
                pixel[2] = blend((color.blue() * 255.0) as u8, pixel[2]);
                pixel[3] = 255;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorOptions, FloorPlanEditor};

    #[test]
    fn test_parse_hex_colors() {
        let c = parse_color("#dbeafe").unwrap();
        assert_eq!((c.red() * 255.0).round() as u8, 0xdb);
        let short = parse_color("#fff").unwrap();
        assert_eq!((short.red() * 255.0).round() as u8, 255);
        assert!(parse_color("#dbea").is_none());
        assert!(parse_color("blue").is_none());
    }

    #[test]
    fn test_parse_rgba_color() {
        let c = parse_color("rgba(219, 234, 254, 0.6)").unwrap();
        assert_eq!((c.red() * 255.0).round() as u8, 219);
        assert_eq!((c.alpha() * 255.0).round() as u8, 153);
        assert!(parse_color("rgba(1, 2, 3)").is_none());
        assert!(parse_color("rgba(1, 2, 3, 1.5)").is_none());
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut editor = FloorPlanEditor::new(EditorOptions::default());
        editor.add_room();
        editor.add_marker("wifi");
        editor.toggle_heatmap();
        let a = render(&editor, 320, 240);
        let b = render(&editor, 320, 240);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_render_zero_size_is_empty() {
        let editor = FloorPlanEditor::default();
        let img = render(&editor, 0, 0);
        assert_eq!(img.dimensions(), (0, 0));
    }
}
