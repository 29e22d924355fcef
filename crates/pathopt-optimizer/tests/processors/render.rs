//! Rasterizing path data for coverage comparisons.

use pathopt_path::{parse_path, Opcode};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const SIZE: u32 = 128;

pub fn to_skia(d: &str) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for command in parse_path(d).to_absolute_curves() {
        let a = &command.args;
        match command.opcode {
            Opcode::MoveTo => builder.move_to(a[0] as f32, a[1] as f32),
            Opcode::LineTo => builder.line_to(a[0] as f32, a[1] as f32),
            Opcode::CurveTo => builder.cubic_to(
                a[0] as f32,
                a[1] as f32,
                a[2] as f32,
                a[3] as f32,
                a[4] as f32,
                a[5] as f32,
            ),
            Opcode::ClosePath => builder.close(),
            other => panic!("unexpected {:?} after curve conversion", other),
        }
    }
    builder.finish()
}

/// Fill every path with half transparent black, aliased.
pub fn fill(paths: &[&str], fill_rule: FillRule) -> Vec<u8> {
    let mut pixmap = Pixmap::new(SIZE, SIZE).unwrap();
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 128);
    paint.anti_alias = false;
    for d in paths {
        let path = to_skia(d).unwrap();
        pixmap.fill_path(&path, &paint, fill_rule, Transform::identity(), None);
    }
    pixmap.data().to_vec()
}

/// Alpha channel of `d` stroked in black with the given width.
pub fn stroke(d: &str, width: f32) -> Vec<u8> {
    let mut pixmap = Pixmap::new(SIZE, SIZE).unwrap();
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;
    if let Some(path) = to_skia(d) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
    pixmap.data().chunks_exact(4).map(|px| px[3]).collect()
}
