use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde_json::Value;

use crate::config::SignatureSettings;
use crate::error::ClientError;
use crate::state::AppState;
use crate::ui::{node, Button as UiButton, SignaturePad as UiSignaturePad};

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub type Point = (f32, f32);

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Freehand capture surface. Empty iff no strokes have been recorded since
/// creation or the last clear.
#[derive(Debug, Clone)]
pub struct SignatureSurface {
    width: u32,
    height: u32,
    pen_width: f32,
    strokes: Vec<Stroke>,
}

impl SignatureSurface {
    pub fn new(width: u32, height: u32, pen_width: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pen_width: if pen_width.is_finite() && pen_width > 0.0 {
                pen_width
            } else {
                1.0
            },
            strokes: Vec::new(),
        }
    }

    pub fn from_settings(settings: &SignatureSettings) -> Self {
        Self::new(settings.width, settings.height, settings.pen_width)
    }

    /// Record one stroke. Non-finite points are dropped; a stroke left with
    /// no points is not recorded. Returns whether a stroke was added.
    pub fn add_stroke(&mut self, points: Vec<Point>) -> bool {
        let points: Vec<Point> = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if points.is_empty() {
            return false;
        }
        self.strokes.push(Stroke { points });
        true
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn rasterize(&self) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        let radius = (self.pen_width / 2.0).round() as i32;
        for stroke in &self.strokes {
            let points = stroke.points();
            if points.len() == 1 {
                stamp(&mut canvas, points[0], radius);
                continue;
            }
            for pair in points.windows(2) {
                draw_segment(&mut canvas, pair[0], pair[1], radius);
            }
        }
        canvas
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ClientError> {
        let canvas = self.rasterize();
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(&canvas, canvas.width(), canvas.height(), ColorType::Rgba8)
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(buf)
    }

    pub fn to_data_url(&self) -> Result<String, ClientError> {
        let png = self.to_png()?;
        Ok(format!("{DATA_URL_PREFIX}{}", B64.encode(png)))
    }

    /// The value submitted for the signature: `None` when nothing was drawn.
    pub fn export(&self) -> Result<Option<String>, ClientError> {
        if self.is_empty() {
            return Ok(None);
        }
        self.to_data_url().map(Some)
    }
}

fn stamp(canvas: &mut RgbaImage, (x, y): Point, radius: i32) {
    let reach = radius.max(0) as f32;
    if x < -reach
        || y < -reach
        || x > canvas.width() as f32 + reach
        || y > canvas.height() as f32 + reach
    {
        return;
    }
    let center = (x.round() as i32, y.round() as i32);
    if radius > 0 {
        draw_filled_circle_mut(canvas, center, radius, INK);
    } else if center.0 >= 0
        && center.1 >= 0
        && (center.0 as u32) < canvas.width()
        && (center.1 as u32) < canvas.height()
    {
        canvas.put_pixel(center.0 as u32, center.1 as u32, INK);
    }
}

/// Clip a segment to the canvas grown by `margin` on every side
/// (Liang-Barsky). `None` when the segment misses that area entirely.
fn clip_segment(canvas: &RgbaImage, start: Point, end: Point, margin: f32) -> Option<(Point, Point)> {
    let x_max = canvas.width() as f32 + margin;
    let y_max = canvas.height() as f32 + margin;
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-dx, start.0 + margin),
        (dx, x_max - start.0),
        (-dy, start.1 + margin),
        (dy, y_max - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some((
        (start.0 + dx * t0, start.1 + dy * t0),
        (start.0 + dx * t1, start.1 + dy * t1),
    ))
}

fn draw_segment(canvas: &mut RgbaImage, start: Point, end: Point, radius: i32) {
    let Some((start, end)) = clip_segment(canvas, start, end, radius.max(0) as f32 + 1.0) else {
        return;
    };
    draw_line_segment_mut(canvas, start, end, INK);
    if radius <= 0 {
        return;
    }
    // Stamp discs along the segment so the line keeps the pen width.
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    let steps = (length / radius as f32).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp(canvas, (start.0 + dx * t, start.1 + dy * t), radius);
    }
}

pub fn handle_signature_stroke(state: &mut AppState, points: Vec<Point>) {
    if !state.signature.add_stroke(points) {
        tracing::debug!("ignored signature stroke without drawable points");
    }
}

pub fn handle_signature_clear(state: &mut AppState) {
    state.signature.clear();
}

pub fn render_signature_pad(state: &AppState) -> Vec<Value> {
    let (width, height) = state.signature.dimensions();
    vec![
        node(
            UiSignaturePad::new("signature_stroke", width, height)
                .pen_width(state.signature.pen_width())
                .stroke_count(state.signature.stroke_count())
                .content_description("Signature drawing area"),
        ),
        node(UiButton::new("Clear signature", "signature_clear").id("clear-signature")),
    ]
}
