//! Software raster surface and per-pixel compositing.
//!
//! Colours are composited non-premultiplied, using the W3C separable blend
//! modes that HTML canvas implements.

use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

use crate::assets;
use crate::canvas::BlendMode;
use crate::error::ToolResult;

/// How one stroke segment is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub color: Color32,
    pub width: f32,
    /// Global alpha, multiplied with the colour's own alpha
    pub alpha: f32,
    pub blend: BlendMode,
    /// Extra edge softness in pixels
    pub blur: f32,
    /// Radians. When set the nib is an ellipse (half as tall as wide) rotated by this angle.
    pub nib_angle: Option<f32>,
}

impl SegmentStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            alpha: 1.0,
            blend: BlendMode::Normal,
            blur: 0.0,
            nib_angle: None,
        }
    }
}

#[derive(Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl RasterSurface {
    /// Fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// PNG data URL of the whole surface
    pub fn to_data_url(&self) -> ToolResult<String> {
        assets::encode_png_data_url(&self.pixels)
    }

    /// Stroke a single round-capped segment.
    ///
    /// Every pixel is composited at most once per call, so overlapping
    /// coverage inside one segment does not darken.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &SegmentStyle) {
        if style.width <= 0.0 || style.alpha <= 0.0 || self.pixels.width() == 0 || self.pixels.height() == 0 {
            return;
        }
        let half = style.width / 2.0;
        let feather = 0.5 + style.blur.max(0.0);
        let reach = half + feather;

        let min_x = (from.x.min(to.x) - reach).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - reach).floor().max(0.0) as u32;
        let max_x = ((from.x.max(to.x) + reach).ceil().max(0.0) as u32).min(self.pixels.width());
        let max_y = ((from.y.max(to.y) + reach).ceil().max(0.0) as u32).min(self.pixels.height());

        let [r, g, b, a] = style.color.to_srgba_unmultiplied();
        let source = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
        let base_alpha = style.alpha.clamp(0.0, 1.0) * a as f32 / 255.0;
        let nib = style.nib_angle.map(|angle| (angle.cos(), angle.sin()));

        let delta = to - from;
        let length_sq = delta.length_sq();

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if length_sq > 0.0 {
                    ((p - from).dot(delta) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let offset = p - (from + delta * t);
                let distance = match nib {
                    Some((cos, sin)) => {
                        let along = offset.x * cos + offset.y * sin;
                        let across = -offset.x * sin + offset.y * cos;
                        (along * along + 4.0 * across * across).sqrt()
                    }
                    None => offset.length(),
                };
                let coverage = ((half - distance) / (2.0 * feather) + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = self.pixels.get_pixel_mut(x, y);
                composite(pixel, source, base_alpha * coverage, style.blend);
            }
        }
    }

    /// Make every pixel whose centre lies outside `polygon` transparent
    pub fn clip_to_polygon(&mut self, polygon: &[Pos2]) {
        if polygon.len() < 3 {
            return;
        }
        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if !contains_point(polygon, centre) {
                pixel.0[3] = 0;
            }
        }
    }
}

/// Separable blend function on one channel in [0, 1]
pub fn blend_channel(mode: BlendMode, backdrop: f32, source: f32) -> f32 {
    match mode {
        BlendMode::Normal => source,
        BlendMode::Multiply => backdrop * source,
        BlendMode::Overlay => {
            if backdrop <= 0.5 {
                2.0 * backdrop * source
            } else {
                1.0 - 2.0 * (1.0 - backdrop) * (1.0 - source)
            }
        }
    }
}

/// Composite `source` with `source_alpha` onto `pixel`
pub fn composite(pixel: &mut Rgba<u8>, source: [f32; 3], source_alpha: f32, mode: BlendMode) {
    let alpha_s = source_alpha.clamp(0.0, 1.0);
    let alpha_b = pixel.0[3] as f32 / 255.0;
    let alpha_o = alpha_s + alpha_b * (1.0 - alpha_s);
    if alpha_o <= 0.0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }
    for channel in 0..3 {
        let backdrop = pixel.0[channel] as f32 / 255.0;
        let blended = blend_channel(mode, backdrop, source[channel]);
        let value = (alpha_s * (1.0 - alpha_b) * source[channel]
            + alpha_s * alpha_b * blended
            + (1.0 - alpha_s) * alpha_b * backdrop)
            / alpha_o;
        pixel.0[channel] = to_byte(value);
    }
    pixel.0[3] = to_byte(alpha_o);
}

/// Blend a flat colour into every pixel, keeping each pixel's alpha
pub fn blend_color(pixels: &mut RgbaImage, color: Color32, mode: BlendMode) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let tint = [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0];
    let strength = a as f32 / 255.0;
    for pixel in pixels.pixels_mut() {
        for channel in 0..3 {
            let backdrop = pixel.0[channel] as f32 / 255.0;
            let blended = blend_channel(mode, backdrop, tint[channel]);
            pixel.0[channel] = to_byte(backdrop + (blended - backdrop) * strength);
        }
    }
}

/// Even-odd point in polygon test. Fewer than three points enclose nothing.
pub fn contains_point(polygon: &[Pos2], point: Pos2) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
