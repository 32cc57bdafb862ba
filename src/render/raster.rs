use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, TAU};

use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect, Vec2};

use crate::{
    animation::interp::DIAL_MODULUS,
    foundation::core::{Canvas, Rgba8},
    foundation::error::ReelResult,
    playback::driver::PlaybackView,
    render::{
        backend::{FrameRGBA, FrameRenderer},
        theme::{SceneTheme, mix},
    },
    timeline::frame::{DialState, FrameKind, Payload, ScannerState, TrackState},
};

const TRAIL_LEN: usize = 15;
const DIAL_FLASH_DECAY: f64 = 0.05;
const SCANNER_FLASH_DECAY: f64 = 0.06;

const DIAL_CENTER: Point = Point::new(640.0, 330.0);
const DIAL_OUTER: f64 = 200.0;
const DIAL_INNER: f64 = 160.0;
const NUMBER_RADIUS: f64 = 232.0;
const NEEDLE_LEN: f64 = 150.0;

const PAPER: Rect = Rect::new(340.0, 60.0, 940.0, 600.0);

/// Maps the 1280x720 reference layout onto the output canvas, letterboxed.
#[derive(Clone, Copy, Debug)]
struct Layout {
    scale: f64,
    origin: Vec2,
}

impl Layout {
    fn new(canvas: Canvas) -> Self {
        let scale = canvas.scale();
        let origin = Vec2::new(
            (f64::from(canvas.width) - f64::from(Canvas::REFERENCE.width) * scale) / 2.0,
            (f64::from(canvas.height) - f64::from(Canvas::REFERENCE.height) * scale) / 2.0,
        );
        Self { scale, origin }
    }

    fn point(&self, p: Point) -> Point {
        Point::new(
            self.origin.x + p.x * self.scale,
            self.origin.y + p.y * self.scale,
        )
    }

    fn len(&self, v: f64) -> f64 {
        v * self.scale
    }

    fn rect(&self, r: Rect) -> Rect {
        Rect::from_points(self.point(r.origin()), self.point(Point::new(r.x1, r.y1)))
    }
}

/// CPU raster renderer for dial, scanner and track scenes.
///
/// Keeps per-run presentation state (dial trail, event flashes) across `render` calls.
pub struct RasterRenderer {
    layout: Layout,
    theme: SceneTheme,
    image: RgbaImage,
    frame: FrameRGBA,
    trail: VecDeque<f64>,
    flash: f64,
    last_index: Option<u64>,
}

impl RasterRenderer {
    pub fn new(canvas: Canvas, theme: SceneTheme) -> Self {
        Self {
            layout: Layout::new(canvas),
            theme,
            image: RgbaImage::new(canvas.width, canvas.height),
            frame: FrameRGBA::filled(canvas.width, canvas.height, [0, 0, 0, 255]),
            trail: VecDeque::with_capacity(TRAIL_LEN),
            flash: 0.0,
            last_index: None,
        }
    }

    /// Last rendered frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    pub fn into_frame(self) -> FrameRGBA {
        self.frame
    }

    fn note_event(&mut self, view: &PlaybackView) {
        let entered = self.last_index != Some(view.display.index);
        self.last_index = Some(view.display.index);

        let (fresh, decay) = match view.display.kind {
            FrameKind::ZeroLand => (1.0, DIAL_FLASH_DECAY),
            FrameKind::ZeroPass => (0.6, DIAL_FLASH_DECAY),
            FrameKind::InvalidHit => (1.0, SCANNER_FLASH_DECAY),
            _ if matches!(view.display.payload, Payload::Scanner(_)) => (0.0, SCANNER_FLASH_DECAY),
            _ => (0.0, DIAL_FLASH_DECAY),
        };
        self.flash = if entered && fresh > 0.0 {
            fresh
        } else {
            (self.flash - decay).max(0.0)
        };
    }

    fn draw_dial(&mut self, view: &PlaybackView, dial: &DialState) {
        let p = self.theme.dial;
        let position = view.values.get("position").copied().unwrap_or(dial.position);
        if self.trail.back() != Some(&position) {
            if self.trail.len() == TRAIL_LEN {
                self.trail.pop_front();
            }
            self.trail.push_back(position);
        }

        let l = self.layout;
        let center = l.point(DIAL_CENTER);
        let on_ring = |pos: f64, radius: f64| center + dial_vector(pos) * l.len(radius);

        clear(&mut self.image, p.background);
        if self.flash > 0.0 {
            fill_circle(
                &mut self.image,
                on_ring(0.0, NUMBER_RADIUS),
                l.len(60.0),
                p.zero.with_alpha(self.flash * 0.5),
            );
        }
        fill_circle(&mut self.image, center, l.len(DIAL_OUTER), p.dial_outer);
        fill_circle(&mut self.image, center, l.len(DIAL_INNER), p.dial_inner);
        if view.display.kind == FrameKind::Final {
            stroke_circle(&mut self.image, center, l.len(DIAL_OUTER + 6.0), l.len(4.0), p.success);
        }

        let nearest = position.round().rem_euclid(DIAL_MODULUS) as u32;
        for n in (0..DIAL_MODULUS as u32).step_by(5) {
            let (color, radius) = if n == 0 {
                (p.zero, 8.0)
            } else if n.abs_diff(nearest) <= 2 {
                (p.number_active, 6.0)
            } else {
                (p.number_normal, 4.0)
            };
            fill_circle(
                &mut self.image,
                on_ring(f64::from(n), NUMBER_RADIUS),
                l.len(radius),
                color,
            );
        }

        let count = self.trail.len() as f64;
        for (i, &pos) in self.trail.iter().enumerate() {
            let fade = (i as f64 + 1.0) / count;
            fill_circle(
                &mut self.image,
                on_ring(pos, DIAL_OUTER - 20.0),
                l.len(5.0),
                p.trail.with_alpha(f64::from(p.trail.a) / 255.0 * fade),
            );
        }

        let mut r = 0.0;
        while r < NEEDLE_LEN {
            fill_circle(&mut self.image, on_ring(position, r), l.len(3.0), p.marker);
            r += 4.0;
        }
        fill_circle(&mut self.image, on_ring(position, NEEDLE_LEN), l.len(12.0), p.marker);
        fill_circle(&mut self.image, center, l.len(20.0), p.marker);

        progress_bar(
            &mut self.image,
            l.rect(Rect::new(440.0, 655.0, 840.0, 675.0)),
            view.progress_fraction,
            p.dial_inner,
            p.accent,
        );
    }

    fn draw_scanner(&mut self, view: &PlaybackView, scanner: &ScannerState) {
        let p = self.theme.scanner;
        let l = self.layout;

        let full = Rect::new(
            0.0,
            0.0,
            f64::from(self.image.width()),
            f64::from(self.image.height()),
        );
        vertical_gradient(&mut self.image, full, p.background_top, p.background_bottom);
        fill_rect(
            &mut self.image,
            l.rect(PAPER + Vec2::new(8.0, 8.0)),
            p.paper_shadow,
        );
        fill_rect(&mut self.image, l.rect(PAPER), p.paper);

        if let Some(digits) = scanner.digits.as_deref() {
            self.draw_digits(digits, scanner, view.display.kind);
        }

        let frac = view.progress_fraction;
        let y = PAPER.y0 + 40.0 + frac * (PAPER.height() - 80.0);
        fill_rect(
            &mut self.image,
            l.rect(Rect::new(PAPER.x0, y - 2.0, PAPER.x1, y + 2.0)),
            mix(p.scanner_start, p.scanner_end, frac),
        );

        let invalids = view
            .values
            .get("global_invalids")
            .copied()
            .unwrap_or(scanner.global_invalids as f64)
            .round() as u64;
        for i in 0..invalids.min(50) {
            let x = PAPER.x0 + 20.0 + i as f64 * 11.0;
            fill_rect(
                &mut self.image,
                l.rect(Rect::new(x, PAPER.y1 - 30.0, x + 8.0, PAPER.y1 - 22.0)),
                p.accent_red,
            );
        }

        progress_bar(
            &mut self.image,
            l.rect(Rect::new(340.0, 640.0, 940.0, 660.0)),
            frac,
            p.bar_track,
            p.bar_fill,
        );

        if self.flash > 0.0 {
            fill_rect(&mut self.image, full, p.accent_red.with_alpha(self.flash * 0.35));
        }
    }

    fn draw_digits(&mut self, digits: &str, scanner: &ScannerState, kind: FrameKind) {
        let p = self.theme.scanner;
        let l = self.layout;
        let n = digits.chars().count().max(1);
        let chunk = scanner
            .chunk_length
            .map_or(n, |c| c.max(1) as usize);
        let cell = ((PAPER.width() - 40.0) / n as f64).min(40.0);
        let x0 = PAPER.center().x - cell * n as f64 / 2.0;
        let (y0, y1) = (150.0, 210.0);

        for (i, ch) in digits.chars().enumerate() {
            let fill = match (kind, scanner.matched) {
                (FrameKind::PatternCheck | FrameKind::InvalidHit, Some(true)) => p.chunk_success,
                (FrameKind::PatternCheck, Some(false)) => p.chunk_fail,
                _ if (i / chunk) % 2 == 0 => p.chunk_a,
                _ => p.chunk_b,
            };
            let x = x0 + i as f64 * cell;
            fill_rect(
                &mut self.image,
                l.rect(Rect::new(x + 2.0, y0, x + cell - 2.0, y1)),
                fill,
            );
            let level = ch.to_digit(10).map_or(0.0, |d| f64::from(d) / 9.0);
            let ink_top = y1 - 6.0 - level * (y1 - y0 - 12.0);
            fill_rect(
                &mut self.image,
                l.rect(Rect::new(x + cell * 0.35, ink_top, x + cell * 0.65, y1 - 6.0)),
                p.background_top,
            );
        }
    }

    fn draw_tracks(&mut self, view: &PlaybackView, state: &TrackState) {
        let p = self.theme.tracks;
        let l = self.layout;

        clear(&mut self.image, p.background);
        fill_rect(&mut self.image, l.rect(Rect::new(0.0, 0.0, 1280.0, 8.0)), p.accent);

        let lanes = state.tracks.len().max(1) as f64;
        let lane_h = (560.0 / lanes).min(80.0);
        for (j, track) in state.tracks.iter().enumerate() {
            let y = 60.0 + j as f64 * lane_h;
            let lane = Rect::new(80.0, y, 1200.0, y + lane_h - 10.0);
            fill_rect(&mut self.image, l.rect(lane), p.foreground.with_alpha(0.06));
            fill_rect(
                &mut self.image,
                l.rect(Rect::new(lane.x0, lane.y0, lane.x0 + 16.0, lane.y1)),
                p.accent,
            );

            let values: Vec<Option<f64>> = track
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    view.values
                        .get(&format!("{}[{i}]", track.id))
                        .copied()
                        .or_else(|| v.as_number())
                })
                .collect();
            let max_abs = values
                .iter()
                .flatten()
                .fold(0.0_f64, |m, v| m.max(v.abs()));
            let cells = track.values.len().max(1) as f64;
            let cell_w = (lane.width() - 40.0) / cells;

            for (i, (value, raw)) in values.iter().zip(&track.values).enumerate() {
                let x = lane.x0 + 30.0 + i as f64 * cell_w;
                let inner_h = lane.height() - 12.0;
                let rect = match value {
                    Some(v) => {
                        let h = if max_abs > 0.0 {
                            v.abs() / max_abs * inner_h
                        } else {
                            0.0
                        };
                        Rect::new(x + 2.0, lane.y1 - 6.0 - h, x + cell_w - 2.0, lane.y1 - 6.0)
                    }
                    None => {
                        let text_w = (raw.to_string().chars().count() as f64 * 6.0)
                            .min(cell_w - 4.0);
                        let mid = (lane.y0 + lane.y1) / 2.0;
                        Rect::new(x + 2.0, mid - 3.0, x + 2.0 + text_w, mid + 3.0)
                    }
                };
                let color = if value.is_some() {
                    p.accent
                } else {
                    p.foreground.with_alpha(0.7)
                };
                fill_rect(&mut self.image, l.rect(rect), color);
            }
        }

        progress_bar(
            &mut self.image,
            l.rect(Rect::new(80.0, 670.0, 1200.0, 684.0)),
            view.progress_fraction,
            p.foreground.with_alpha(0.2),
            p.accent,
        );
    }
}

impl FrameRenderer for RasterRenderer {
    fn render(&mut self, view: &PlaybackView) -> ReelResult<()> {
        self.note_event(view);
        match &view.display.payload {
            Payload::Dial(d) => self.draw_dial(view, d),
            Payload::Scanner(s) => self.draw_scanner(view, s),
            Payload::Tracks(t) => self.draw_tracks(view, t),
        }
        self.frame.data.copy_from_slice(self.image.as_raw());
        Ok(())
    }

    fn raster(&self) -> Option<&FrameRGBA> {
        Some(&self.frame)
    }
}

/// Unit vector for a dial position; 0 points straight up, increasing clockwise.
fn dial_vector(position: f64) -> Vec2 {
    Vec2::from_angle(position / DIAL_MODULUS * TAU - FRAC_PI_2)
}

fn blend(px: &mut Rgba<u8>, c: Rgba8) {
    if c.a == 255 {
        *px = Rgba(c.to_array());
        return;
    }
    let a = u32::from(c.a);
    let inv = 255 - a;
    for (d, s) in px.0[..3].iter_mut().zip([c.r, c.g, c.b]) {
        *d = ((u32::from(s) * a + u32::from(*d) * inv + 127) / 255) as u8;
    }
    px.0[3] = 255;
}

fn clear(img: &mut RgbaImage, c: Rgba8) {
    let px = Rgba(c.to_array());
    img.pixels_mut().for_each(|p| *p = px);
}

/// Pixel range whose centers may fall inside `[lo, hi)` along an axis of `size` pixels.
fn span(lo: f64, hi: f64, size: u32) -> std::ops::Range<u32> {
    let start = (lo - 0.5).ceil().clamp(0.0, f64::from(size)) as u32;
    let end = (hi - 0.5).ceil().clamp(0.0, f64::from(size)) as u32;
    start..end.max(start)
}

fn fill_rect(img: &mut RgbaImage, r: Rect, c: Rgba8) {
    if c.a == 0 {
        return;
    }
    let (w, h) = img.dimensions();
    for y in span(r.y0, r.y1, h) {
        for x in span(r.x0, r.x1, w) {
            blend(img.get_pixel_mut(x, y), c);
        }
    }
}

fn vertical_gradient(img: &mut RgbaImage, r: Rect, top: Rgba8, bottom: Rgba8) {
    let (w, h) = img.dimensions();
    let height = r.height().max(1.0);
    for y in span(r.y0, r.y1, h) {
        let c = mix(top, bottom, (f64::from(y) + 0.5 - r.y0) / height);
        for x in span(r.x0, r.x1, w) {
            blend(img.get_pixel_mut(x, y), c);
        }
    }
}

fn fill_annulus(img: &mut RgbaImage, center: Point, inner: f64, outer: f64, c: Rgba8) {
    if c.a == 0 || outer <= 0.0 {
        return;
    }
    let (w, h) = img.dimensions();
    let (inner2, outer2) = (inner.max(0.0).powi(2), outer * outer);
    for y in span(center.y - outer, center.y + outer, h) {
        for x in span(center.x - outer, center.x + outer, w) {
            let d2 = (Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5) - center).hypot2();
            if d2 <= outer2 && d2 >= inner2 {
                blend(img.get_pixel_mut(x, y), c);
            }
        }
    }
}

fn fill_circle(img: &mut RgbaImage, center: Point, radius: f64, c: Rgba8) {
    fill_annulus(img, center, 0.0, radius, c);
}

fn stroke_circle(img: &mut RgbaImage, center: Point, radius: f64, width: f64, c: Rgba8) {
    fill_annulus(img, center, radius - width / 2.0, radius + width / 2.0, c);
}

fn progress_bar(img: &mut RgbaImage, r: Rect, fraction: f64, track: Rgba8, fill: Rgba8) {
    fill_rect(img, r, track);
    let fraction = fraction.clamp(0.0, 1.0);
    fill_rect(
        img,
        Rect::new(r.x0, r.y0, r.x0 + r.width() * fraction, r.y1),
        fill,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
