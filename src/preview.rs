//! Small CPU raster of a [`SceneFrame`], for inspecting the choreography offline.

use std::path::Path;

use image::{Rgba, RgbaImage};
use kurbo::Rect;

use crate::{
    foundation::core::{Point, Rgb, Vec3},
    foundation::error::{ChoreoError, ChoreoResult},
    intro::{
        choreographer::ActorState,
        master::Camera,
        scene::{ActorFrame, SceneFrame},
    },
};

/// `#13071e`, the page background behind the intro.
pub const BACKGROUND: Rgb = Rgb::new(19.0 / 255.0, 7.0 / 255.0, 30.0 / 255.0);

const NEAR: f64 = 0.05;
const FIGURE_HEIGHT: f64 = 1.0;
const SHOULDER_HEIGHT: f64 = 0.7;
const HEAD_HEIGHT: f64 = 0.88;
const HEAD_RADIUS: f64 = 0.12;
const UPPER_ARM: f64 = 0.3;
const FOREARM: f64 = 0.25;
const LIMB_RADIUS: f64 = 0.035;
const RIBBON_RADIUS: f64 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOpts {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            background: BACKGROUND,
        }
    }
}

/// Pinhole projection for one camera and output size.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f64,
    aspect: f64,
    width: f64,
    height: f64,
}

impl Projector {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let forward = (camera.target - camera.position).normalize();
        let mut right = forward.cross(Vec3::UP).normalize();
        if right == Vec3::ZERO {
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = right.cross(forward);
        let half_fov = camera.fov_deg.to_radians() * 0.5;
        Self {
            eye: camera.position,
            right,
            up,
            forward,
            focal: 1.0 / half_fov.tan(),
            aspect: f64::from(width) / f64::from(height.max(1)),
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Pixel position and view depth of `p`, or `None` behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<(Point, f64)> {
        let d = p - self.eye;
        let depth = d.dot(self.forward);
        if depth <= NEAR {
            return None;
        }
        let nx = d.dot(self.right) * self.focal / (depth * self.aspect);
        let ny = d.dot(self.up) * self.focal / depth;
        let px = (nx + 1.0) * 0.5 * self.width;
        let py = (1.0 - ny) * 0.5 * self.height;
        Some((Point::new(px, py), depth))
    }

    /// On-screen size in pixels of a world length at `depth`.
    pub fn pixels(&self, world: f64, depth: f64) -> f64 {
        world * self.focal * self.height * 0.5 / depth
    }
}

struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    fn new(opts: &PreviewOpts) -> Self {
        let bg = Rgba(opts.background.to_rgba8(1.0));
        Self {
            img: RgbaImage::from_pixel(opts.width, opts.height, bg),
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= i64::from(self.img.width()) || y >= i64::from(self.img.height()) {
            return;
        }
        let px = self.img.get_pixel_mut(x as u32, y as u32);
        let src = color.to_rgba8(1.0);
        let a = alpha.clamp(0.0, 1.0);
        for c in 0..3 {
            let d = f64::from(px.0[c]);
            px.0[c] = (d + (f64::from(src[c]) - d) * a).round() as u8;
        }
    }

    fn bounds(&self, margin: f64) -> Rect {
        Rect::new(
            -margin,
            -margin,
            f64::from(self.img.width()) + margin,
            f64::from(self.img.height()) + margin,
        )
    }

    fn disc(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
        let r = radius.max(0.5);
        let (w, h) = (i64::from(self.img.width()), i64::from(self.img.height()));
        let x0 = ((center.x - r).floor() as i64).max(0);
        let x1 = ((center.x + r).ceil() as i64).min(w - 1);
        let y0 = ((center.y - r).floor() as i64).max(0);
        let y1 = ((center.y + r).ceil() as i64).min(h - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if p.distance(center) <= r {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    fn segment(&mut self, a: Point, b: Point, radius: f64, color: Rgb, alpha: f64) {
        let r = radius.max(0.5);
        let Some((a, b)) = clip_segment(a, b, self.bounds(r)) else {
            return;
        };
        // Stamps at most half a radius apart.
        let spacing = (r * 0.5).max(1.0);
        let steps = (a.distance(b) / spacing).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.disc(a.lerp(b, t), radius, color, alpha);
        }
    }
}

/// Liang-Barsky clip of `a..b` against `rect`. `None` when the segment misses it.
fn clip_segment(a: Point, b: Point, rect: Rect) -> Option<(Point, Point)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, a.x - rect.x0),
        (d.x, rect.x1 - a.x),
        (-d.y, a.y - rect.y0),
        (d.y, rect.y1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else if r < t0 {
            return None;
        } else {
            t1 = t1.min(r);
        }
    }
    Some((a.lerp(b, t0), a.lerp(b, t1)))
}

/// Rasterize one frame: ribbon first, then actors from far to near.
pub fn render_preview(frame: &SceneFrame, opts: &PreviewOpts) -> ChoreoResult<RgbaImage> {
    if opts.width == 0 || opts.height == 0 {
        return Err(ChoreoError::validation("preview size must be non-zero"));
    }
    let proj = Projector::new(&frame.camera, opts.width, opts.height);
    let mut canvas = Canvas::new(opts);
    let world = |p: Vec3| p * frame.scale;

    for pair in frame.ribbon.windows(2) {
        let (Some((a, da)), Some((b, db))) = (proj.project(world(pair[0])), proj.project(world(pair[1])))
        else {
            continue;
        };
        let r = proj.pixels(RIBBON_RADIUS * frame.scale, da.min(db));
        canvas.segment(a, b, r, frame.ribbon_color, 1.0);
    }

    let mut actors: Vec<(&ActorFrame, f64)> = frame
        .actors
        .iter()
        .filter(|a| a.state.opacity > 0.0)
        .filter_map(|a| {
            proj.project(world(a.state.position))
                .map(|(_, depth)| (a, depth))
        })
        .collect();
    actors.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (actor, _) in actors {
        draw_figure(&mut canvas, &proj, &actor.state, frame.scale);
    }

    Ok(canvas.img)
}

/// Write `img` as PNG, creating missing parent directories.
pub fn save_png(img: &RgbaImage, path: &Path) -> ChoreoResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Rotate the hanging direction `(0, -1)` by `angle` about the figure's z axis.
fn limb(angle: f64) -> (f64, f64) {
    (angle.sin(), -angle.cos())
}

fn draw_figure(canvas: &mut Canvas, proj: &Projector, state: &ActorState, scale: f64) {
    let side = Vec3::new(state.rotation_y.cos(), 0.0, -state.rotation_y.sin());
    let base = state.position;
    let at = |p: Vec3| proj.project(p * scale);
    let color = state.color;
    let alpha = state.opacity;

    let Some((feet, depth)) = at(base) else {
        return;
    };
    let limb_px = proj.pixels(LIMB_RADIUS * scale, depth);

    let shoulder = base + Vec3::UP * SHOULDER_HEIGHT;
    if let Some((neck, _)) = at(base + Vec3::UP * FIGURE_HEIGHT * 0.78) {
        canvas.segment(feet, neck, limb_px, color, alpha);
    }
    if let Some((head, d)) = at(base + Vec3::UP * HEAD_HEIGHT) {
        canvas.disc(head, proj.pixels(HEAD_RADIUS * scale, d), color, alpha);
    }

    let joints = state.joints.0;
    for (shoulder_angle, elbow_angle) in [(joints[0], joints[2]), (joints[1], joints[3])] {
        let (ux, uy) = limb(shoulder_angle);
        let (fx, fy) = limb(shoulder_angle + elbow_angle);
        let elbow = shoulder + side * (ux * UPPER_ARM) + Vec3::UP * (uy * UPPER_ARM);
        let hand = elbow + side * (fx * FOREARM) + Vec3::UP * (fy * FOREARM);
        if let (Some((s, _)), Some((e, _)), Some((h, _))) = (at(shoulder), at(elbow), at(hand)) {
            canvas.segment(s, e, limb_px, color, alpha);
            canvas.segment(e, h, limb_px, color, alpha);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/preview.rs"]
mod tests;
