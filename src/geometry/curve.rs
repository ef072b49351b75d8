use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    animation::tween::Lerp,
    foundation::core::Vec3,
    foundation::error::{ChoreoError, ChoreoResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CurveShape {
    /// Circle of radius `width` in the floor plane, lifted to `height`.
    Ring,
    /// Figure-eight: `(W sin t, H + A cos t, D sin 2t)`.
    Lemniscate,
}

/// Parameters of a closed parametric curve.
///
/// `depth` and `bob` only affect the lemniscate. `phase` shifts the parameter
/// of every sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveSpec {
    pub shape: CurveShape,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub bob: f64,
    pub phase: f64,
    pub sample_count: usize,
    pub closed: bool, // repeat the first point at the end
}

impl CurveSpec {
    pub fn ring(radius: f64, sample_count: usize) -> Self {
        Self {
            shape: CurveShape::Ring,
            width: radius,
            depth: radius,
            height: 0.0,
            bob: 0.0,
            phase: 0.0,
            sample_count,
            closed: false,
        }
    }

    pub fn lemniscate(width: f64, depth: f64, height: f64, sample_count: usize) -> Self {
        Self {
            shape: CurveShape::Lemniscate,
            width,
            depth,
            height,
            bob: 0.0,
            phase: 0.0,
            sample_count,
            closed: false,
        }
    }

    pub fn with_bob(mut self, bob: f64) -> Self {
        self.bob = bob;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        if self.sample_count < 3 {
            return Err(ChoreoError::validation(format!(
                "curve sample_count must be >= 3, got {}",
                self.sample_count
            )));
        }
        let finite = [self.width, self.depth, self.height, self.bob, self.phase]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ChoreoError::validation("curve parameters must be finite"));
        }
        if self.width <= 0.0 {
            return Err(ChoreoError::validation("curve width must be > 0"));
        }
        if self.shape == CurveShape::Lemniscate && self.depth <= 0.0 {
            return Err(ChoreoError::validation("lemniscate depth must be > 0"));
        }
        Ok(())
    }
}

/// Validate `spec` and wrap it as an evaluable closed curve.
pub fn generate_curve(spec: CurveSpec) -> ChoreoResult<ClosedCurve> {
    spec.validate()?;
    Ok(ClosedCurve { spec })
}

/// A validated closed curve. Points are computed on demand from the spec.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClosedCurve {
    spec: CurveSpec,
}

impl ClosedCurve {
    pub fn spec(&self) -> &CurveSpec {
        &self.spec
    }

    /// Number of points yielded by [`ClosedCurve::points`].
    pub fn len(&self) -> usize {
        self.spec.sample_count + usize::from(self.spec.closed)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Curve parameter of sample `i`.
    pub fn param_for_index(&self, i: usize) -> f64 {
        TAU * (i as f64) / (self.spec.sample_count as f64) + self.spec.phase
    }

    pub fn point_at_param(&self, t: f64) -> Vec3 {
        let s = &self.spec;
        match s.shape {
            CurveShape::Ring => Vec3::new(s.width * t.cos(), s.height, s.width * t.sin()),
            CurveShape::Lemniscate => Vec3::new(
                s.width * t.sin(),
                s.height + s.bob * t.cos(),
                s.depth * (2.0 * t).sin(),
            ),
        }
    }

    /// Derivative of the position with respect to the parameter.
    pub fn tangent_at_param(&self, t: f64) -> Vec3 {
        let s = &self.spec;
        match s.shape {
            CurveShape::Ring => Vec3::new(-s.width * t.sin(), 0.0, s.width * t.cos()),
            CurveShape::Lemniscate => Vec3::new(
                s.width * t.cos(),
                -s.bob * t.sin(),
                2.0 * s.depth * (2.0 * t).cos(),
            ),
        }
    }

    /// Yaw that makes a figure standing at parameter `t` face along the curve.
    pub fn rotation_at(&self, t: f64) -> f64 {
        let d = self.tangent_at_param(t);
        d.x.atan2(d.z) + FRAC_PI_2
    }

    /// Lazy, restartable sequence of sample points.
    pub fn points(&self) -> CurvePoints {
        CurvePoints {
            curve: *self,
            next: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<Vec3> {
        self.points().collect()
    }

    /// Resample the closed curve through its base samples with a uniform
    /// Catmull-Rom spline. Returns `segments + 1` points; the last equals the first.
    pub fn catmull_rom(&self, segments: usize) -> Vec<Vec3> {
        let n = self.spec.sample_count;
        let base: Vec<Vec3> = (0..n)
            .map(|i| self.point_at_param(self.param_for_index(i)))
            .collect();
        let segments = segments.max(1);

        let mut out = Vec::with_capacity(segments + 1);
        for k in 0..segments {
            let u = (k as f64) / (segments as f64) * (n as f64);
            let i = (u.floor() as usize) % n;
            let f = u - u.floor();
            let p0 = base[(i + n - 1) % n];
            let p1 = base[i];
            let p2 = base[(i + 1) % n];
            let p3 = base[(i + 2) % n];
            out.push(catmull_rom_point(p0, p1, p2, p3, f));
        }
        out.push(out[0]);
        out
    }
}

fn catmull_rom_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f64) -> Vec3 {
    if t == 0.0 {
        return p1;
    }
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    let v = Vec3::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    );
    if v.is_finite() {
        v
    } else {
        Vec3::lerp(&p1, &p2, t)
    }
}

#[derive(Clone, Debug)]
pub struct CurvePoints {
    curve: ClosedCurve,
    next: usize,
}

impl Iterator for CurvePoints {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        let n = self.curve.spec.sample_count;
        let i = self.next;
        if i >= self.curve.len() {
            return None;
        }
        self.next += 1;
        // The closing point is the first point, not a re-evaluation at 2π.
        let idx = if i == n { 0 } else { i };
        Some(self.curve.point_at_param(self.curve.param_for_index(idx)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.curve.len() - self.next;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for CurvePoints {}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
