use crate::{
    animation::ease::Ease,
    foundation::core::{Rgb, Vec3},
    foundation::error::{ChoreoError, ChoreoResult},
    geometry::curve::CurveSpec,
    viewport::ScaleBounds,
};

/// Every constant of the intro sequence. `Default` is the shipped sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub outer_count: usize,
    pub inner_count: usize,
    pub radii: Radii,
    pub start_radius: f64,
    /// Inner actors enter from `start_radius - inner_start_margin`.
    pub inner_start_margin: f64,
    pub palette: Vec<String>,
    pub outer_palette_offset: usize,
    pub inner_palette_offset: usize,
    pub outer_base_delay: f64,
    pub inner_base_delay: f64,
    /// Timeline delay is `base_delay * delay_scale`.
    pub delay_scale: f64,
    /// Floor path the inner group walks onto.
    pub walk: LemniscateParams,
    pub logo: LogoConfig,
    pub camera: CameraConfig,
    pub fade_start_at: f64,
    pub complete_at: f64,
    pub intro_scale: ScaleBounds,
    pub hero_scale: ScaleBounds,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Radii {
    pub outer: f64,
    pub inner: f64,
}

impl Default for Radii {
    fn default() -> Self {
        Self {
            outer: 6.4,
            inner: 3.2,
        }
    }
}

/// Shape parameters of a figure-eight, independent of sampling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LemniscateParams {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub bob: f64,
    pub phase: f64,
}

impl LemniscateParams {
    pub fn to_spec(self, sample_count: usize) -> CurveSpec {
        CurveSpec::lemniscate(self.width, self.depth, self.height, sample_count)
            .with_bob(self.bob)
            .with_phase(self.phase)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub shape: LemniscateParams,
    pub samples: usize,
    pub tubular_segments: usize,
    pub tube_radius: f64,
    pub radial_segments: usize,
    pub color: String,
    pub reveal_at: f64,
    pub reveal_duration: f64,
    pub reveal_ease: Ease,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            shape: LemniscateParams {
                width: 5.4,
                depth: 2.4,
                height: 1.65,
                bob: 0.15,
                phase: 0.15,
            },
            samples: 100,
            tubular_segments: 400,
            tube_radius: 0.08,
            radial_segments: 16,
            color: "#FDE08B".to_owned(),
            reveal_at: 2.3,
            reveal_duration: 0.8,
            reveal_ease: Ease::InOutCubic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraLeg {
    pub y: f64,
    pub z: f64,
    pub at: f64,
    pub duration: f64,
    pub ease: Ease,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start: Vec3,
    pub legs: Vec<CameraLeg>,
    pub fov_regular_deg: f64,
    pub fov_compact_deg: f64,
    /// Framing of the persistent logo after the intro.
    pub hero_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start: Vec3::new(0.0, 16.0, 26.0),
            legs: vec![
                CameraLeg {
                    y: 20.0,
                    z: 2.0,
                    at: 0.1,
                    duration: 1.8,
                    ease: Ease::InOutQuart,
                },
                CameraLeg {
                    y: 22.0,
                    z: 0.1,
                    at: 1.8,
                    duration: 1.8,
                    ease: Ease::InOutCubic,
                },
            ],
            fov_regular_deg: 40.0,
            fov_compact_deg: 55.0,
            hero_position: Vec3::new(0.0, 22.0, 0.1),
        }
    }
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            outer_count: 32,
            inner_count: 32,
            radii: Radii::default(),
            start_radius: 35.0,
            inner_start_margin: 4.0,
            palette: ["#FF3366", "#33CCFF", "#FDE08B", "#00FF66", "#FF9933", "#CC33FF"]
                .map(str::to_owned)
                .to_vec(),
            outer_palette_offset: 1,
            inner_palette_offset: 3,
            outer_base_delay: 0.1,
            inner_base_delay: 0.15,
            delay_scale: 0.45,
            walk: LemniscateParams {
                width: 5.4,
                depth: 2.4,
                height: 0.0,
                bob: 0.0,
                phase: 0.15,
            },
            logo: LogoConfig::default(),
            camera: CameraConfig::default(),
            fade_start_at: 3.9,
            complete_at: 4.6,
            intro_scale: ScaleBounds::new(0.40, 0.60),
            hero_scale: ScaleBounds::new(0.40, 0.60),
        }
    }
}

impl IntroConfig {
    pub fn from_json_str(s: &str) -> ChoreoResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn palette_rgb(&self) -> ChoreoResult<Vec<Rgb>> {
        self.palette.iter().map(|s| Rgb::from_hex(s)).collect()
    }

    /// Curve the inner group ends on, sampled once per inner actor.
    pub fn walk_spec(&self) -> CurveSpec {
        self.walk.to_spec(self.inner_count.max(3))
    }

    pub fn logo_spec(&self) -> CurveSpec {
        self.logo.shape.to_spec(self.logo.samples)
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        fn positive(name: &str, v: f64) -> ChoreoResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ChoreoError::validation(format!("{name} must be > 0, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> ChoreoResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ChoreoError::validation(format!("{name} must be >= 0, got {v}")))
            }
        }

        positive("radii.outer", self.radii.outer)?;
        positive("radii.inner", self.radii.inner)?;
        positive("start_radius", self.start_radius)?;
        non_negative("inner_start_margin", self.inner_start_margin)?;
        positive(
            "start_radius - inner_start_margin",
            self.start_radius - self.inner_start_margin,
        )?;
        non_negative("outer_base_delay", self.outer_base_delay)?;
        non_negative("inner_base_delay", self.inner_base_delay)?;
        non_negative("delay_scale", self.delay_scale)?;
        non_negative("fade_start_at", self.fade_start_at)?;

        if self.palette.is_empty() {
            return Err(ChoreoError::validation("palette must not be empty"));
        }
        self.palette_rgb()?;
        Rgb::from_hex(&self.logo.color)?;

        if self.complete_at < self.fade_start_at {
            return Err(ChoreoError::validation(
                "complete_at must not precede fade_start_at",
            ));
        }
        for (name, b) in [("intro_scale", self.intro_scale), ("hero_scale", self.hero_scale)] {
            if !b.is_valid() {
                return Err(ChoreoError::validation(format!(
                    "{name} must satisfy 0 < min <= max"
                )));
            }
        }
        for leg in &self.camera.legs {
            non_negative("camera leg offset", leg.at)?;
            positive("camera leg duration", leg.duration)?;
        }
        for fov in [self.camera.fov_regular_deg, self.camera.fov_compact_deg] {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(ChoreoError::validation("camera fov must be in (0, 180)"));
            }
        }

        self.walk_spec().validate()?;
        self.logo_spec().validate()?;
        positive("logo.tube_radius", self.logo.tube_radius)?;
        positive("logo.reveal_duration", self.logo.reveal_duration)?;
        non_negative("logo.reveal_at", self.logo.reveal_at)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/config.rs"]
mod tests;
