//! Host viewport signals: size, device class and the responsive scene scale.

/// Viewports narrower than this are treated as compact devices.
pub const COMPACT_BREAKPOINT_PX: u32 = 768;

/// Width that maps to a scale of exactly 1.0 before clamping.
pub const REFERENCE_WIDTH_PX: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceClass {
    Compact,
    Regular,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn device_class(self) -> DeviceClass {
        if self.width < COMPACT_BREAKPOINT_PX {
            DeviceClass::Compact
        } else {
            DeviceClass::Regular
        }
    }

    pub fn is_compact(self) -> bool {
        self.device_class() == DeviceClass::Compact
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Clamp range for the compact-device scene scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && 0.0 < self.min && self.min <= self.max
    }
}

/// Uniform scale applied to the whole scene.
///
/// Compact devices get `clamp(width / 1000, min, max)`; everything else 1.0.
pub fn responsive_scale(viewport: Viewport, bounds: ScaleBounds) -> f64 {
    match viewport.device_class() {
        DeviceClass::Compact => {
            (f64::from(viewport.width) / REFERENCE_WIDTH_PX).clamp(bounds.min, bounds.max)
        }
        DeviceClass::Regular => 1.0,
    }
}
