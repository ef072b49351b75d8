use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    foundation::core::{Rgb, Vec2, Vec3},
    foundation::error::ChoreoResult,
    geometry::curve::generate_curve,
    intro::config::{IntroConfig, Radii},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Group {
    /// Walks in to the ring and stays there.
    Outer,
    /// Walks in to a smaller ring, then on to the figure-eight.
    Inner,
}

/// Where one actor starts, pauses and ends, and how it is turned at each stop.
///
/// Plans are created once per scene and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActorPlan {
    pub id: usize,
    pub group: Group,
    pub index: usize, // within the group
    pub angle: f64,
    pub start_position: Vec3,
    pub circle_position: Vec3,
    pub final_position: Vec3,
    pub rotation_at_circle: f64,
    pub rotation_at_final: f64,
    pub base_delay: f64,
    pub color_index: usize,
    pub color: Rgb,
}

impl ActorPlan {
    pub fn is_inner(&self) -> bool {
        self.group == Group::Inner
    }

    pub fn is_finite(&self) -> bool {
        self.start_position.is_finite()
            && self.circle_position.is_finite()
            && self.final_position.is_finite()
            && self.rotation_at_circle.is_finite()
            && self.rotation_at_final.is_finite()
            && self.base_delay.is_finite()
    }
}

/// Angle of actor `i` out of `count` around the ring.
pub fn ring_angle(i: usize, count: usize) -> f64 {
    TAU * (i as f64) / (count as f64)
}

/// Yaw that makes a figure at `angle` on a ring face along it.
pub fn ring_rotation(angle: f64) -> f64 {
    -angle - FRAC_PI_2
}

fn ring_point(angle: f64, radius: f64) -> Vec3 {
    Vec3::from_floor(Vec2::from_angle(angle) * radius, 0.0)
}

/// Plan the default swarm with the given counts and radii.
pub fn plan_actors(
    outer_count: usize,
    inner_count: usize,
    radii: Radii,
    start_radius: f64,
) -> ChoreoResult<Vec<ActorPlan>> {
    let config = IntroConfig {
        outer_count,
        inner_count,
        radii,
        start_radius,
        ..IntroConfig::default()
    };
    Planner::from_config(&config).plan()
}

pub struct Planner<'a> {
    config: &'a IntroConfig,
}

impl<'a> Planner<'a> {
    pub fn from_config(config: &'a IntroConfig) -> Self {
        Self { config }
    }

    /// Outer actors first, then inner; ids are positions in the returned list.
    #[tracing::instrument(skip_all)]
    pub fn plan(&self) -> ChoreoResult<Vec<ActorPlan>> {
        let cfg = self.config;
        cfg.validate()?;
        let palette = cfg.palette_rgb()?;
        let walk = generate_curve(cfg.walk_spec())?;

        let mut plans = Vec::with_capacity(cfg.outer_count + cfg.inner_count);

        for i in 0..cfg.outer_count {
            let angle = ring_angle(i, cfg.outer_count);
            let circle = ring_point(angle, cfg.radii.outer);
            let rotation = ring_rotation(angle);
            let color_index = (i + cfg.outer_palette_offset) % palette.len();
            plans.push(ActorPlan {
                id: plans.len(),
                group: Group::Outer,
                index: i,
                angle,
                start_position: ring_point(angle, cfg.start_radius),
                circle_position: circle,
                final_position: circle,
                rotation_at_circle: rotation,
                rotation_at_final: rotation,
                base_delay: cfg.outer_base_delay,
                color_index,
                color: palette[color_index],
            });
        }

        let inner_start = cfg.start_radius - cfg.inner_start_margin;
        for i in 0..cfg.inner_count {
            let angle = ring_angle(i, cfg.inner_count);
            let t = angle + cfg.walk.phase;
            let color_index = (i + cfg.inner_palette_offset) % palette.len();
            plans.push(ActorPlan {
                id: plans.len(),
                group: Group::Inner,
                index: i,
                angle,
                start_position: ring_point(angle, inner_start),
                circle_position: ring_point(angle, cfg.radii.inner),
                final_position: walk.point_at_param(t),
                rotation_at_circle: ring_rotation(angle),
                rotation_at_final: walk.rotation_at(t),
                base_delay: cfg.inner_base_delay,
                color_index,
                color: palette[color_index],
            });
        }

        tracing::debug!(
            outer = cfg.outer_count,
            inner = cfg.inner_count,
            "planned actors"
        );
        Ok(plans)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/planner.rs"]
mod tests;
