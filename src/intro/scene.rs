use crate::{
    animation::dispose::DisposeToken,
    foundation::core::{Rgb, Vec3},
    foundation::error::ChoreoResult,
    intro::{
        choreographer::{ActorState, ActorTimeline, Phase, build_actor_timeline},
        config::IntroConfig,
        master::{Camera, MasterTimeline, SequenceHooks, build_master_timeline},
        planner::{Group, Planner},
        reveal::{RibbonReveal, build_hero_ribbon, build_ribbon_reveal},
        scroll_lock::{ScrollLock, ScrollLockGuard},
    },
    viewport::{Viewport, responsive_scale},
};

/// One actor as it appears in a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActorFrame {
    pub id: usize,
    pub group: Group,
    pub phase: Phase,
    pub state: ActorState,
}

/// Everything needed to draw one frame, in world units before `scale`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneFrame {
    pub elapsed: f64,
    pub viewport: Viewport,
    pub scale: f64,
    pub camera: Camera,
    pub actors: Vec<ActorFrame>,
    /// Centre line of the drawn part of the ribbon.
    pub ribbon: Vec<Vec3>,
    pub ribbon_color: Rgb,
    pub ribbon_fraction: f64,
}

fn ribbon_frame(ribbon: &RibbonReveal) -> (Vec<Vec3>, f64) {
    let range = ribbon.draw_range();
    let mesh = ribbon.mesh();
    (mesh.visible_spine(range).collect(), mesh.visible_fraction(range))
}

/// The opening sequence: actors, camera, ribbon and the page scroll lock.
///
/// Mounting starts every timeline at zero and engages the scroll lock.
/// The lock is released when the sequence completes or the scene is torn
/// down, whichever comes first.
#[derive(Debug)]
pub struct IntroScene {
    config: IntroConfig,
    viewport: Viewport,
    scale: f64,
    actors: Vec<ActorTimeline>,
    skipped: usize,
    master: MasterTimeline,
    ribbon: RibbonReveal,
    scroll: ScrollLockGuard,
    elapsed: f64,
    torn_down: bool,
}

impl IntroScene {
    #[tracing::instrument(skip(config, hooks, lock), fields(width = viewport.width, height = viewport.height))]
    pub fn mount(
        config: &IntroConfig,
        viewport: Viewport,
        hooks: Box<dyn SequenceHooks>,
        lock: Box<dyn ScrollLock>,
    ) -> ChoreoResult<Self> {
        config.validate()?;
        let plans = Planner::from_config(config).plan()?;

        let mut actors = Vec::with_capacity(plans.len());
        let mut skipped = 0;
        for plan in &plans {
            if !plan.is_finite() {
                tracing::warn!(id = plan.id, "skipping actor with non-finite plan");
                skipped += 1;
                continue;
            }
            match build_actor_timeline(plan, config.delay_scale, DisposeToken::new()) {
                Ok(actor) => actors.push(actor),
                Err(err) => {
                    tracing::warn!(id = plan.id, error = %err, "skipping actor");
                    skipped += 1;
                }
            }
        }

        let master = build_master_timeline(config, viewport, hooks, DisposeToken::new())?;
        let ribbon = build_ribbon_reveal(config, DisposeToken::new())?;
        let scroll = ScrollLockGuard::acquire(lock);

        tracing::info!(actors = actors.len(), skipped, "intro mounted");
        Ok(Self {
            config: config.clone(),
            viewport,
            scale: responsive_scale(viewport, config.intro_scale),
            actors,
            skipped,
            master,
            ribbon,
            scroll,
            elapsed: 0.0,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn actors(&self) -> &[ActorTimeline] {
        &self.actors
    }

    /// Actors dropped at mount because their setup failed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn master(&self) -> &MasterTimeline {
        &self.master
    }

    pub fn ribbon(&self) -> &RibbonReveal {
        &self.ribbon
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_complete(&self) -> bool {
        self.master.is_complete()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll.is_held()
    }

    /// Step every timeline by `dt` seconds. No-op after teardown.
    pub fn advance(&mut self, dt: f64) {
        if self.torn_down {
            return;
        }
        let dt = dt.max(0.0);
        self.elapsed += dt;
        for actor in &mut self.actors {
            actor.advance(dt);
        }
        self.ribbon.advance(dt);
        self.master.advance(dt);
        if self.master.is_complete() {
            self.scroll.release();
        }
    }

    /// Recompute the responsive scale and field of view.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scale = responsive_scale(viewport, self.config.intro_scale);
        self.master.resize(&self.config, viewport);
    }

    pub fn snapshot(&self) -> SceneFrame {
        let (ribbon, ribbon_fraction) = ribbon_frame(&self.ribbon);
        SceneFrame {
            elapsed: self.elapsed,
            viewport: self.viewport,
            scale: self.scale,
            camera: *self.master.camera(),
            actors: self
                .actors
                .iter()
                .map(|a| ActorFrame {
                    id: a.plan().id,
                    group: a.plan().group,
                    phase: a.phase(),
                    state: *a.state(),
                })
                .collect(),
            ribbon,
            ribbon_color: self.ribbon.color(),
            ribbon_fraction,
        }
    }

    /// Cancel every timeline and release the scroll lock.
    ///
    /// Idempotent; returns `true` only for the call that tore down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        for actor in &self.actors {
            actor.dispose();
        }
        self.ribbon.dispose();
        self.master.dispose();
        self.scroll.release();
        tracing::debug!(elapsed = self.elapsed, "intro torn down");
        true
    }
}

impl Drop for IntroScene {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The logo as it stays on the page once the intro is gone.
#[derive(Debug)]
pub struct HeroScene {
    config: IntroConfig,
    viewport: Viewport,
    camera: Camera,
    ribbon: RibbonReveal,
}

impl HeroScene {
    pub fn new(config: &IntroConfig, viewport: Viewport) -> ChoreoResult<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            viewport,
            camera: Camera::for_viewport(config, config.camera.hero_position, viewport),
            ribbon: build_hero_ribbon(config)?,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.fov_deg = Camera::fov_for(&self.config, viewport);
    }

    pub fn snapshot(&self) -> SceneFrame {
        let (ribbon, ribbon_fraction) = ribbon_frame(&self.ribbon);
        SceneFrame {
            elapsed: 0.0,
            viewport: self.viewport,
            scale: responsive_scale(self.viewport, self.config.hero_scale),
            camera: self.camera,
            actors: Vec::new(),
            ribbon,
            ribbon_color: self.ribbon.color(),
            ribbon_fraction,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/scene.rs"]
mod tests;
