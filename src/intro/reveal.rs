use crate::{
    animation::{
        dispose::DisposeToken,
        timeline::{Channel, ChannelSink, Timeline},
    },
    foundation::core::Rgb,
    foundation::error::ChoreoResult,
    geometry::{curve::generate_curve, tube::TubeMesh},
    intro::config::IntroConfig,
};

/// The figure-eight ribbon, drawn progressively by growing its index draw range.
#[derive(Debug)]
pub struct RibbonReveal {
    mesh: TubeMesh,
    color: Rgb,
    timeline: Timeline,
    draw_range: usize,
}

struct DrawRangeSink<'a>(&'a mut usize);

impl ChannelSink for DrawRangeSink<'_> {
    fn write(&mut self, channel: Channel, value: f64) {
        if channel == Channel::DrawRange {
            // Partial triangles are never drawn.
            *self.0 = value.max(0.0).floor() as usize;
        }
    }
}

impl RibbonReveal {
    pub fn mesh(&self) -> &TubeMesh {
        &self.mesh
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn draw_range(&self) -> usize {
        self.draw_range
    }

    pub fn is_fully_drawn(&self) -> bool {
        self.draw_range >= self.mesh.index_count()
    }

    pub fn token(&self) -> &DisposeToken {
        self.timeline.token()
    }

    pub fn advance(&mut self, dt: f64) {
        self.timeline
            .advance(dt, &mut DrawRangeSink(&mut self.draw_range));
    }

    pub fn dispose(&self) -> bool {
        self.timeline.dispose()
    }
}

/// Build the logo tube and its reveal, starting hidden.
pub fn build_ribbon_reveal(config: &IntroConfig, token: DisposeToken) -> ChoreoResult<RibbonReveal> {
    let logo = &config.logo;
    let curve = generate_curve(config.logo_spec())?;
    let mesh = TubeMesh::build(
        &curve,
        logo.tubular_segments,
        logo.tube_radius,
        logo.radial_segments,
    )?;
    let color = Rgb::from_hex(&logo.color)?;

    let mut b = Timeline::builder();
    b.from_to(
        Channel::DrawRange,
        0.0,
        mesh.index_count() as f64,
        logo.reveal_at,
        logo.reveal_duration,
        logo.reveal_ease,
    );
    let mut timeline = b.build(token);
    let mut draw_range = 0;
    timeline.seek(0.0, &mut DrawRangeSink(&mut draw_range));

    Ok(RibbonReveal {
        mesh,
        color,
        timeline,
        draw_range,
    })
}

/// Fully drawn ribbon for the persistent hero view.
pub fn build_hero_ribbon(config: &IntroConfig) -> ChoreoResult<RibbonReveal> {
    let mut ribbon = build_ribbon_reveal(config, DisposeToken::new())?;
    ribbon.draw_range = ribbon.mesh.index_count();
    ribbon.dispose();
    Ok(ribbon)
}
