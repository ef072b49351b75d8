use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use choreo::{
    Countdown, CountdownConfig, Fps, HeroScene, IntroConfig, IntroScene, NoScrollLock,
    PreviewOpts, SequenceHooks, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "choreo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every actor plan as JSON.
    Plan(PlanArgs),
    /// Render one intro frame (or the hero logo) as a PNG.
    Frame(FrameArgs),
    /// Play the intro headless at a fixed frame rate, logging its cues.
    Run(RunArgs),
    /// Print the time left before the festival.
    Countdown(CountdownArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Intro config JSON; defaults to the shipped sequence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds since mount.
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render the persistent logo framing instead of the intro.
    #[arg(long)]
    hero: bool,

    #[arg(long, default_value_t = 960)]
    width: u32,

    #[arg(long, default_value_t = 540)]
    height: u32,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Viewport width in CSS pixels; below 768 counts as compact.
    #[arg(long, default_value_t = 1440)]
    viewport_width: u32,

    #[arg(long, default_value_t = 900)]
    viewport_height: u32,

    /// Tear the scene down after this many seconds, before it completes.
    #[arg(long)]
    cancel_at: Option<f64>,
}

#[derive(Parser, Debug)]
struct CountdownArgs {
    /// Countdown config JSON; defaults to the festival date.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference time (RFC 3339); defaults to the current UTC time.
    #[arg(long)]
    now: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
        Command::Countdown(args) => cmd_countdown(args),
    }
}

fn read_intro_config(path: Option<&Path>) -> anyhow::Result<IntroConfig> {
    let Some(path) = path else {
        return Ok(IntroConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read intro config '{}'", path.display()))?;
    IntroConfig::from_json_str(&s).with_context(|| format!("parse intro config '{}'", path.display()))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = read_intro_config(args.config.as_deref())?;
    let plans = choreo::Planner::from_config(&config).plan()?;
    println!("{}", serde_json::to_string_pretty(&plans)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_intro_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height);

    let frame = if args.hero {
        HeroScene::new(&config, viewport)?.snapshot()
    } else {
        let mut scene = IntroScene::mount(
            &config,
            viewport,
            Box::new(LogHooks),
            Box::new(NoScrollLock),
        )?;
        scene.advance(args.t);
        scene.snapshot()
    };

    let opts = PreviewOpts {
        width: args.width,
        height: args.height,
        ..PreviewOpts::default()
    };
    let img = choreo::render_preview(&frame, &opts)?;

    choreo::save_png(&img, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

struct LogHooks;

impl SequenceHooks for LogHooks {
    fn on_phase_start(&mut self) {
        tracing::info!("fade to page started");
    }

    fn on_sequence_complete(&mut self) {
        tracing::info!("sequence complete");
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = read_intro_config(args.config.as_deref())?;
    let fps = Fps::new(args.fps, 1)?;
    let viewport = Viewport::new(args.viewport_width, args.viewport_height);

    let mut scene = IntroScene::mount(&config, viewport, Box::new(LogHooks), Box::new(NoScrollLock))?;
    let dt = fps.frame_duration_secs();
    let budget = fps.secs_to_frames_ceil(config.complete_at + 1.0);

    let mut frames = 0u64;
    while frames < budget && !scene.is_complete() {
        if args.cancel_at.is_some_and(|at| scene.elapsed() >= at) {
            tracing::info!(elapsed = scene.elapsed(), "cancelling");
            break;
        }
        scene.advance(dt);
        frames += 1;
    }
    scene.teardown();

    let finished = scene.actors().iter().filter(|a| a.is_finished()).count();
    println!(
        "frames={frames} elapsed={:.3}s complete={} actors={} finished={finished} skipped={}",
        scene.elapsed(),
        scene.is_complete(),
        scene.actors().len(),
        scene.skipped(),
    );
    Ok(())
}

fn cmd_countdown(args: CountdownArgs) -> anyhow::Result<()> {
    let config = match args.config {
        Some(path) => {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("read countdown config '{}'", path.display()))?;
            CountdownConfig::from_json_str(&s)
                .with_context(|| format!("parse countdown config '{}'", path.display()))?
        }
        None => CountdownConfig::default(),
    };
    let now = match args.now {
        Some(s) => time::OffsetDateTime::parse(&s, &time::format_description::well_known::Rfc3339)
            .with_context(|| format!("parse --now '{s}'"))?,
        None => time::OffsetDateTime::now_utc(),
    };

    let countdown = Countdown::new(config, now)?;
    let left = countdown.time_left();
    println!(
        "days={} ({}d {:02}h {:02}m {:02}s)",
        countdown.target_days(),
        left.days,
        left.hours,
        left.minutes,
        left.seconds,
    );
    Ok(())
}
