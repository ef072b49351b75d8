use super::*;
use crate::{
    intro::{
        config::IntroConfig,
        master::NoHooks,
        scene::{HeroScene, IntroScene},
        scroll_lock::NoScrollLock,
    },
    viewport::Viewport,
};

fn small() -> PreviewOpts {
    PreviewOpts {
        width: 320,
        height: 180,
        ..PreviewOpts::default()
    }
}

fn non_background(img: &RgbaImage) -> usize {
    let bg = Rgba(BACKGROUND.to_rgba8(1.0));
    img.pixels().filter(|p| **p != bg).count()
}

#[test]
fn projection_centres_the_look_at_target() {
    let camera = Camera::new(Vec3::new(0.0, 16.0, 26.0), 40.0);
    let proj = Projector::new(&camera, 320, 180);
    let (p, depth) = proj.project(Vec3::ZERO).unwrap();
    assert!((p.x - 160.0).abs() < 1e-9);
    assert!((p.y - 90.0).abs() < 1e-9);
    assert!((depth - camera.position.length()).abs() < 1e-9);

    // Behind the camera.
    assert!(proj.project(Vec3::new(0.0, 32.0, 52.0)).is_none());
}

#[test]
fn hero_frame_draws_the_logo() {
    let hero = HeroScene::new(&IntroConfig::default(), Viewport::new(1280, 720)).unwrap();
    let img = render_preview(&hero.snapshot(), &small()).unwrap();
    assert_eq!(img.dimensions(), (320, 180));
    assert!(non_background(&img) > 100);
}

#[test]
fn mounted_scene_shows_actors_but_no_ribbon() {
    let scene = IntroScene::mount(
        &IntroConfig::default(),
        Viewport::new(1280, 720),
        Box::new(NoHooks),
        Box::new(NoScrollLock),
    )
    .unwrap();
    let frame = scene.snapshot();
    assert!(frame.ribbon.is_empty());
    let img = render_preview(&frame, &small()).unwrap();
    assert!(non_background(&img) > 0);
}

#[test]
fn empty_frame_is_plain_background() {
    let hero = HeroScene::new(&IntroConfig::default(), Viewport::new(1280, 720)).unwrap();
    let mut frame = hero.snapshot();
    frame.ribbon.clear();
    let img = render_preview(&frame, &small()).unwrap();
    assert_eq!(non_background(&img), 0);
}

#[test]
fn zero_sized_previews_are_rejected() {
    let hero = HeroScene::new(&IntroConfig::default(), Viewport::new(1280, 720)).unwrap();
    let opts = PreviewOpts {
        width: 0,
        ..PreviewOpts::default()
    };
    assert!(render_preview(&hero.snapshot(), &opts).is_err());
}

#[test]
fn segments_are_clipped_to_the_canvas() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let (a, b) = clip_segment(Point::new(-1.0e7, 25.0), Point::new(1.0e7, 25.0), rect).unwrap();
    assert!((a.x - 0.0).abs() < 1e-6 && (b.x - 100.0).abs() < 1e-6);
    assert_eq!((a.y, b.y), (25.0, 25.0));

    // Fully inside is untouched.
    let inside = (Point::new(10.0, 10.0), Point::new(20.0, 30.0));
    assert_eq!(clip_segment(inside.0, inside.1, rect), Some(inside));

    // Misses: off to one side, and a diagonal that passes the corner.
    assert!(clip_segment(Point::new(-50.0, 10.0), Point::new(-5.0, 40.0), rect).is_none());
    assert!(clip_segment(Point::new(-20.0, 10.0), Point::new(10.0, -20.0), rect).is_none());
}

#[test]
fn far_off_canvas_strokes_only_touch_visible_pixels() {
    let mut canvas = Canvas::new(&small());
    let white = Rgb::new(1.0, 1.0, 1.0);
    canvas.segment(
        Point::new(-1.0e7, 90.0),
        Point::new(1.0e7, 90.0),
        1.0,
        white,
        1.0,
    );
    let img = &canvas.img;
    assert_eq!(img.get_pixel(0, 90).0, white.to_rgba8(1.0));
    assert_eq!(img.get_pixel(319, 90).0, white.to_rgba8(1.0));
    assert_eq!(non_background(img), 320 * 2);

    // Entirely off-screen leaves the canvas alone.
    let mut canvas = Canvas::new(&small());
    canvas.segment(Point::new(-1.0e7, -5.0e6), Point::new(-2.0e6, -1.0e6), 400.0, white, 1.0);
    assert_eq!(non_background(&canvas.img), 0);
}

#[test]
fn save_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target").join("preview_save").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("bg.png");
    let img = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
    save_png(&img, &path).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (4, 3));
}
