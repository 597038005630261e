//! End-to-end scenarios through the [`Stage`] frame protocol.

use bgfx_fx::{Background, Command, FIELD_SIZE, Parameter, Stage};
use bgfx_render::{ColorGrid, Grid, Rgb};

const WATER: Rgb = Rgb::new(10, 20, 30);
const FOAM: Rgb = Rgb::new(40, 50, 60);

fn frame() -> ColorGrid {
    Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::BLACK)
}

fn gradient() -> ColorGrid {
    Grid::from_fn(FIELD_SIZE, FIELD_SIZE, |x, y| Rgb::new(x as u8, y as u8, 0))
}

fn all_pixels(grid: &ColorGrid, color: Rgb) -> bool {
    grid.as_slice().iter().all(|&c| c == color)
}

#[test]
fn solid_palette_image_cycles_between_entries() {
    let bg = Background::new("water", Grid::new(FIELD_SIZE, FIELD_SIZE, WATER))
        .unwrap()
        .with_palette(vec![WATER, FOAM], 2, false);
    let mut stage = Stage::new(vec![bg], 0);
    let mut out = frame();

    assert!(stage.render(&mut out));
    assert!(all_pixels(&out, WATER));

    // Interval is 0.5s; 0.6s elapses across two frames.
    stage.end_frame(0.3);
    stage.render(&mut out);
    assert!(all_pixels(&out, WATER));
    stage.end_frame(0.3);

    stage.render(&mut out);
    assert!(all_pixels(&out, FOAM));

    stage.end_frame(0.6);
    stage.render(&mut out);
    assert!(all_pixels(&out, WATER));
}

#[test]
fn scroll_speed_moves_the_image_each_frame() {
    let bg = Background::new("grad", gradient()).unwrap();
    let mut stage = Stage::new(vec![bg], 0);
    // ScrollSpeedH is selected first.
    assert_eq!(stage.snapshot().selected, Parameter::ScrollSpeedH);
    for _ in 0..3 {
        stage.apply(Command::IncreaseParameter);
    }

    let mut out = frame();
    for expected_shift in [0u8, 3, 6] {
        stage.render(&mut out);
        assert_eq!(out.at(0, 0), Rgb::new(expected_shift, 0, 0));
        stage.end_frame(1.0 / 60.0);
    }
}

#[test]
fn negative_vertical_scroll_wraps() {
    let bg = Background::new("grad", gradient()).unwrap();
    let mut stage = Stage::new(vec![bg], 0);
    stage.apply(Command::NextParameter);
    stage.apply(Command::DecreaseParameter);

    let mut out = frame();
    stage.render(&mut out);
    stage.end_frame(0.01);
    stage.render(&mut out);
    assert_eq!(out.at(0, 0), Rgb::new(0, 255, 0));
}

#[test]
fn wave_distorts_once_factor_is_raised() {
    let bg = Background::new("grad", gradient()).unwrap();
    let mut stage = Stage::new(vec![bg], 0);
    for _ in 0..6 {
        stage.apply(Command::NextParameter);
    }
    assert_eq!(stage.snapshot().selected, Parameter::ScanlineFactorX);
    for _ in 0..400 {
        stage.apply(Command::IncreaseParameter);
    }

    let mut out = frame();
    stage.render(&mut out);
    assert_ne!(out, gradient());
}

#[test]
fn switching_images_preserves_each_palette_offset() {
    let animated = Background::new("a", Grid::new(FIELD_SIZE, FIELD_SIZE, WATER))
        .unwrap()
        .with_palette(vec![WATER, FOAM], 10, false);
    let still = Background::new("b", gradient()).unwrap();
    let mut stage = Stage::new(vec![animated, still], 0);

    stage.end_frame(0.2);
    assert_eq!(stage.snapshot().palette_offset, Some(1));

    stage.apply(Command::NextImage);
    stage.end_frame(0.2);
    assert_eq!(stage.snapshot().palette_offset, Some(0));

    stage.apply(Command::NextImage);
    assert_eq!(stage.snapshot().palette_offset, Some(1));
    assert_eq!(stage.palette_swatches(), vec![FOAM, WATER]);
}

#[test]
fn quit_stops_the_stage() {
    let mut stage = Stage::new(Vec::new(), 0);
    assert!(stage.is_running());
    stage.apply(Command::Quit);
    assert!(!stage.is_running());
}
