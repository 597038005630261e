#![forbid(unsafe_code)]

//! Screen composition: parameter panel on the left, the warped image on the
//! right with its palette strip underneath.

use bgfx_fx::{ParamSnapshot, ParamValue, Parameter};
use bgfx_render::surface::half_block_footprint;
use bgfx_render::{ColorGrid, Rgb, Surface};

/// Width of the parameter panel in cells.
pub const PANEL_COLS: u16 = 32;

const TEXT: Rgb = Rgb::new(200, 200, 200);
const SELECTED: Rgb = Rgb::new(255, 220, 80);
const DIM: Rgb = Rgb::new(120, 120, 120);
const BACKDROP: Rgb = Rgb::BLACK;

const NO_IMAGES: &str = "No images!";

const HELP_LINES: [&str; 8] = [
    "ESC/q     quit",
    "] / [     next/prev image",
    "Up/Down   select parameter",
    "Right     increase",
    "Left      decrease",
    "r         randomize",
    "Space     reset",
    "p         dump colors to log",
];

/// One line of the parameter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub text: String,
    pub selected: bool,
}

impl PanelLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
        }
    }
}

/// Format a tunable with the precision it is edited at.
pub fn format_value(param: Parameter, value: ParamValue) -> String {
    match (param, value) {
        (_, ParamValue::Int(n)) => n.to_string(),
        (Parameter::ScanlineFactorDeltaX | Parameter::ScanlineFactorDeltaY, ParamValue::Float(v)) => {
            format!("{v:.4}")
        }
        (_, ParamValue::Float(v)) => format!("{v:.2}"),
    }
}

/// Text of the parameter panel, top to bottom.
pub fn panel_lines(snapshot: &ParamSnapshot, fps: u32, show_help: bool) -> Vec<PanelLine> {
    let motion = snapshot.motion.unwrap_or_default();
    let mut lines = vec![
        PanelLine::plain(format!("AngleX: {:.2}", snapshot.state.angle_x)),
        PanelLine::plain(format!("AngleY: {:.2}", snapshot.state.angle_y)),
        PanelLine::plain(format!("ScrollPosX: {}", motion.scroll_pos_x)),
        PanelLine::plain(format!("ScrollPosY: {}", motion.scroll_pos_y)),
        PanelLine::plain(format!("ScanlineOffsetX: {}", motion.scanline_offset_x)),
        PanelLine::plain(format!("ScanlineOffsetY: {}", motion.scanline_offset_y)),
        PanelLine::plain(format!(
            "PaletteIndexOffset: {}",
            snapshot.palette_offset.unwrap_or(0)
        )),
        PanelLine::plain(""),
    ];

    for param in Parameter::ALL {
        let selected = param == snapshot.selected;
        let marker = if selected { '>' } else { ' ' };
        lines.push(PanelLine {
            text: format!(
                "{marker} {param}: {}",
                format_value(param, snapshot.value(param))
            ),
            selected,
        });
    }

    lines.push(PanelLine::plain(""));
    let image = match snapshot.image_index {
        Some(i) => format!("Image: {}/{}", i + 1, snapshot.image_count),
        None => format!("Image: -/{}", snapshot.image_count),
    };
    lines.push(PanelLine::plain(image));
    if let Some(name) = &snapshot.image_name {
        lines.push(PanelLine::plain(name.clone()));
    }
    lines.push(PanelLine::plain(format!("FPS: {fps}")));
    lines.push(PanelLine::plain("'h' - toggle help"));

    if show_help {
        lines.push(PanelLine::plain(""));
        lines.extend(HELP_LINES.iter().map(|l| PanelLine::plain(*l)));
    }
    lines
}

/// Smallest pixel step at which a `width` x `height` image fits in
/// `cols` x `rows` cells.
pub fn fit_step(cols: u16, rows: u16, width: usize, height: usize) -> usize {
    let largest = width.max(height).max(1);
    (1..=largest)
        .find(|&step| {
            let (c, r) = half_block_footprint(width, height, step);
            c <= cols && r <= rows
        })
        .unwrap_or(largest)
}

/// Everything the overlay needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub snapshot: &'a ParamSnapshot,
    /// Rendered frame, `None` when there are no images.
    pub frame: Option<&'a ColorGrid>,
    /// Active palette rotated by the current offset.
    pub swatches: &'a [Rgb],
    pub fps: u32,
    pub show_help: bool,
    /// Pixel step, 0 = fit.
    pub scale: usize,
}

/// Compose a full screen into `surface`.
pub fn draw(surface: &mut Surface, view: &View<'_>) {
    surface.clear();
    let Some(frame) = view.frame else {
        draw_no_images(surface);
        return;
    };

    for (row, line) in panel_lines(view.snapshot, view.fps, view.show_help)
        .iter()
        .enumerate()
    {
        let fg = if line.selected { SELECTED } else { TEXT };
        surface.put_str(0, row as u16, &line.text, fg, BACKDROP);
    }

    let image_col = PANEL_COLS.min(surface.cols());
    let avail_cols = surface.cols().saturating_sub(image_col);
    // One row is kept for the palette strip.
    let avail_rows = surface.rows().saturating_sub(1);
    if avail_cols == 0 || avail_rows == 0 {
        return;
    }
    let (w, h) = frame.dims();
    let step = match view.scale {
        0 => fit_step(avail_cols, avail_rows, w, h),
        n => n,
    };
    let (img_cols, img_rows) = surface.blit_half_blocks(frame, image_col, 0, step);
    draw_swatches(surface, image_col, img_rows, img_cols, view.swatches);
}

fn draw_swatches(surface: &mut Surface, col: u16, row: u16, width: u16, swatches: &[Rgb]) {
    if swatches.is_empty() || width == 0 {
        return;
    }
    let count = swatches.len().min(width as usize) as u16;
    let cell = (width / count).max(1);
    for (i, color) in swatches.iter().take(count as usize).enumerate() {
        surface.fill_rect(col + i as u16 * cell, row, cell, 1, *color);
    }
    if swatches.len() > count as usize {
        surface.put_str_right(col + width, row.saturating_add(1), "...", DIM, BACKDROP);
    }
}

fn draw_no_images(surface: &mut Surface) {
    let len = NO_IMAGES.chars().count() as u16;
    let col = surface.cols().saturating_sub(len) / 2;
    let row = surface.rows() / 2;
    surface.put_str(col, row, NO_IMAGES, TEXT, BACKDROP);
}
