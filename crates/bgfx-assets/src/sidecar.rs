#![forbid(unsafe_code)]

//! JSON palette sidecar.
//!
//! A background `water.bmp` may be accompanied by `water.json`:
//!
//! ```json
//! {
//!   "palette": {
//!     "colors": [[10, 20, 30], [40, 50, 60]],
//!     "cycleRate": 2,
//!     "pingPong": true
//!   }
//! }
//! ```
//!
//! `cycleRate` defaults to 0 and `pingPong` to `false`; `pingPong` also
//! accepts `0`/`1`. Unknown keys are ignored.

use std::fmt;

use bgfx_render::Rgb;
use serde::Deserialize;

use crate::error::PaletteProblem;

/// A validated palette description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSpec {
    pub colors: Vec<Rgb>,
    pub cycle_rate: u32,
    pub ping_pong: bool,
}

/// What a parsed sidecar says about the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarPalette {
    /// A usable palette.
    Palette(PaletteSpec),
    /// No `palette` section.
    MissingSection,
    /// A `palette` section without colors.
    NoColors,
}

/// Sidecar parse failure, before a file path is attached.
#[derive(Debug)]
pub enum SidecarError {
    Json(serde_json::Error),
    Palette(PaletteProblem),
}

impl From<serde_json::Error> for SidecarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<PaletteProblem> for SidecarError {
    fn from(problem: PaletteProblem) -> Self {
        Self::Palette(problem)
    }
}

impl fmt::Display for SidecarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "sidecar parse error: {err}"),
            Self::Palette(problem) => write!(f, "sidecar palette error: {problem}"),
        }
    }
}

impl std::error::Error for SidecarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Palette(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SidecarFile {
    palette: Option<PaletteSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaletteSection {
    #[serde(default)]
    colors: Vec<Vec<i64>>,
    cycle_rate: Option<i64>,
    #[serde(default)]
    ping_pong: Flag,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum Flag {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Absent => false,
            Flag::Bool(b) => *b,
            Flag::Int(n) => *n != 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse and validate sidecar text.
///
/// # Errors
///
/// Malformed JSON, a color without exactly three components, a component
/// outside `0..=255`, or a `cycleRate` outside `0..=u32::MAX`.
pub fn parse_sidecar(text: &str) -> Result<SidecarPalette, SidecarError> {
    let file: SidecarFile = serde_json::from_str(text)?;
    let Some(section) = file.palette else {
        return Ok(SidecarPalette::MissingSection);
    };

    let colors = section
        .colors
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_color(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let cycle_rate = match section.cycle_rate {
        None => 0,
        Some(rate) if rate < 0 => return Err(PaletteProblem::NegativeCycleRate(rate).into()),
        Some(rate) => u32::try_from(rate).map_err(|_| PaletteProblem::CycleRateTooLarge(rate))?,
    };

    if colors.is_empty() {
        return Ok(SidecarPalette::NoColors);
    }

    Ok(SidecarPalette::Palette(PaletteSpec {
        colors,
        cycle_rate,
        ping_pong: section.ping_pong.is_set(),
    }))
}

fn parse_color(index: usize, entry: &[i64]) -> Result<Rgb, PaletteProblem> {
    let [r, g, b] = entry else {
        return Err(PaletteProblem::Arity {
            index,
            len: entry.len(),
        });
    };
    let channel = |value: i64| {
        u8::try_from(value).map_err(|_| PaletteProblem::Component { index, value })
    };
    Ok(Rgb::new(channel(*r)?, channel(*g)?, channel(*b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sidecar() {
        let parsed = parse_sidecar(
            r#"{"palette": {"colors": [[10,20,30],[40,50,60]], "cycleRate": 2, "pingPong": true}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            SidecarPalette::Palette(PaletteSpec {
                colors: vec![Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)],
                cycle_rate: 2,
                ping_pong: true,
            })
        );
    }

    #[test]
    fn defaults_for_rate_and_mode() {
        let SidecarPalette::Palette(spec) =
            parse_sidecar(r#"{"palette": {"colors": [[1,2,3]]}}"#).unwrap()
        else {
            panic!("expected palette");
        };
        assert_eq!(spec.cycle_rate, 0);
        assert!(!spec.ping_pong);
    }

    #[test]
    fn ping_pong_accepts_integers() {
        let on = parse_sidecar(r#"{"palette": {"colors": [[1,2,3]], "pingPong": 1}}"#).unwrap();
        let off = parse_sidecar(r#"{"palette": {"colors": [[1,2,3]], "pingPong": 0}}"#).unwrap();
        assert!(matches!(on, SidecarPalette::Palette(PaletteSpec { ping_pong: true, .. })));
        assert!(matches!(off, SidecarPalette::Palette(PaletteSpec { ping_pong: false, .. })));
    }

    #[test]
    fn missing_section_and_empty_colors() {
        assert_eq!(parse_sidecar(r#"{"other": 1}"#).unwrap(), SidecarPalette::MissingSection);
        assert_eq!(
            parse_sidecar(r#"{"palette": {"cycleRate": 4}}"#).unwrap(),
            SidecarPalette::NoColors
        );
        assert_eq!(
            parse_sidecar(r#"{"palette": {"colors": []}}"#).unwrap(),
            SidecarPalette::NoColors
        );
    }

    #[test]
    fn rejects_out_of_range_component() {
        let err = parse_sidecar(r#"{"palette": {"colors": [[1,2,3],[0,256,0]]}}"#).unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Palette(PaletteProblem::Component { index: 1, value: 256 })
        ));
    }

    #[test]
    fn rejects_negative_component() {
        let err = parse_sidecar(r#"{"palette": {"colors": [[-1,2,3]]}}"#).unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Palette(PaletteProblem::Component { index: 0, value: -1 })
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = parse_sidecar(r#"{"palette": {"colors": [[1,2]]}}"#).unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Palette(PaletteProblem::Arity { index: 0, len: 2 })
        ));
    }

    #[test]
    fn rejects_negative_rate() {
        let err = parse_sidecar(r#"{"palette": {"colors": [[1,2,3]], "cycleRate": -3}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Palette(PaletteProblem::NegativeCycleRate(-3))
        ));
    }

    #[test]
    fn rejects_oversized_rate() {
        let err = parse_sidecar(r#"{"palette": {"colors": [[1,2,3]], "cycleRate": 4294967296}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SidecarError::Palette(PaletteProblem::CycleRateTooLarge(4_294_967_296))
        ));
        let max = parse_sidecar(r#"{"palette": {"colors": [[1,2,3]], "cycleRate": 4294967295}}"#)
            .unwrap();
        assert!(matches!(max, SidecarPalette::Palette(spec) if spec.cycle_rate == u32::MAX));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_sidecar("{palette: ").unwrap_err();
        assert!(matches!(err, SidecarError::Json(_)));
        assert!(err.to_string().starts_with("sidecar parse error"));
    }

    #[test]
    fn rejects_non_numeric_color() {
        assert!(matches!(
            parse_sidecar(r#"{"palette": {"colors": [["a",2,3]]}}"#),
            Err(SidecarError::Json(_))
        ));
    }
}
