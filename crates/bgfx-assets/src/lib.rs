#![forbid(unsafe_code)]

//! Loading backgrounds from disk.
//!
//! [`discover`] scans a directory for `*.bmp` files, decodes each one and
//! attaches the palette from its JSON sidecar when present. Rejected files are
//! logged and skipped so a single bad asset never stops the others loading.

pub mod error;
pub mod loader;
pub mod sidecar;

pub use error::{AssetError, PaletteProblem};
pub use loader::{IMAGE_EXTENSION, decode_pixels, discover, load_background, sidecar_path};
pub use sidecar::{PaletteSpec, SidecarError, SidecarPalette, parse_sidecar};
