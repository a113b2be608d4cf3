//! Generates the Xmarkdown application icon set from one source image.
//!
//! A run loads `src-tauri/icons/Xmarkdown.png`, writes resized PNG copies
//! for the Tauri bundler, the Windows Store and the web frontend, and packs
//! selected sizes into a Windows `.ico` and a macOS `.icns` file.  The
//! container codecs ([`IconDir`], [`IconFamily`]) can also read those files
//! back.
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) and
//! https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file formats.

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod assets;
mod error;
mod family;
mod icondir;
mod iconimage;
mod ostype;
mod plan;
pub mod tables;

pub use crate::assets::{
    emit_icns, emit_ico, emit_pngs, generate, load_source, BatchReport,
    EmittedContainer, EmittedFile, Summary,
};
pub use crate::error::{BuildError, BuildResult};
pub use crate::family::{IconElement, IconFamily};
pub use crate::icondir::{IconDir, IconDirEntry};
pub use crate::iconimage::IconImage;
pub use crate::ostype::{IconType, OSType};
pub use crate::plan::{BuildPlan, PngBatch, ICONS_DIR, PUBLIC_DIR, SOURCE_FILE};
