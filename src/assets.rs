//! Writing the icon set: PNG batches, the ICO file and the ICNS file.

use crate::error::{BuildError, BuildResult};
use crate::family::IconFamily;
use crate::icondir::{IconDir, IconDirEntry};
use crate::iconimage::IconImage;
use crate::ostype::{IconType, OSType};
use crate::plan::BuildPlan;
use crate::tables::SizeTable;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

//===========================================================================//

/// One PNG file written by [`emit_pngs`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EmittedFile {
    /// Where the file was written.
    pub path: PathBuf,
    /// Edge length of the (square) image, in pixels.
    pub size: u32,
    /// Size of the file, in bytes.
    pub bytes: u64,
}

/// One ICO or ICNS file written by [`emit_ico`] or [`emit_icns`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EmittedContainer {
    /// Where the file was written.
    pub path: PathBuf,
    /// Edge length of each entry, in file order.
    pub sizes: Vec<u32>,
    /// Size of the file, in bytes.
    pub bytes: u64,
}

/// The PNG files written for one batch of a plan.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct BatchReport {
    /// The batch's label.
    pub label: String,
    /// Files in table order.
    pub files: Vec<EmittedFile>,
}

/// Everything a completed run produced.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Summary {
    /// PNG batches, in plan order.
    pub batches: Vec<BatchReport>,
    /// The Windows icon.
    pub ico: EmittedContainer,
    /// The macOS icon.
    pub icns: EmittedContainer,
}

impl fmt::Display for Summary {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        writeln!(out, "Summary:")?;
        for batch in &self.batches {
            writeln!(out, "   - {}: {} files", batch.label, batch.files.len())?;
        }
        writeln!(out, "   - Windows ICO: 1 file ({} sizes)", self.ico.sizes.len())?;
        write!(out, "   - macOS ICNS: 1 file ({} sizes)", self.icns.sizes.len())
    }
}

//===========================================================================//

/// Runs the whole plan: loads the source, then writes every PNG batch, the
/// ICO file and the ICNS file, in that order.  Nothing is written if the
/// source is missing or can't be decoded.  Files written before a later
/// failure are left in place.
pub fn generate(plan: &BuildPlan) -> BuildResult<Summary> {
    let image = load_source(&plan.source)?;
    for dir in plan.output_dirs() {
        fs::create_dir_all(dir).map_err(BuildError::io_at(dir))?;
    }
    let mut batches = Vec::with_capacity(plan.png_batches.len());
    for batch in &plan.png_batches {
        info!(label = batch.label, dir = %batch.dir.display(), "generating PNG icons");
        let files = emit_pngs(&image, batch.table, &batch.dir)?;
        batches.push(BatchReport { label: batch.label.to_string(), files });
    }
    let ico = emit_ico(&image, plan.ico_sizes, &plan.ico_path)?;
    let icns = emit_icns(&image, plan.icns_types, &plan.icns_path)?;
    info!("all icons generated");
    Ok(Summary { batches, ico, icns })
}

/// Decodes the source image and converts it to RGBA.
pub fn load_source(path: &Path) -> BuildResult<IconImage> {
    if !path.exists() {
        return Err(BuildError::SourceMissing(path.to_path_buf()));
    }
    let decoded = image::open(path).map_err(|source| BuildError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "loaded source image"
    );
    IconImage::from_rgba_image(decoded.to_rgba8())
        .map_err(BuildError::io_at(path))
}

/// Writes one resized PNG per table entry into `dir`, creating `dir` first
/// if needed.
pub fn emit_pngs(
    image: &IconImage,
    table: &SizeTable,
    dir: &Path,
) -> BuildResult<Vec<EmittedFile>> {
    fs::create_dir_all(dir).map_err(BuildError::io_at(dir))?;
    let mut files = Vec::with_capacity(table.len());
    for &(name, size) in table {
        let path = dir.join(name);
        let resized = image.resized(size).map_err(BuildError::io_at(&path))?;
        let bytes = write_encoded(&path, |data| resized.write_png(data))?;
        info!(file = name, size, bytes, "wrote PNG");
        files.push(EmittedFile { path, size, bytes });
    }
    Ok(files)
}

/// Writes an ICO file holding one PNG-encoded entry per size, in order.
pub fn emit_ico(
    image: &IconImage,
    sizes: &[u32],
    path: &Path,
) -> BuildResult<EmittedContainer> {
    let mut icondir = IconDir::new();
    for &size in sizes {
        let resized = image.resized(size).map_err(BuildError::io_at(path))?;
        let entry =
            IconDirEntry::encode(&resized).map_err(BuildError::io_at(path))?;
        debug!(size, bits_per_pixel = entry.bits_per_pixel(), "encoded ICO entry");
        icondir.add_entry(entry);
    }
    let bytes = write_encoded(path, |data| icondir.write(data))?;
    info!(path = %path.display(), entries = sizes.len(), bytes, "wrote ICO");
    Ok(EmittedContainer { path: path.to_path_buf(), sizes: sizes.to_vec(), bytes })
}

/// Writes an ICNS file holding one PNG element per table entry, in order.
/// Each entry's type code must name a PNG icon type of exactly that size.
pub fn emit_icns(
    image: &IconImage,
    table: &SizeTable,
    path: &Path,
) -> BuildResult<EmittedContainer> {
    let mut family = IconFamily::new();
    for &(code, size) in table {
        let icon_type =
            icns_type_for(code, size).map_err(BuildError::io_at(path))?;
        let resized = image.resized(size).map_err(BuildError::io_at(path))?;
        family
            .add_icon_with_type(&resized, icon_type)
            .map_err(BuildError::io_at(path))?;
        debug!(ostype = code, size, "encoded ICNS element");
    }
    let bytes = write_encoded(path, |data| family.write(data))?;
    info!(path = %path.display(), entries = table.len(), bytes, "wrote ICNS");
    let sizes = table.iter().map(|&(_, size)| size).collect();
    Ok(EmittedContainer { path: path.to_path_buf(), sizes, bytes })
}

//===========================================================================//

fn icns_type_for(code: &str, size: u32) -> io::Result<IconType> {
    let ostype = match OSType::from_str(code) {
        Ok(ostype) => ostype,
        Err(message) => invalid_input!(message),
    };
    let icon_type = match IconType::from_ostype(ostype) {
        Some(icon_type) => icon_type,
        None => invalid_input!("'{}' is not a PNG icon type", ostype),
    };
    if icon_type.pixel_size() != size {
        invalid_input!(
            "'{}' icons are {} pixels, not {}",
            ostype,
            icon_type.pixel_size(),
            size
        );
    }
    Ok(icon_type)
}

// Encodes into memory, then writes the file in one call.  Returns the number
// of bytes written.
fn write_encoded<F>(path: &Path, encode: F) -> BuildResult<u64>
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut data = Vec::new();
    encode(&mut data).map_err(BuildError::io_at(path))?;
    fs::write(path, &data).map_err(BuildError::io_at(path))?;
    Ok(data.len() as u64)
}

//===========================================================================//


//===========================================================================//
