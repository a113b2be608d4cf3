use crate::tables::{self, SizeTable};
use std::path::{Path, PathBuf};

//===========================================================================//

/// Location of the source artwork, relative to the project root.
pub const SOURCE_FILE: &str = "src-tauri/icons/Xmarkdown.png";

/// Directory receiving the bundler icons and the ICO/ICNS containers.
pub const ICONS_DIR: &str = "src-tauri/icons";

/// Directory receiving the web frontend icons.
pub const PUBLIC_DIR: &str = "public";

const ICO_FILE: &str = "icon.ico";
const ICNS_FILE: &str = "icon.icns";

//===========================================================================//

/// One table of PNG files to write into one directory.
#[derive(Clone, Debug)]
pub struct PngBatch {
    /// Human-readable name used in logs and the run summary.
    pub label: &'static str,
    /// File name and edge length of each PNG.
    pub table: &'static SizeTable,
    /// Directory the files are written into.
    pub dir: PathBuf,
}

/// Everything one run reads and writes, resolved against a project root.
#[derive(Clone, Debug)]
pub struct BuildPlan {
    /// The source image.
    pub source: PathBuf,
    /// PNG batches, in the order they are generated.
    pub png_batches: Vec<PngBatch>,
    /// Sizes packed into the ICO file.
    pub ico_sizes: &'static [u32],
    /// Output path of the ICO file.
    pub ico_path: PathBuf,
    /// Type codes and sizes packed into the ICNS file.
    pub icns_types: &'static SizeTable,
    /// Output path of the ICNS file.
    pub icns_path: PathBuf,
}

impl BuildPlan {
    /// Builds the fixed Xmarkdown plan with every path joined onto `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> BuildPlan {
        let root = root.as_ref();
        let icons_dir = root.join(ICONS_DIR);
        let public_dir = root.join(PUBLIC_DIR);
        BuildPlan {
            source: root.join(SOURCE_FILE),
            png_batches: vec![
                PngBatch {
                    label: "Tauri PNGs",
                    table: tables::APP_PNGS,
                    dir: icons_dir.clone(),
                },
                PngBatch {
                    label: "Windows Store",
                    table: tables::STORE_LOGOS,
                    dir: icons_dir.clone(),
                },
                PngBatch {
                    label: "Public folder",
                    table: tables::WEB_PNGS,
                    dir: public_dir,
                },
            ],
            ico_sizes: tables::ICO_SIZES,
            ico_path: icons_dir.join(ICO_FILE),
            icns_types: tables::ICNS_TYPES,
            icns_path: icons_dir.join(ICNS_FILE),
        }
    }

    /// Returns every directory the plan writes into, without duplicates, in
    /// first-use order.
    pub fn output_dirs(&self) -> Vec<&Path> {
        let mut dirs = Vec::<&Path>::new();
        let batch_dirs = self.png_batches.iter().map(|batch| batch.dir.as_path());
        let container_dirs = [&self.ico_path, &self.icns_path]
            .into_iter()
            .filter_map(|path| path.parent());
        for dir in batch_dirs.chain(container_dirs) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

impl Default for BuildPlan {
    fn default() -> BuildPlan {
        BuildPlan::new(".")
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::BuildPlan;
    use std::path::Path;

    #[test]
    fn paths_are_rooted() {
        let plan = BuildPlan::new("/work/xmarkdown");
        assert_eq!(
            plan.source,
            Path::new("/work/xmarkdown/src-tauri/icons/Xmarkdown.png")
        );
        assert_eq!(
            plan.ico_path,
            Path::new("/work/xmarkdown/src-tauri/icons/icon.ico")
        );
        assert_eq!(
            plan.icns_path,
            Path::new("/work/xmarkdown/src-tauri/icons/icon.icns")
        );
    }

    #[test]
    fn output_dirs_are_deduplicated() {
        let plan = BuildPlan::new("root");
        let dirs = plan.output_dirs();
        assert_eq!(
            dirs,
            vec![Path::new("root/src-tauri/icons"), Path::new("root/public")]
        );
    }

    #[test]
    fn default_plan_is_relative() {
        let plan = BuildPlan::default();
        assert_eq!(plan.source, Path::new("./src-tauri/icons/Xmarkdown.png"));
        assert_eq!(plan.png_batches.len(), 3);
    }
}

//===========================================================================//
