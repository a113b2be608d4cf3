//! The fixed size tables for the Xmarkdown icon set.
//!
//! Every table is ordered; files and container entries are produced in
//! declaration order.

/// An ordered mapping from an output name (a file name, or an ICNS type
/// code) to the edge length of the square image stored under that name.
pub type SizeTable = [(&'static str, u32)];

/// PNG icons the Tauri bundler expects in the icons directory.
pub const APP_PNGS: &SizeTable = &[
    ("32x32.png", 32),
    ("128x128.png", 128),
    ("128x128@2x.png", 256),
    ("icon.png", 512), // also used as the system tray icon
];

/// Windows Store logos, written next to the Tauri icons.
pub const STORE_LOGOS: &SizeTable = &[
    ("Square30x30Logo.png", 30),
    ("Square44x44Logo.png", 44),
    ("Square71x71Logo.png", 71),
    ("Square89x89Logo.png", 89),
    ("Square107x107Logo.png", 107),
    ("Square142x142Logo.png", 142),
    ("Square150x150Logo.png", 150),
    ("Square284x284Logo.png", 284),
    ("Square310x310Logo.png", 310),
    ("StoreLogo.png", 50),
];

/// Icons served from the web frontend's public folder.
pub const WEB_PNGS: &SizeTable = &[("icon-32.png", 32), ("icon-128.png", 128)];

/// Image sizes packed into the Windows `.ico` file.
pub const ICO_SIZES: &[u32] = &[16, 32, 48, 64, 128, 256];

/// Element types packed into the macOS `.icns` file.  Nothing above 512
/// pixels, since the source artwork is 512x512.
pub const ICNS_TYPES: &SizeTable = &[
    ("ic07", 128),
    ("ic08", 256),
    ("ic09", 512),
    ("ic11", 32),  // 16x16@2x
    ("ic12", 64),  // 32x32@2x
    ("ic13", 256), // 128x128@2x
    ("ic14", 512), // 256x256@2x
];

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{APP_PNGS, ICNS_TYPES, ICO_SIZES, STORE_LOGOS, WEB_PNGS};
    use crate::ostype::{IconType, OSType};
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn icons_dir_file_names_are_unique() {
        let mut names = HashSet::new();
        for &(name, _) in APP_PNGS.iter().chain(STORE_LOGOS) {
            assert!(names.insert(name), "duplicate file name {}", name);
        }
        assert_eq!(names.len(), 14);
        assert_eq!(WEB_PNGS.len(), 2);
    }

    #[test]
    fn icns_sizes_match_their_types() {
        for &(code, size) in ICNS_TYPES {
            let ostype = OSType::from_str(code).unwrap();
            let icon_type = IconType::from_ostype(ostype).unwrap();
            assert_eq!(icon_type.pixel_size(), size, "type {}", code);
        }
    }

    #[test]
    fn ico_sizes_fit_the_directory_format() {
        assert!(ICO_SIZES.iter().all(|&size| size >= 1 && size <= 256));
    }
}
