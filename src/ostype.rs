#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//===========================================================================//

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct OSType(pub [u8; 4]);

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        for &byte in &self.0 {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else if !input.is_ascii() {
            Err(format!("OSType string must be ASCII (was {:?})", input))
        } else {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

//===========================================================================//

/// ICNS element types whose payload is a PNG (or JPEG 2000) image with a
/// full alpha channel.  These are the only types this crate writes.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IconType {
    /// 16x16 32-bit icon.
    RGBA32_16x16,
    /// 16x16 32-bit icon at 2x "retina" density (so, 32 by 32 pixels).
    RGBA32_16x16_2x,
    /// 32x32 32-bit icon.
    RGBA32_32x32,
    /// 32x32 32-bit icon at 2x "retina" density (so, 64 by 64 pixels).
    RGBA32_32x32_2x,
    /// 64x64 32-bit icon.
    RGBA32_64x64,
    /// 128x128 32-bit icon.
    RGBA32_128x128,
    /// 128x128 32-bit icon at 2x "retina" density (so, 256 by 256 pixels).
    RGBA32_128x128_2x,
    /// 256x256 32-bit icon.
    RGBA32_256x256,
    /// 256x256 32-bit icon at 2x "retina" density (so, 512 by 512 pixels).
    RGBA32_256x256_2x,
    /// 512x512 32-bit icon.
    RGBA32_512x512,
    /// 512x512 32-bit icon at 2x "retina" density (so, 1024 by 1024 pixels).
    RGBA32_512x512_2x,
}

impl IconType {
    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        match &ostype.0 {
            b"icp4" => Some(IconType::RGBA32_16x16),
            b"ic11" => Some(IconType::RGBA32_16x16_2x),
            b"icp5" => Some(IconType::RGBA32_32x32),
            b"ic12" => Some(IconType::RGBA32_32x32_2x),
            b"icp6" => Some(IconType::RGBA32_64x64),
            b"ic07" => Some(IconType::RGBA32_128x128),
            b"ic13" => Some(IconType::RGBA32_128x128_2x),
            b"ic08" => Some(IconType::RGBA32_256x256),
            b"ic14" => Some(IconType::RGBA32_256x256_2x),
            b"ic09" => Some(IconType::RGBA32_512x512),
            b"ic10" => Some(IconType::RGBA32_512x512_2x),
            _ => None,
        }
    }

    /// Get the OSType that represents this icon type.
    pub fn ostype(self) -> OSType {
        match self {
            IconType::RGBA32_16x16 => OSType(*b"icp4"),
            IconType::RGBA32_16x16_2x => OSType(*b"ic11"),
            IconType::RGBA32_32x32 => OSType(*b"icp5"),
            IconType::RGBA32_32x32_2x => OSType(*b"ic12"),
            IconType::RGBA32_64x64 => OSType(*b"icp6"),
            IconType::RGBA32_128x128 => OSType(*b"ic07"),
            IconType::RGBA32_128x128_2x => OSType(*b"ic13"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_256x256_2x => OSType(*b"ic14"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
            IconType::RGBA32_512x512_2x => OSType(*b"ic10"),
        }
    }

    /// Returns the edge length of the pixel data for this icon type.  For
    /// 2x "retina" density icons this is twice the screen size.
    ///
    /// # Examples
    /// ```
    /// use xmarkdown_icons::IconType;
    /// assert_eq!(IconType::RGBA32_128x128.pixel_size(), 128);
    /// assert_eq!(IconType::RGBA32_128x128_2x.pixel_size(), 256);
    /// ```
    pub fn pixel_size(self) -> u32 {
        self.screen_size() * self.pixel_density()
    }

    /// Returns 2 for 2x "retina" density icons, or 1 for other icon types.
    pub fn pixel_density(self) -> u32 {
        match self {
            IconType::RGBA32_16x16_2x
            | IconType::RGBA32_32x32_2x
            | IconType::RGBA32_128x128_2x
            | IconType::RGBA32_256x256_2x
            | IconType::RGBA32_512x512_2x => 2,
            _ => 1,
        }
    }

    /// Returns the edge length this icon occupies on screen, in points.
    pub fn screen_size(self) -> u32 {
        match self {
            IconType::RGBA32_16x16 | IconType::RGBA32_16x16_2x => 16,
            IconType::RGBA32_32x32 | IconType::RGBA32_32x32_2x => 32,
            IconType::RGBA32_64x64 => 64,
            IconType::RGBA32_128x128 | IconType::RGBA32_128x128_2x => 128,
            IconType::RGBA32_256x256 | IconType::RGBA32_256x256_2x => 256,
            IconType::RGBA32_512x512 | IconType::RGBA32_512x512_2x => 512,
        }
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{IconType, OSType};
    use std::str::FromStr;

    const ALL_TYPES: &[IconType] = &[
        IconType::RGBA32_16x16,
        IconType::RGBA32_16x16_2x,
        IconType::RGBA32_32x32,
        IconType::RGBA32_32x32_2x,
        IconType::RGBA32_64x64,
        IconType::RGBA32_128x128,
        IconType::RGBA32_128x128_2x,
        IconType::RGBA32_256x256,
        IconType::RGBA32_256x256_2x,
        IconType::RGBA32_512x512,
        IconType::RGBA32_512x512_2x,
    ];

    #[test]
    fn icon_type_ostype_round_trip() {
        for &icon_type in ALL_TYPES {
            let ostype = icon_type.ostype();
            assert_eq!(IconType::from_ostype(ostype), Some(icon_type));
        }
    }

    #[test]
    fn retina_types_double_their_pixels() {
        assert_eq!(IconType::RGBA32_16x16_2x.pixel_size(), 32);
        assert_eq!(IconType::RGBA32_32x32_2x.pixel_size(), 64);
        assert_eq!(IconType::RGBA32_256x256_2x.pixel_size(), 512);
        assert_eq!(IconType::RGBA32_512x512_2x.pixel_size(), 1024);
        assert_eq!(IconType::RGBA32_512x512.pixel_size(), 512);
    }

    #[test]
    fn legacy_ostypes_are_not_png_types() {
        for code in &["is32", "s8mk", "it32", "t8mk", "icns"] {
            let ostype = OSType::from_str(code).unwrap();
            assert_eq!(IconType::from_ostype(ostype), None);
        }
    }

    #[test]
    fn ostype_to_and_from_str() {
        let ostype = OSType::from_str("ic07").expect("failed to parse OSType");
        assert_eq!(ostype, OSType(*b"ic07"));
        assert_eq!(ostype.to_string(), "ic07");
    }

    #[test]
    fn ostype_from_str_failure() {
        assert_eq!(
            OSType::from_str("abc"),
            Err("OSType string must be 4 bytes (was 3)".to_string())
        );
        assert_eq!(
            OSType::from_str("abcde"),
            Err("OSType string must be 4 bytes (was 5)".to_string())
        );
        assert!(OSType::from_str("ic\u{e9}").is_err());
    }
}

//===========================================================================//
