use crate::iconimage::IconImage;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Seek, SeekFrom, Write};

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

// The resource type number for icons (cursors, type 2, are never written).
const ICON_RESOURCE_TYPE: u16 = 1;

// The sizes of the ICONDIR header and of each ICONDIRENTRY, in bytes.
const ICONDIR_LEN: u32 = 6;
const ICONDIRENTRY_LEN: u32 = 16;

//===========================================================================//

/// A collection of images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this collection, in file order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Adds an entry to the end of the collection.
    pub fn add_entry(&mut self, entry: IconDirEntry) {
        self.entries.push(entry);
    }

    /// Reads an ICO file into memory.  Entry dimensions come from each PNG
    /// payload when it can be parsed, and from the directory otherwise.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            invalid_data!(
                "Not an icon file (resource type was {}, but must be {})",
                restype,
                ICON_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut headers = Vec::<EntryHeader>::with_capacity(num_entries);
        for _ in 0..num_entries {
            headers.push(EntryHeader::read(&mut reader)?);
        }
        let mut entries = Vec::<IconDirEntry>::with_capacity(num_entries);
        for header in headers {
            reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;
            let mut data = vec![0u8; header.data_size as usize];
            reader.read_exact(&mut data)?;
            entries.push(header.into_entry(data));
        }
        Ok(IconDir { entries })
    }

    /// Writes an ICO file: the header, every directory entry, then every
    /// payload in the same order.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let num_entries = match u16::try_from(self.entries.len()) {
            Ok(num_entries) => num_entries,
            Err(_) => invalid_input!(
                "Too many entries in IconDir (was {}, but max is {})",
                self.entries.len(),
                u16::MAX
            ),
        };
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(num_entries)?;
        let mut data_offset =
            ICONDIR_LEN + ICONDIRENTRY_LEN * u32::from(num_entries);
        for entry in &self.entries {
            let header = EntryHeader::describe(entry, data_offset)?;
            header.write(&mut writer)?;
            data_offset = match data_offset.checked_add(header.data_size) {
                Some(offset) => offset,
                None => invalid_input!("ICO file exceeds 4 GiB"),
            };
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }
}

//===========================================================================//

// The fixed-size ICONDIRENTRY record, as stored in the file.
struct EntryHeader {
    width_byte: u8,
    height_byte: u8,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
}

impl EntryHeader {
    fn describe(
        entry: &IconDirEntry,
        data_offset: u32,
    ) -> io::Result<EntryHeader> {
        let data_size = match u32::try_from(entry.data.len()) {
            Ok(data_size) => data_size,
            Err(_) => invalid_input!("ICO entry payload exceeds 4 GiB"),
        };
        Ok(EntryHeader {
            width_byte: dimension_byte(entry.width),
            height_byte: dimension_byte(entry.height),
            num_colors: entry.num_colors,
            color_planes: entry.color_planes,
            bits_per_pixel: entry.bits_per_pixel,
            data_size,
            data_offset,
        })
    }

    fn read<R: Read>(reader: &mut R) -> io::Result<EntryHeader> {
        let width_byte = reader.read_u8()?;
        let height_byte = reader.read_u8()?;
        let num_colors = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIRENTRY \
                 (was {}, but must be 0)",
                reserved
            );
        }
        Ok(EntryHeader {
            width_byte,
            height_byte,
            num_colors,
            color_planes: reader.read_u16::<LittleEndian>()?,
            bits_per_pixel: reader.read_u16::<LittleEndian>()?,
            data_size: reader.read_u32::<LittleEndian>()?,
            data_offset: reader.read_u32::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.width_byte)?;
        writer.write_u8(self.height_byte)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }

    fn into_entry(self, data: Vec<u8>) -> IconDirEntry {
        let mut entry = IconDirEntry {
            width: dimension_from_byte(self.width_byte),
            height: dimension_from_byte(self.height_byte),
            num_colors: self.num_colors,
            color_planes: self.color_planes,
            bits_per_pixel: self.bits_per_pixel,
            data,
        };
        // A malformed payload keeps the directory's dimensions; the error
        // surfaces when that entry is decoded.
        if let Ok((width, height)) = entry.decode_size() {
            entry.width = width;
            entry.height = height;
        }
        entry
    }
}

// A dimension byte of zero stands for 256 (or, since Vista, anything larger).
fn dimension_byte(size: u32) -> u8 {
    if size > 255 {
        0
    } else {
        size as u8
    }
}

fn dimension_from_byte(byte: u8) -> u32 {
    if byte == 0 {
        256
    } else {
        u32::from(byte)
    }
}

//===========================================================================//

/// One entry in an ICO file; a single PNG-encoded icon image.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntry {
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns true if the image is encoded as a PNG, or false if it is
    /// encoded as a BMP.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn decode_size(&self) -> io::Result<(u32, u32)> {
        if !self.is_png() {
            invalid_data!("BMP-encoded ICO entries are not supported");
        }
        let png_reader = IconImage::read_png_info(self.data.as_slice())?;
        Ok((png_reader.info().width, png_reader.info().height))
    }

    /// Decodes this entry into an image.  Returns an error if the data is
    /// malformed, isn't a PNG, or disagrees with the directory dimensions.
    pub fn decode(&self) -> io::Result<IconImage> {
        if !self.is_png() {
            invalid_data!("BMP-encoded ICO entries are not supported");
        }
        let image = IconImage::read_png(self.data.as_slice())?;
        if image.width() != self.width || image.height() != self.height {
            invalid_data!(
                "Encoded image has wrong dimensions \
                 (was {}x{}, but should be {}x{})",
                image.width(),
                image.height(),
                self.width,
                self.height
            );
        }
        Ok(image)
    }

    /// Encodes an image as a 32 bpp RGBA PNG in a new entry.
    pub fn encode(image: &IconImage) -> io::Result<IconDirEntry> {
        let mut data = Vec::new();
        let bits_per_pixel = image.write_png_internal(&mut data)?;
        Ok(IconDirEntry {
            width: image.width(),
            height: image.height(),
            num_colors: 0,
            color_planes: 0,
            bits_per_pixel,
            data,
        })
    }
}

//===========================================================================//


//===========================================================================//
