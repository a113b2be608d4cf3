use crate::iconimage::IconImage;
use crate::ostype::{IconType, OSType};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

//===========================================================================//

// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

// The length of the file header and of each element header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;
const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

//===========================================================================//

/// A set of icons stored in a single ICNS file.
#[derive(Clone, Debug, Default)]
pub struct IconFamily {
    elements: Vec<IconElement>,
}

impl IconFamily {
    /// Creates a new, empty icon family.
    pub fn new() -> IconFamily {
        IconFamily { elements: Vec::new() }
    }

    /// Returns the elements of the family, in file order.
    pub fn elements(&self) -> &[IconElement] {
        &self.elements
    }

    /// Appends an element.  Elements are written in the order they are added,
    /// and duplicate types are kept as-is.
    pub fn add_element(&mut self, element: IconElement) {
        self.elements.push(element);
    }

    /// Encodes the image as a PNG element of the given type.  Returns an
    /// error if the image does not have that type's pixel dimensions.
    pub fn add_icon_with_type(
        &mut self,
        image: &IconImage,
        icon_type: IconType,
    ) -> io::Result<()> {
        let element = IconElement::encode_image_with_type(image, icon_type)?;
        self.elements.push(element);
        Ok(())
    }

    /// Decodes the first element with the given type.  Returns a `NotFound`
    /// error if there is none.
    pub fn get_icon_with_type(
        &self,
        icon_type: IconType,
    ) -> io::Result<IconImage> {
        let ostype = icon_type.ostype();
        let element = self
            .elements
            .iter()
            .find(|element| element.ostype == ostype)
            .ok_or_else(|| {
                io_error!(
                    NotFound,
                    "the icon family does not contain a '{}' element",
                    ostype
                )
            })?;
        element.decode_image()
    }

    /// Reads an icon family from an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconFamily> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != *ICNS_MAGIC_LITERAL {
            invalid_data!("not an icns file (wrong magic literal)");
        }
        let file_length = reader.read_u32::<BigEndian>()?;
        if file_length < ICON_FAMILY_HEADER_LENGTH {
            invalid_data!("invalid icns file length ({})", file_length);
        }
        let mut file_position = ICON_FAMILY_HEADER_LENGTH;
        let mut family = IconFamily::new();
        while file_position < file_length {
            let element = IconElement::read(reader.by_ref())?;
            file_position =
                match file_position.checked_add(element.total_length()?) {
                    Some(position) => position,
                    None => invalid_data!("icns elements overflow 4 GiB"),
                };
            family.elements.push(element);
        }
        if file_position != file_length {
            invalid_data!(
                "icns elements overrun the file length ({} > {})",
                file_position,
                file_length
            );
        }
        Ok(family)
    }

    /// Writes the icon family to an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let total_length = self.total_length()?;
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(total_length)?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.  Fails if it would not fit the 32-bit length
    /// field.
    pub fn total_length(&self) -> io::Result<u32> {
        let mut length = ICON_FAMILY_HEADER_LENGTH;
        for element in &self.elements {
            length = match length.checked_add(element.total_length()?) {
                Some(length) => length,
                None => invalid_input!("icns file exceeds 4 GiB"),
            };
        }
        Ok(length)
    }
}

//===========================================================================//

/// One entry in an ICNS file: a type code and its encoded payload.
#[derive(Clone, Debug)]
pub struct IconElement {
    ostype: OSType,
    data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement { ostype, data }
    }

    /// Encodes the image as a PNG payload for the given icon type.
    pub fn encode_image_with_type(
        image: &IconImage,
        icon_type: IconType,
    ) -> io::Result<IconElement> {
        let size = icon_type.pixel_size();
        if image.width() != size || image.height() != size {
            invalid_input!(
                "wrong image dimensions for '{}' ({}x{} instead of {}x{})",
                icon_type.ostype(),
                image.width(),
                image.height(),
                size,
                size
            );
        }
        let mut data = Vec::new();
        image.write_png(&mut data)?;
        Ok(IconElement::new(icon_type.ostype(), data))
    }

    /// Decodes the PNG payload.  Returns an error if the OSType is not a
    /// supported icon type, or the decoded image has the wrong size.
    pub fn decode_image(&self) -> io::Result<IconImage> {
        let icon_type = self.icon_type().ok_or_else(|| {
            io_error!(InvalidInput, "unsupported OSType: {}", self.ostype)
        })?;
        let image = IconImage::read_png(self.data.as_slice())?;
        let size = icon_type.pixel_size();
        if image.width() != size || image.height() != size {
            invalid_data!(
                "decoded PNG has wrong dimensions ({}x{} instead of {}x{})",
                image.width(),
                image.height(),
                size,
                size
            );
        }
        Ok(image)
    }

    /// Returns the OSType for this element (e.g. `ic07`).
    pub fn ostype(&self) -> OSType {
        self.ostype
    }

    /// Returns the type of icon encoded by this element, or `None` if this
    /// element does not encode a supported icon type.
    pub fn icon_type(&self) -> Option<IconType> {
        IconType::from_ostype(self.ostype)
    }

    /// Returns the encoded data for this element.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.  Fails if it would not fit the 32-bit length
    /// field.
    pub fn total_length(&self) -> io::Result<u32> {
        element_length(self.data.len())
    }

    /// Reads an icon element from within an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconElement> {
        let mut raw_ostype = [0u8; 4];
        reader.read_exact(&mut raw_ostype)?;
        let element_length = reader.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            invalid_data!("invalid element length ({})", element_length);
        }
        let data_length = element_length - ICON_ELEMENT_HEADER_LENGTH;
        let mut data = vec![0u8; data_length as usize];
        reader.read_exact(&mut data)?;
        Ok(IconElement::new(OSType(raw_ostype), data))
    }

    /// Writes the icon element to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let total_length = self.total_length()?;
        writer.write_all(&self.ostype.0)?;
        writer.write_u32::<BigEndian>(total_length)?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}

fn element_length(data_len: usize) -> io::Result<u32> {
    match u32::try_from(data_len)
        .ok()
        .and_then(|len| len.checked_add(ICON_ELEMENT_HEADER_LENGTH))
    {
        Some(length) => Ok(length),
        None => {
            invalid_input!("icns element payload too large ({} bytes)", data_len)
        }
    }
}

//===========================================================================//


//===========================================================================//
