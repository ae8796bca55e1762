//! Inline image support.
use std::fmt::Write as FmtWrite;

use crate::error::{Error, Result};

use super::format::escape_xml;

/// EMUs (English Metric Units) per centimeter.
pub const EMU_PER_CM: i64 = 360_000;

/// Image format, detected from the byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Detect image format from byte signature.
    pub fn detect_from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }

        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        if data.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF, little-endian and big-endian
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        None
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }
}

/// An inline image embedded in a run.
///
/// Extents are expressed in EMUs (914 400 per inch, 360 000 per cm). The
/// height defaults to the width when not given, producing a square extent;
/// callers that care about aspect ratio pass both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    data: Vec<u8>,
    format: ImageFormat,
    width_emu: i64,
    height_emu: i64,
    description: String,
}

impl InlineImage {
    /// Create an inline image from raw bytes.
    ///
    /// The format is sniffed from the byte signature; unrecognized data
    /// fails with [`Error::UnknownImageFormat`].
    pub fn from_bytes(
        data: Vec<u8>,
        width_emu: Option<i64>,
        height_emu: Option<i64>,
    ) -> Result<Self> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or(Error::UnknownImageFormat)?;
        let width = width_emu.unwrap_or(914_400);
        Ok(Self {
            data,
            format,
            width_emu: width,
            height_emu: height_emu.unwrap_or(width),
            description: String::new(),
        })
    }

    /// Create an inline image from a file on disk.
    pub fn open(path: impl AsRef<std::path::Path>, width_cm: f64, height_cm: Option<f64>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(
            data,
            Some(cm_to_emu(width_cm)),
            height_cm.map(cm_to_emu),
        )
    }

    /// Set the image description / alt text.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detected image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Width in EMUs.
    pub fn width_emu(&self) -> i64 {
        self.width_emu
    }

    /// Height in EMUs.
    pub fn height_emu(&self) -> i64 {
        self.height_emu
    }

    /// Serialize the image drawing to XML.
    ///
    /// `r_id` is the relationship id a packaging layer would bind the image
    /// part under.
    pub(crate) fn to_xml(&self, xml: &mut String, r_id: &str) -> Result<()> {
        let desc = escape_xml(&self.description);
        write!(
            xml,
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{}" cy="{}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="1" name="Picture" descr="{}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="0" name="Picture" descr="{}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
            self.width_emu, self.height_emu, desc, desc, r_id, self.width_emu, self.height_emu
        )?;
        Ok(())
    }
}

/// Convert centimeters to EMUs.
pub fn cm_to_emu(cm: f64) -> i64 {
    (cm * EMU_PER_CM as f64) as i64
}

/// Convert pixels (at 96 DPI) to EMUs.
pub fn px_to_emu(px: u32) -> i64 {
    ((px as f64) * 914_400.0 / 96.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 12] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    ];

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::detect_from_bytes(&PNG_HEADER),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"GIF89a\x00\x00"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect_from_bytes(b"not an image"), None);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(InlineImage::from_bytes(vec![0u8; 16], None, None).is_err());
    }

    #[test]
    fn test_height_defaults_to_width() {
        let img = InlineImage::from_bytes(PNG_HEADER.to_vec(), Some(cm_to_emu(2.0)), None).unwrap();
        assert_eq!(img.width_emu(), 720_000);
        assert_eq!(img.height_emu(), 720_000);
    }

    #[test]
    fn test_drawing_xml_contains_extent() {
        let img =
            InlineImage::from_bytes(PNG_HEADER.to_vec(), Some(914_400), Some(457_200)).unwrap();
        let mut xml = String::new();
        img.to_xml(&mut xml, "rId5").unwrap();
        assert!(xml.contains(r#"<wp:extent cx="914400" cy="457200"/>"#));
        assert!(xml.contains(r#"r:embed="rId5""#));
    }
}
