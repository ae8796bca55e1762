//! Bookmark markers inside paragraphs.
use std::fmt::Write as FmtWrite;

use crate::error::Result;

use super::format::escape_xml;

/// A bookmark start marker. The end marker pairs by numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub(crate) id: u32,
    pub(crate) name: String,
}

impl Bookmark {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            "<w:bookmarkStart w:id=\"{}\" w:name=\"{}\"/>",
            self.id,
            escape_xml(&self.name)
        )?;
        Ok(())
    }
}

pub(crate) fn bookmark_end_to_xml(id: u32, xml: &mut String) -> Result<()> {
    write!(xml, "<w:bookmarkEnd w:id=\"{id}\"/>")?;
    Ok(())
}
