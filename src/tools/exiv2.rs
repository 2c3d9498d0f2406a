use std::path::Path;

use super::command::{ToolCommand, ToolProgram};
use super::program;
use crate::error::{AnnotateError, Stage};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Exiv2 {
    pub(crate) program: ToolProgram,
}

impl Exiv2 {
    pub fn from_settings(settings: &Settings) -> Result<Self, AnnotateError> {
        Ok(Self {
            program: program(&settings.tools.exiv2, "exiv2")?,
        })
    }

    pub fn caption_command(&self, image: &Path, caption: &str) -> ToolCommand {
        let value = metadata_value(caption);
        let charset = if value.is_ascii() { "Ascii" } else { "Unicode" };
        self.program
            .command()
            .arg(format!(
                "-Mset Exif.Photo.UserComment {}",
                quoted(&format!("charset={} {}", charset, value))
            ))
            .arg(format!(
                "-Mset Iptc.Application2.Caption String {}",
                quoted(&value)
            ))
            .arg(format!(
                "-Mset Xmp.dc.description {}",
                quoted(&format!("lang=\"x-default\" {}", value))
            ))
            .arg("mo")
            .arg(image)
    }

    pub fn write_caption(&self, image: &Path, caption: &str) -> Result<(), AnnotateError> {
        self.caption_command(image, caption).run(Stage::Metadata)?;
        Ok(())
    }
}

/// exiv2 modify commands are line oriented, so line breaks become spaces.
pub fn metadata_value(caption: &str) -> String {
    caption
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// exiv2 trims an unquoted value and strips one pair of surrounding quotes, so
// the value is always wrapped to keep the caption byte for byte.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value)
}
