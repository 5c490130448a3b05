use serde::{Deserialize, Serialize};

/// Quality slider range, in percent
const MIN_QUALITY: u8 = 10;
const MAX_QUALITY: u8 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Webp => "image/webp",
        }
    }

    /// PNG is always lossless and ignores the quality setting
    pub fn uses_quality(&self) -> bool {
        !matches!(self, ExportFormat::Png)
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Settings chosen in the export dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Base name without extension
    pub file_name: String,
    pub format: ExportFormat,
    /// Percent, 10..=100
    pub quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_name: "edited-image".to_owned(),
            format: ExportFormat::Png,
            quality: 90,
        }
    }
}

impl ExportOptions {
    pub fn new(file_name: impl Into<String>, format: ExportFormat, quality: u8) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            quality: quality.clamp(MIN_QUALITY, MAX_QUALITY),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality.clamp(MIN_QUALITY, MAX_QUALITY)
    }

    /// File name offered for the download, `name.format`
    pub fn download_name(&self) -> String {
        let base = self.file_name.trim();
        let base = if base.is_empty() { "edited-image" } else { base };
        format!("{base}.{}", self.format.extension())
    }
}

/// An encoded document ready to hand to the host
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name() {
        let options = ExportOptions::new("holiday", ExportFormat::Jpeg, 80);
        assert_eq!(options.download_name(), "holiday.jpeg");
        assert_eq!(ExportOptions::default().download_name(), "edited-image.png");
        assert_eq!(ExportOptions::new("  ", ExportFormat::Webp, 80).download_name(), "edited-image.webp");
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ExportOptions::new("a", ExportFormat::Jpeg, 0).quality, 10);
        assert_eq!(ExportOptions::new("a", ExportFormat::Jpeg, 250).quality, 100);

        let options: ExportOptions = serde_json::from_str(r#"{ "quality": 3 }"#).unwrap();
        assert_eq!(options.quality(), 10);
        assert!(!ExportFormat::Png.uses_quality());
    }
}
