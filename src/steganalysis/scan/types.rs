//! Scan configuration types

/// Extensions considered candidate images, lower case and without the dot.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// Configuration for directory discovery
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Match extensions exactly as listed in [`IMAGE_EXTENSIONS`]. When false
    /// (the default) `PHOTO.JPG` is a candidate too.
    pub case_sensitive_extensions: bool,
    /// Descend into symlinked directories and analyze symlinked files
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            case_sensitive_extensions: false,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

/// Builder for ScanConfig
#[derive(Default)]
pub struct ScanConfigBuilder {
    case_sensitive_extensions: Option<bool>,
    follow_links: Option<bool>,
}

impl ScanConfigBuilder {
    pub fn case_sensitive_extensions(mut self, enable: bool) -> Self {
        self.case_sensitive_extensions = Some(enable);
        self
    }

    pub fn follow_links(mut self, enable: bool) -> Self {
        self.follow_links = Some(enable);
        self
    }

    pub fn build(self) -> ScanConfig {
        let default = ScanConfig::default();
        ScanConfig {
            case_sensitive_extensions: self
                .case_sensitive_extensions
                .unwrap_or(default.case_sensitive_extensions),
            follow_links: self.follow_links.unwrap_or(default.follow_links),
        }
    }
}
