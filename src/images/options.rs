use crate::common::detection::image::{MIME_GIF, MIME_JPEG, MIME_PNG};

/// Configuration options for image extraction.
///
/// # Examples
///
/// ```rust
/// use litchi_odf::images::ImageOptions;
///
/// let options = ImageOptions::new()
///     .with_vector_target(Some("image/svg+xml"))
///     .with_base_file_name("figure");
/// assert!(options.accepts("image/png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// MIME types the caller can use as they are
    pub accepted_formats: Vec<String>,
    /// Target for raster conversion of unaccepted images
    pub raster_target: Option<String>,
    /// Target for vector conversion of unaccepted vector images
    pub vector_target: Option<String>,
    /// Unwrap PostScript embedded in StarView metafiles
    pub extract_eps: bool,
    /// Try the next sibling image when the first one is not good enough
    pub use_alternate_image: bool,
    /// Prefix of generated file names
    pub base_file_name: String,
    /// Free embedded bytes once extracted
    pub destructive: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            accepted_formats: vec![MIME_PNG.to_string(), MIME_JPEG.to_string(), MIME_GIF.to_string()],
            raster_target: Some(MIME_PNG.to_string()),
            vector_target: None,
            extract_eps: false,
            use_alternate_image: true,
            base_file_name: "img".to_string(),
            destructive: false,
        }
    }
}

impl ImageOptions {
    /// Create a new `ImageOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted MIME types.
    pub fn with_accepted_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the raster conversion target.
    pub fn with_raster_target(mut self, target: Option<&str>) -> Self {
        self.raster_target = target.map(str::to_string);
        self
    }

    /// Set the vector conversion target.
    pub fn with_vector_target(mut self, target: Option<&str>) -> Self {
        self.vector_target = target.map(str::to_string);
        self
    }

    /// Set whether PostScript is unwrapped from StarView metafiles.
    #[inline]
    pub fn with_extract_eps(mut self, extract: bool) -> Self {
        self.extract_eps = extract;
        self
    }

    /// Set whether alternate sibling images are considered.
    #[inline]
    pub fn with_alternate_image(mut self, use_alternate: bool) -> Self {
        self.use_alternate_image = use_alternate;
        self
    }

    /// Set the file name prefix.
    pub fn with_base_file_name(mut self, name: &str) -> Self {
        self.base_file_name = name.to_string();
        self
    }

    /// Set whether extracted bytes are freed from the document.
    #[inline]
    pub fn with_destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    /// Whether a MIME type is accepted
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_formats.iter().any(|format| format == mime)
    }

    /// Whether a MIME type is the configured vector target
    pub fn is_vector_target(&self, mime: &str) -> bool {
        self.vector_target.as_deref() == Some(mime)
    }
}
