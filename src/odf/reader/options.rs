/// Configuration options for reading a document.
///
/// # Examples
///
/// ```rust
/// use litchi_odf::odf::ReaderOptions;
///
/// // Create with defaults
/// let options = ReaderOptions::default();
/// assert!(!options.destructive);
///
/// // Or customize
/// let options = ReaderOptions::new()
///     .with_destructive(true)
///     .with_soft_automatic_paragraphs(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Rewrite paragraphs in place while walking the content (span merging and
    /// unwrapping). The content tree is modified.
    pub destructive: bool,
    /// Keep automatic paragraph styles from the content part flagged as
    /// automatic. When disabled they are treated like named styles.
    pub soft_automatic_paragraphs: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            destructive: false,
            soft_automatic_paragraphs: true,
        }
    }
}

impl ReaderOptions {
    /// Create a new `ReaderOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the content tree may be rewritten.
    #[inline]
    pub fn with_destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    /// Set whether automatic paragraph styles stay automatic.
    #[inline]
    pub fn with_soft_automatic_paragraphs(mut self, soft: bool) -> Self {
        self.soft_automatic_paragraphs = soft;
        self
    }
}
