//! Media kind classification from MIME types.

/// Kind of visual media behind a content source.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
pub enum MediaKind {
    /// Image content (PNG, JPEG, WebP, etc.)
    #[display("image")]
    Image,
    /// Video content (MP4, WebM, etc.)
    #[display("video")]
    Video,
}

impl MediaKind {
    /// Classify a MIME type, defaulting unknown types to `Image`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_storage::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_mime("image/jpeg"), MediaKind::Image);
    /// assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
    /// ```
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// String representation for digests and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}
