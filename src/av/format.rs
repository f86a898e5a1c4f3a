use bytes::Bytes;

/// Sample MIME type of DVB subtitle tracks.
pub const APPLICATION_DVBSUBS: &str = "application/dvbsubs";
/// MIME type of an MPEG transport stream.
pub const VIDEO_MP2T: &str = "video/mp2t";

/// Sample-level flags reported with every committed sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SampleFlags(u32);

impl SampleFlags {
    /// No flags set.
    pub const NONE: SampleFlags = SampleFlags(0);
    /// The sample decodes without reference to any other sample.
    pub const KEY_FRAME: SampleFlags = SampleFlags(1);

    /// Raw flag bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Wraps raw flag bits, keeping unknown ones.
    pub const fn from_bits(bits: u32) -> Self {
        SampleFlags(bits)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: SampleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the sample is a key frame.
    pub fn is_key_frame(self) -> bool {
        self.contains(Self::KEY_FRAME)
    }
}

impl std::ops::BitOr for SampleFlags {
    type Output = SampleFlags;

    fn bitor(self, rhs: SampleFlags) -> SampleFlags {
        SampleFlags(self.0 | rhs.0)
    }
}

/// Description of the samples carried by a track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Format id, usually `"<program>/<track>"`.
    pub id: Option<String>,
    /// MIME type of the samples.
    pub sample_mime_type: Option<String>,
    /// MIME type of the container the samples came from.
    pub container_mime_type: Option<String>,
    /// Codec-private setup data, in the order the decoder expects it.
    pub initialization_data: Vec<Bytes>,
    /// ISO 639-2 language code.
    pub language: Option<String>,
}

impl Format {
    /// Starts building a format with every field unset.
    pub fn builder() -> FormatBuilder {
        FormatBuilder::default()
    }
}

/// Builder returned by [`Format::builder`].
#[derive(Debug, Clone, Default)]
pub struct FormatBuilder {
    format: Format,
}

impl FormatBuilder {
    /// Sets the format id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.format.id = Some(id.into());
        self
    }

    /// Sets the sample MIME type.
    pub fn with_sample_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.format.sample_mime_type = Some(mime.into());
        self
    }

    /// Sets the container MIME type.
    pub fn with_container_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.format.container_mime_type = Some(mime.into());
        self
    }

    /// Replaces the initialization data.
    pub fn with_initialization_data(mut self, data: Vec<Bytes>) -> Self {
        self.format.initialization_data = data;
        self
    }

    /// Sets or clears the language.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.format.language = language;
        self
    }

    /// Finishes the format.
    pub fn build(self) -> Format {
        self.format
    }
}
