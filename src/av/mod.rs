use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;

/// Track formats and sample flags
pub mod format;
/// In-memory track sinks
pub mod memory;
/// Track and format id generation
pub mod track_id;

pub use format::*;
pub use memory::{MemoryExtractorOutput, MemoryTrackOutput, Sample};
pub use track_id::TrackIdGenerator;

/// Kind of content a track carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    /// Audio.
    Audio,
    /// Video.
    Video,
    /// Subtitles and other timed text.
    Text,
    /// Timed metadata.
    Metadata,
    /// Anything else.
    Unknown,
}

/// Receives the format and samples of one track.
///
/// Sample bytes arrive through [`sample_data`](TrackOutput::sample_data) and
/// are committed as a sample by a later
/// [`sample_metadata`](TrackOutput::sample_metadata) call, which names how
/// many of the most recently written bytes belong to it.
pub trait TrackOutput {
    /// Sets the format of the track. Called before any sample data.
    fn format(&mut self, format: Format);

    /// Appends bytes to the sample being written. The view is the sink's own;
    /// advancing or dropping it does not affect other sinks.
    fn sample_data(&mut self, data: Bytes);

    /// Commits a sample of `size` bytes ending `offset` bytes before the end
    /// of the data written so far.
    fn sample_metadata(&mut self, time_us: i64, flags: SampleFlags, size: u32, offset: u32);
}

/// Shared handle to a track owned by an [`ExtractorOutput`].
pub type TrackHandle = Arc<Mutex<dyn TrackOutput + Send>>;

/// Registry that creates and owns the tracks of one demuxed container.
pub trait ExtractorOutput {
    /// Returns the track for `id`, creating it on first use.
    fn track(&mut self, id: u32, track_type: TrackType) -> TrackHandle;

    /// Signals that every track has been created.
    fn end_tracks(&mut self);
}
