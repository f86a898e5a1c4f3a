//! In-memory track sinks.
//!
//! [`MemoryExtractorOutput`] keeps every track it creates, in creation order,
//! and [`MemoryTrackOutput`] turns the byte stream it receives into discrete
//! [`Sample`]s. Both are useful for tests and for callers that want the
//! extracted subtitles as plain buffers.

use super::{ExtractorOutput, Format, SampleFlags, TrackHandle, TrackOutput, TrackType};
use crate::error::DvbSubError;
use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;
use std::sync::Arc;

/// A committed sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Presentation time in microseconds.
    pub time_us: i64,
    /// Sample flags.
    pub flags: SampleFlags,
    /// Sample payload.
    pub data: Bytes,
}

/// Track sink that keeps its format and committed samples in memory.
#[derive(Debug, Default)]
pub struct MemoryTrackOutput {
    format: Option<Format>,
    pending: BytesMut,
    samples: Vec<Sample>,
    error: Option<DvbSubError>,
}

impl MemoryTrackOutput {
    /// Creates a track with no format and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last format set on this track.
    pub fn track_format(&self) -> Option<&Format> {
        self.format.as_ref()
    }

    /// Committed samples in commit order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Bytes received but not yet committed to a sample.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the first commit error seen, if any.
    pub fn take_error(&mut self) -> Option<DvbSubError> {
        self.error.take()
    }
}

impl TrackOutput for MemoryTrackOutput {
    fn format(&mut self, format: Format) {
        self.format = Some(format);
    }

    fn sample_data(&mut self, data: Bytes) {
        self.pending.extend_from_slice(&data);
    }

    fn sample_metadata(&mut self, time_us: i64, flags: SampleFlags, size: u32, offset: u32) {
        let size = size as usize;
        let offset = offset as usize;
        let Some(start) = self.pending.len().checked_sub(size + offset) else {
            if self.error.is_none() {
                self.error = Some(DvbSubError::InvalidSample(format!(
                    "commit of {} bytes at offset {} with only {} bytes pending",
                    size,
                    offset,
                    self.pending.len()
                )));
            }
            return;
        };

        if start > 0 {
            log::debug!("discarding {} uncommitted bytes", start);
            let _ = self.pending.split_to(start);
        }
        let data = self.pending.split_to(size).freeze();
        log::debug!("committed sample: time_us={}, size={}", time_us, size);
        self.samples.push(Sample {
            time_us,
            flags,
            data,
        });
    }
}

#[derive(Debug)]
struct TrackEntry {
    id: u32,
    track_type: TrackType,
    output: Arc<Mutex<MemoryTrackOutput>>,
}

/// Extractor output that keeps all tracks in memory.
#[derive(Debug, Default)]
pub struct MemoryExtractorOutput {
    tracks: Vec<TrackEntry>,
    tracks_ended: bool,
}

impl MemoryExtractorOutput {
    /// Creates an output with no tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track ids in creation order.
    pub fn track_ids(&self) -> Vec<u32> {
        self.tracks.iter().map(|t| t.id).collect()
    }

    /// Type the track `id` was created with.
    pub fn track_type(&self, id: u32) -> Option<TrackType> {
        self.tracks.iter().find(|t| t.id == id).map(|t| t.track_type)
    }

    /// The track created under `id`, if any.
    pub fn track_output(&self, id: u32) -> Option<Arc<Mutex<MemoryTrackOutput>>> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .map(|t| Arc::clone(&t.output))
    }

    /// All tracks in creation order.
    pub fn tracks(&self) -> Vec<Arc<Mutex<MemoryTrackOutput>>> {
        self.tracks.iter().map(|t| Arc::clone(&t.output)).collect()
    }

    /// Whether `end_tracks` has been called.
    pub fn tracks_ended(&self) -> bool {
        self.tracks_ended
    }
}

impl ExtractorOutput for MemoryExtractorOutput {
    fn track(&mut self, id: u32, track_type: TrackType) -> TrackHandle {
        if let Some(existing) = self.tracks.iter().find(|t| t.id == id) {
            return existing.output.clone();
        }
        let output = Arc::new(Mutex::new(MemoryTrackOutput::new()));
        self.tracks.push(TrackEntry {
            id,
            track_type,
            output: Arc::clone(&output),
        });
        output
    }

    fn end_tracks(&mut self) {
        self.tracks_ended = true;
    }
}
