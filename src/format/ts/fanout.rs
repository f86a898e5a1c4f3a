use crate::av::{SampleFlags, TrackHandle};
use bytes::Bytes;
use std::fmt;

/// Ordered set of tracks that receive identical copies of one elementary
/// stream.
///
/// Tracks are visited in insertion order on every write so that track
/// numbering and output order follow the descriptor order.
#[derive(Default)]
pub struct OutputFanout {
    outputs: Vec<TrackHandle>,
}

impl OutputFanout {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty fan-out with room for `capacity` tracks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outputs: Vec::with_capacity(capacity),
        }
    }

    /// Appends a track after the existing ones.
    pub fn push(&mut self, output: TrackHandle) {
        self.outputs.push(output);
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Tracks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackHandle> {
        self.outputs.iter()
    }

    /// Hands every track its own view of `data`. Views share storage, so no
    /// bytes are copied here.
    pub fn write_all(&self, data: &Bytes) {
        for output in &self.outputs {
            output.lock().sample_data(data.clone());
        }
    }

    /// Commits the most recent `size` bytes of every track as one sample.
    pub fn commit_all(&self, time_us: i64, flags: SampleFlags, size: u32) {
        for output in &self.outputs {
            output.lock().sample_metadata(time_us, flags, size, 0);
        }
    }
}

impl fmt::Debug for OutputFanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputFanout")
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::av::MemoryTrackOutput;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_fanout_writes_every_track() {
        let a = Arc::new(Mutex::new(MemoryTrackOutput::new()));
        let b = Arc::new(Mutex::new(MemoryTrackOutput::new()));
        let mut fanout = OutputFanout::with_capacity(2);
        fanout.push(a.clone());
        fanout.push(b.clone());
        assert_eq!(fanout.len(), 2);

        fanout.write_all(&Bytes::from_static(&[5, 6, 7]));
        fanout.commit_all(10, SampleFlags::KEY_FRAME, 3);

        for track in [&a, &b] {
            let track = track.lock();
            assert_eq!(track.samples().len(), 1);
            assert_eq!(track.samples()[0].data, Bytes::from_static(&[5, 6, 7]));
            assert_eq!(track.samples()[0].time_us, 10);
        }
    }

    #[test]
    fn test_empty_fanout() {
        let fanout = OutputFanout::new();
        assert!(fanout.is_empty());
        fanout.write_all(&Bytes::from_static(&[1]));
        fanout.commit_all(0, SampleFlags::KEY_FRAME, 1);
        assert_eq!(format!("{:?}", fanout), "OutputFanout { outputs: 0 }");
    }
}
