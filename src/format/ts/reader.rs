use super::types::PayloadFlags;
use crate::av::{ExtractorOutput, TrackIdGenerator};
use crate::error::Result;
use bytes::Bytes;

/// Consumer of the payload of one elementary stream, fed PES packet by PES
/// packet by a transport stream framer.
///
/// Calls for one reader arrive strictly in sequence:
/// `packet_started`, any number of `consume`, then `packet_finished`.
/// `seek` may come between any two calls.
pub trait ElementaryStreamReader {
    /// Drops any partially read sample after a discontinuity.
    fn seek(&mut self);

    /// Creates the tracks this reader writes to. Called once per stream.
    fn create_tracks(&mut self, output: &mut dyn ExtractorOutput, id_generator: &mut TrackIdGenerator);

    /// A PES packet starts. `pes_time_us` is its presentation time if the
    /// header carried one.
    fn packet_started(&mut self, pes_time_us: Option<i64>, flags: PayloadFlags);

    /// Payload bytes of the current packet. The reader advances `data` past
    /// whatever it consumed.
    fn consume(&mut self, data: &mut Bytes);

    /// The current PES packet ended.
    fn packet_finished(&mut self, is_end_of_input: bool) -> Result<()>;
}

/// One call into an [`ElementaryStreamReader`], as recorded from a framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PesEvent {
    /// A PES packet started.
    Start {
        /// Presentation time, if the PES header had one.
        time_us: Option<i64>,
        /// Payload flags reported by the framer.
        flags: PayloadFlags,
    },
    /// A chunk of packet payload.
    Data(Bytes),
    /// The PES packet ended.
    Finish {
        /// Whether the input ended with this packet.
        end_of_input: bool,
    },
    /// The stream was repositioned.
    Seek,
}

impl PesEvent {
    /// Shorthand for an aligned packet start at `time_us`.
    pub fn aligned_start(time_us: i64) -> Self {
        PesEvent::Start {
            time_us: Some(time_us),
            flags: PayloadFlags::DATA_ALIGNMENT_INDICATOR,
        }
    }

    /// Shorthand for a payload chunk.
    pub fn data(bytes: impl Into<Bytes>) -> Self {
        PesEvent::Data(bytes.into())
    }
}

/// Feeds recorded events to `reader` in order, stopping at the first error.
pub fn replay<R, I>(reader: &mut R, events: I) -> Result<()>
where
    R: ElementaryStreamReader + ?Sized,
    I: IntoIterator<Item = PesEvent>,
{
    for event in events {
        match event {
            PesEvent::Start { time_us, flags } => reader.packet_started(time_us, flags),
            PesEvent::Data(mut data) => reader.consume(&mut data),
            PesEvent::Finish { end_of_input } => reader.packet_finished(end_of_input)?,
            PesEvent::Seek => reader.seek(),
        }
    }
    Ok(())
}
