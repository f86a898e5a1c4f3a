//! # DVB Subtitle Elementary Stream Reading
//!
//! Readers in this module sit behind a transport stream framer. The framer
//! splits each elementary stream into PES packets and reports, per packet,
//! a start event with the presentation time and payload flags, the payload
//! bytes in one or more chunks, and a finish event.
//!
//! - [`ElementaryStreamReader`]: the per-stream call sequence
//! - [`DvbSubtitleReader`]: turns DVB subtitle PES packets into samples
//! - [`OutputFanout`]: writes one stream to several tracks
//! - [`PesEvent`] / [`replay`]: drive a reader from a recorded call list
//!
//! ## Example
//!
//! ```rust
//! use dvbsub::av::{MemoryExtractorOutput, TrackIdGenerator};
//! use dvbsub::format::ts::{replay, DvbSubtitleInfo, DvbSubtitleReader, ElementaryStreamReader, PesEvent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let services = vec![
//!     DvbSubtitleInfo::new("eng", 0x10, 1, 1),
//!     DvbSubtitleInfo::new("deu", 0x10, 2, 2),
//! ];
//! let mut reader = DvbSubtitleReader::new(services, "video/mp2t");
//! let mut output = MemoryExtractorOutput::new();
//! reader.create_tracks(&mut output, &mut TrackIdGenerator::new(Some(1), 1, 1));
//!
//! replay(&mut reader, vec![
//!     PesEvent::aligned_start(40_000),
//!     PesEvent::data(vec![0x20, 0x00, 0x0F, 0x10]),
//!     PesEvent::Finish { end_of_input: true },
//! ])?;
//!
//! for track in output.tracks() {
//!     assert_eq!(track.lock().samples()[0].time_us, 40_000);
//! }
//! # Ok(())
//! # }
//! ```

/// DVB subtitle reader and service descriptors
pub mod dvbsub;

/// Fan-out of one elementary stream to several tracks
pub mod fanout;

/// Reader trait and recorded framer events
pub mod reader;

/// Payload flags and header constants
pub mod types;


pub use dvbsub::{DvbSubtitleInfo, DvbSubtitleReader};
pub use fanout::OutputFanout;
pub use reader::{replay, ElementaryStreamReader, PesEvent};
pub use types::{PayloadFlags, DATA_IDENTIFIER, SUBTITLE_STREAM_ID};
