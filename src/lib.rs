#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # dvbsub - DVB Subtitle Stream Reader
//!
//! `dvbsub` extracts DVB subtitle samples from the PES packets of an MPEG
//! transport stream and writes them, with their presentation times, to one
//! track per subtitle service.
//!
//! The crate does not split transport packets itself. A framer feeds each
//! reader packet-start, payload and packet-finish events; the reader checks
//! and strips the two-byte subtitle header of every packet and emits one
//! key-frame sample per packet to each track.
//!
//! ## Quick Start
//!
//! ```rust
//! use bytes::Bytes;
//! use dvbsub::av::{MemoryExtractorOutput, TrackIdGenerator};
//! use dvbsub::format::ts::{DvbSubtitleInfo, DvbSubtitleReader, ElementaryStreamReader, PayloadFlags};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = dvbsub::config::current();
//! let mut reader = DvbSubtitleReader::with_config(
//!     vec![DvbSubtitleInfo::new("eng", 0x10, 1, 1)],
//!     &config,
//! );
//! let mut output = MemoryExtractorOutput::new();
//! reader.create_tracks(&mut output, &mut TrackIdGenerator::from_config(None, &config));
//!
//! reader.packet_started(Some(1000), PayloadFlags::DATA_ALIGNMENT_INDICATOR);
//! reader.consume(&mut Bytes::from_static(&[0x20, 0x00, 0xAA, 0xBB]));
//! reader.packet_finished(false)?;
//!
//! let tracks = output.tracks();
//! assert_eq!(tracks[0].lock().samples()[0].data.as_ref(), &[0xAA, 0xBB]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - `av`: track formats, sample flags, track sinks and id generation
//! - `format`: elementary stream readers for transport streams
//! - `config`: reader settings from the environment or a config file
//! - `error`: error type and `Result` alias

/// Track formats, sinks and id generation
pub mod av;

/// Configuration module
pub mod config;

/// Error types and utilities
pub mod error;

/// Elementary stream readers
pub mod format;

pub use error::{DvbSubError, Result};
