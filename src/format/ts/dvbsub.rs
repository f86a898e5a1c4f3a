use super::fanout::OutputFanout;
use super::reader::ElementaryStreamReader;
use super::types::*;
use crate::av::{
    ExtractorOutput, Format, SampleFlags, TrackIdGenerator, TrackType, APPLICATION_DVBSUBS,
};
use crate::config::ReaderConfig;
use crate::error::{DvbSubError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// One subtitle service announced for a DVB subtitle stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DvbSubtitleInfo {
    /// ISO 639-2 language code.
    pub language: String,
    /// Subtitling type from the service descriptor.
    pub subtitling_type: u8,
    /// Decoder setup data: composition page id then ancillary page id, both
    /// big-endian.
    pub initialization_data: Bytes,
}

impl DvbSubtitleInfo {
    /// Describes a service by its page ids.
    pub fn new(
        language: impl Into<String>,
        subtitling_type: u8,
        composition_page_id: u16,
        ancillary_page_id: u16,
    ) -> Self {
        let mut init = BytesMut::with_capacity(4);
        init.put_u16(composition_page_id);
        init.put_u16(ancillary_page_id);
        Self {
            language: language.into(),
            subtitling_type,
            initialization_data: init.freeze(),
        }
    }

    /// Page id carrying this service's compositions.
    pub fn composition_page_id(&self) -> Option<u16> {
        self.page_id(0)
    }

    /// Page id carrying data shared between services.
    pub fn ancillary_page_id(&self) -> Option<u16> {
        self.page_id(2)
    }

    fn page_id(&self, offset: usize) -> Option<u16> {
        let init = self.initialization_data.as_ref();
        if init.len() < 4 {
            return None;
        }
        Some((&init[offset..]).get_u16())
    }
}

/// Adds a chunk length to a sample length, saturating at `u32::MAX`.
fn add_sample_len(written: u32, len: usize) -> u32 {
    written.saturating_add(u32::try_from(len).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleState {
    Idle,
    Writing {
        /// Header bytes still to validate, counting down from 2.
        bytes_to_check: u8,
        bytes_written: u32,
        time_us: Option<i64>,
    },
}

/// Reads DVB subtitle PES packets and writes one sample per packet to every
/// subtitle service track.
///
/// Each aligned PES packet carries a `data_identifier` (0x20) and a
/// `subtitle_stream_id` (0x00) ahead of the subtitle segments. Those two bytes
/// are checked and stripped; a packet whose header does not match is dropped
/// whole. The check is resumable, so the header may be split across
/// `consume` calls.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use dvbsub::av::{MemoryExtractorOutput, TrackIdGenerator};
/// use dvbsub::format::ts::{DvbSubtitleInfo, DvbSubtitleReader, ElementaryStreamReader, PayloadFlags};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let infos = vec![DvbSubtitleInfo::new("eng", 0x10, 1, 1)];
/// let mut reader = DvbSubtitleReader::new(infos, "video/mp2t");
/// let mut output = MemoryExtractorOutput::new();
/// reader.create_tracks(&mut output, &mut TrackIdGenerator::new(None, 1, 1));
///
/// reader.packet_started(Some(1000), PayloadFlags::DATA_ALIGNMENT_INDICATOR);
/// reader.consume(&mut Bytes::from_static(&[0x20, 0x00, 0xAA, 0xBB]));
/// reader.packet_finished(false)?;
///
/// let track = output.track_output(1).unwrap();
/// assert_eq!(track.lock().samples()[0].data.as_ref(), &[0xAA, 0xBB]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DvbSubtitleReader {
    subtitle_infos: Vec<DvbSubtitleInfo>,
    container_mime_type: String,
    outputs: OutputFanout,
    state: SampleState,
}

impl DvbSubtitleReader {
    /// Creates a reader with one track per entry of `subtitle_infos`.
    pub fn new(subtitle_infos: Vec<DvbSubtitleInfo>, container_mime_type: impl Into<String>) -> Self {
        let outputs = OutputFanout::with_capacity(subtitle_infos.len());
        Self {
            subtitle_infos,
            container_mime_type: container_mime_type.into(),
            outputs,
            state: SampleState::Idle,
        }
    }

    /// Creates a reader using the container MIME type of `config`.
    pub fn with_config(subtitle_infos: Vec<DvbSubtitleInfo>, config: &ReaderConfig) -> Self {
        Self::new(subtitle_infos, config.container_mime_type.clone())
    }

    /// Whether a sample is being assembled.
    pub fn is_writing_sample(&self) -> bool {
        matches!(self.state, SampleState::Writing { .. })
    }

    /// Number of tracks created.
    pub fn track_count(&self) -> usize {
        self.outputs.len()
    }

    /// The services this reader was created for.
    pub fn subtitle_infos(&self) -> &[DvbSubtitleInfo] {
        &self.subtitle_infos
    }
}

impl ElementaryStreamReader for DvbSubtitleReader {
    fn seek(&mut self) {
        if self.is_writing_sample() {
            log::trace!("seek discarded the sample in progress");
        }
        self.state = SampleState::Idle;
    }

    fn create_tracks(&mut self, output: &mut dyn ExtractorOutput, id_generator: &mut TrackIdGenerator) {
        debug_assert!(self.outputs.is_empty(), "create_tracks called twice");

        for info in &self.subtitle_infos {
            id_generator.generate_new_id();
            let track = output.track(id_generator.track_id(), TrackType::Text);
            let format = Format::builder()
                .with_id(id_generator.format_id())
                .with_container_mime_type(self.container_mime_type.as_str())
                .with_sample_mime_type(APPLICATION_DVBSUBS)
                .with_initialization_data(vec![info.initialization_data.clone()])
                .with_language(Some(info.language.clone()))
                .build();
            log::debug!(
                "created DVB subtitle track {} ({}), language {}",
                id_generator.track_id(),
                id_generator.format_id(),
                info.language
            );
            track.lock().format(format);
            self.outputs.push(track);
        }
    }

    fn packet_started(&mut self, pes_time_us: Option<i64>, flags: PayloadFlags) {
        if !flags.is_data_aligned() {
            return;
        }
        log::trace!("sample started at {:?}us", pes_time_us);
        self.state = SampleState::Writing {
            bytes_to_check: SUBTITLE_HEADER_SIZE,
            bytes_written: 0,
            time_us: pes_time_us,
        };
    }

    fn consume(&mut self, data: &mut Bytes) {
        let SampleState::Writing {
            bytes_to_check,
            bytes_written,
            ..
        } = &mut self.state
        else {
            return;
        };

        while *bytes_to_check > 0 {
            if !data.has_remaining() {
                return;
            }
            let expected = if *bytes_to_check == SUBTITLE_HEADER_SIZE {
                DATA_IDENTIFIER
            } else {
                SUBTITLE_STREAM_ID
            };
            if data.get_u8() != expected {
                self.state = SampleState::Idle;
                return;
            }
            *bytes_to_check -= 1;
        }

        if !data.has_remaining() {
            return;
        }
        let payload = data.split_to(data.len());
        *bytes_written = add_sample_len(*bytes_written, payload.len());
        self.outputs.write_all(&payload);
    }

    fn packet_finished(&mut self, _is_end_of_input: bool) -> Result<()> {
        let SampleState::Writing {
            bytes_to_check,
            bytes_written,
            time_us,
        } = std::mem::replace(&mut self.state, SampleState::Idle)
        else {
            return Ok(());
        };

        let time_us = time_us.ok_or(DvbSubError::SampleTimeUnset)?;
        if bytes_to_check > 0 {
            // The packet ended inside the header.
            return Ok(());
        }
        log::trace!("sample finished at {}us, {} bytes", time_us, bytes_written);
        self.outputs.commit_all(time_us, SampleFlags::KEY_FRAME, bytes_written);
        Ok(())
    }
}
