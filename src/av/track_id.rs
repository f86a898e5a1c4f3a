use crate::config::ReaderConfig;

/// Hands out track ids, and the matching format ids, for the tracks of one
/// program.
///
/// Ids advance only on [`generate_new_id`](TrackIdGenerator::generate_new_id);
/// reading an id before the first call is a programmer error and panics.
#[derive(Debug, Clone)]
pub struct TrackIdGenerator {
    prefix: String,
    first_track_id: u32,
    track_id_increment: u32,
    track_id: Option<u32>,
    format_id: String,
}

impl TrackIdGenerator {
    /// Creates a generator. Format ids are prefixed with `program_number` when given.
    pub fn new(program_number: Option<u32>, first_track_id: u32, track_id_increment: u32) -> Self {
        Self {
            prefix: program_number.map(|p| format!("{}/", p)).unwrap_or_default(),
            first_track_id,
            track_id_increment,
            track_id: None,
            format_id: String::new(),
        }
    }

    /// Creates a generator using the id settings of `config`.
    pub fn from_config(program_number: Option<u32>, config: &ReaderConfig) -> Self {
        Self::new(program_number, config.first_track_id, config.track_id_increment)
    }

    /// Advances to the next track id.
    pub fn generate_new_id(&mut self) {
        let next = match self.track_id {
            None => self.first_track_id,
            Some(id) => id.wrapping_add(self.track_id_increment),
        };
        self.track_id = Some(next);
        self.format_id = format!("{}{}", self.prefix, next);
    }

    /// The current track id.
    pub fn track_id(&self) -> u32 {
        match self.track_id {
            Some(id) => id,
            None => panic!("generate_new_id() must be called before track_id()"),
        }
    }

    /// The current format id.
    pub fn format_id(&self) -> &str {
        if self.track_id.is_none() {
            panic!("generate_new_id() must be called before format_id()");
        }
        &self.format_id
    }
}
