/// MPEG transport stream elementary stream readers
pub mod ts;

pub use self::ts::{DvbSubtitleReader, ElementaryStreamReader, OutputFanout, PayloadFlags};
