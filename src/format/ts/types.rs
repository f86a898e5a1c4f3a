/// `data_identifier`, the first byte of every DVB subtitle PES payload
/// (ETSI EN 300 743).
pub const DATA_IDENTIFIER: u8 = 0x20;
/// `subtitle_stream_id`, the second byte.
pub const SUBTITLE_STREAM_ID: u8 = 0x00;

/// Number of leading payload bytes validated and stripped per sample.
pub const SUBTITLE_HEADER_SIZE: u8 = 2;

/// Flags reported by the packet framer when a PES packet starts.
///
/// Bits this crate does not know about are carried along and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PayloadFlags(u32);

impl PayloadFlags {
    /// No flags set.
    pub const NONE: PayloadFlags = PayloadFlags(0);
    /// The transport packet carrying this data started a new PES packet.
    pub const PAYLOAD_UNIT_START_INDICATOR: PayloadFlags = PayloadFlags(1);
    /// The adaptation field flagged a random access point.
    pub const RANDOM_ACCESS_INDICATOR: PayloadFlags = PayloadFlags(1 << 1);
    /// The PES packet starts a new access unit.
    pub const DATA_ALIGNMENT_INDICATOR: PayloadFlags = PayloadFlags(1 << 2);

    /// Raw flag bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Wraps raw flag bits, keeping unknown ones.
    pub const fn from_bits(bits: u32) -> Self {
        PayloadFlags(bits)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: PayloadFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the packet starts a new access unit.
    pub fn is_data_aligned(self) -> bool {
        self.contains(Self::DATA_ALIGNMENT_INDICATOR)
    }
}

impl std::ops::BitOr for PayloadFlags {
    type Output = PayloadFlags;

    fn bitor(self, rhs: PayloadFlags) -> PayloadFlags {
        PayloadFlags(self.0 | rhs.0)
    }
}
