use core::fmt;

/// Bit width of the elapsed-millisecond bucket.
pub const TIMESTAMP_BITS: u32 = 41;
/// Bit width of the machine id.
pub const MACHINE_ID_BITS: u32 = 10;
/// Bit width of the per-bucket sequence.
pub const SEQUENCE_BITS: u32 = 12;

/// A packed time-mode identifier.
///
/// The layout is the classic Snowflake partition of a 64-bit value:
///
/// ```text
/// | 41 bits: elapsed ms bucket | 10 bits: machine id | 12 bits: sequence |
/// ```
///
/// packed as `timestamp << 22 | machine_id << 12 | sequence`. Continuous-mode
/// identifiers are plain counters and never pass through this type; it exists
/// so hosts can decode time-mode identifiers without hand-rolled shifts.
///
/// # Example
///
/// ```
/// use snowbank::SnowflakeId;
///
/// let id = SnowflakeId::from_components(42, 7, 3);
/// assert_eq!(id.timestamp(), 42);
/// assert_eq!(id.machine_id(), 7);
/// assert_eq!(id.sequence(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(u64);

impl SnowflakeId {
    /// Maximum elapsed-millisecond bucket: roughly 69 years past the epoch.
    pub const fn max_timestamp() -> u64 {
        (1 << TIMESTAMP_BITS) - 1
    }

    /// Maximum machine id (1023).
    pub const fn max_machine_id() -> u64 {
        (1 << MACHINE_ID_BITS) - 1
    }

    /// Maximum per-bucket sequence (4095).
    pub const fn max_sequence() -> u64 {
        (1 << SEQUENCE_BITS) - 1
    }

    /// Packs the three fields into one identifier.
    ///
    /// Each field must fit its bit width; out-of-range inputs would bleed
    /// into neighboring fields.
    pub const fn from_components(timestamp: u64, machine_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::max_timestamp());
        debug_assert!(machine_id <= Self::max_machine_id());
        debug_assert!(sequence <= Self::max_sequence());
        Self(
            timestamp << (MACHINE_ID_BITS + SEQUENCE_BITS)
                | machine_id << SEQUENCE_BITS
                | sequence,
        )
    }

    /// Reinterprets a raw 64-bit value as a packed identifier.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The elapsed-millisecond bucket this identifier was issued in.
    pub const fn timestamp(self) -> u64 {
        self.0 >> (MACHINE_ID_BITS + SEQUENCE_BITS)
    }

    /// The machine id of the issuing generator.
    pub const fn machine_id(self) -> u64 {
        (self.0 >> SEQUENCE_BITS) & Self::max_machine_id()
    }

    /// The sequence within the bucket.
    pub const fn sequence(self) -> u64 {
        self.0 & Self::max_sequence()
    }

    /// The raw 64-bit value.
    pub const fn to_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_u64()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
