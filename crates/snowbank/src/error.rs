//! Error types for named identifier streams.
//!
//! Two taxonomies with different lifecycles:
//!
//! - [`Error`] covers per-call failures returned to the immediate caller.
//!   None of them are retried or logged internally.
//! - [`ConfigError`] covers startup validation of the settings document. A
//!   host should treat any of these as fatal: the registry constructor is
//!   all-or-nothing, so no generator is reachable once one is returned.

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Per-call error taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested generator name is unregistered.
    #[error("generator `{name}` not found")]
    NotFound { name: String },

    /// `set_start` was invoked on a time-mode generator.
    #[error("generator `{name}` not continuous")]
    NotContinuous { name: String },

    /// A continuous counter has exhausted its 63-bit range. The counter is
    /// left unchanged, so every further call fails the same way.
    #[error("sequence overflow")]
    Overflow,

    /// A time-mode generator's elapsed bucket has passed the 41-bit limit
    /// relative to its epoch. The bucket is monotonic, so the generator can
    /// never succeed again.
    #[error("over the time limit")]
    TimeLimitExceeded,
}

/// Startup validation errors for the settings document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings document could not be read.
    #[error("failed to read settings document: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document is not a valid name-to-settings mapping.
    #[error("malformed settings document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A time-mode machine id does not fit the 10-bit field.
    #[error("generator `{name}`: machine id {machine_id} out of range (0-1023)")]
    MachineIdOutOfRange { name: String, machine_id: u64 },

    /// A `start_time` did not parse as `"YYYY-MM-DD HH:MM:SS"` local time, or
    /// names an instant the local calendar cannot represent.
    #[error("generator `{name}`: invalid start time `{start_time}`")]
    InvalidStartTime { name: String, start_time: String },

    /// A `start_time` lies after the current clock reading.
    #[error("generator `{name}`: start time `{start_time}` is in the future")]
    StartTimeInFuture { name: String, start_time: String },
}
