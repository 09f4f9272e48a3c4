use parking_lot::Mutex;

use crate::{
    error::{ConfigError, Error, Result},
    id::SnowflakeId,
    settings::Settings,
    time::{TimeSource, WallClock, local_datetime_millis},
};

/// Continuous counters stop just short of the signed 64-bit ceiling.
const COUNTER_MAX: u64 = (1 << 63) - 1;

/// Mode of a generator, fixed at construction.
#[derive(Clone, Debug)]
enum Mode {
    /// Pure counter; identifiers are the counter values themselves.
    Continuous,
    /// Snowflake encoding against a fixed epoch, in whole milliseconds since
    /// the Unix epoch.
    Time { machine_id: u64, epoch: u64 },
}

/// Mutable generator state. Both fields are read and written as one unit
/// under the generator's lock.
#[derive(Debug)]
struct State {
    /// Counter value (continuous mode) or intra-bucket sequence (time mode).
    sequence: u64,
    /// Last observed elapsed-millisecond bucket. Monotonically non-decreasing;
    /// unused in continuous mode.
    elapsed: u64,
}

/// One named identifier stream.
///
/// A generator owns the mutable state of a single stream and hands out the
/// next identifier under its own lock, so concurrent callers on the same
/// stream serialize while callers on different streams never contend. The
/// clock is a [`TimeSource`] type parameter (defaulting to [`WallClock`]) so
/// tests can freeze or step time.
///
/// Hosts normally reach generators through a [`Registry`] rather than
/// constructing them directly.
///
/// [`Registry`]: crate::Registry
#[derive(Debug)]
pub struct Generator<C = WallClock> {
    name: String,
    mode: Mode,
    clock: C,
    state: Mutex<State>,
}

impl<C> Generator<C>
where
    C: TimeSource,
{
    /// Builds the generator for `name` from its configuration record.
    ///
    /// Continuous generators seed the counter from `settings.start` and
    /// ignore every time-mode field. Time generators validate the machine id
    /// against the 10-bit field and resolve `start_time`: absent or empty
    /// means the Unix epoch, anything else must parse as
    /// `"YYYY-MM-DD HH:MM:SS"` local time and must not lie after the current
    /// clock reading.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an out-of-range machine id or a
    /// malformed or future `start_time`. Callers are expected to treat these
    /// as fatal at startup; none of them can occur on a per-call path.
    pub fn from_settings(name: &str, settings: &Settings, clock: C) -> Result<Self, ConfigError> {
        let mode = if settings.continuous {
            Mode::Continuous
        } else {
            if settings.machine_id > SnowflakeId::max_machine_id() {
                return Err(ConfigError::MachineIdOutOfRange {
                    name: name.to_owned(),
                    machine_id: settings.machine_id,
                });
            }
            let epoch = match settings.start_time.as_deref() {
                None | Some("") => 0,
                Some(start_time) => {
                    let millis = local_datetime_millis(start_time).ok_or_else(|| {
                        ConfigError::InvalidStartTime {
                            name: name.to_owned(),
                            start_time: start_time.to_owned(),
                        }
                    })?;
                    if millis > clock.current_millis() {
                        return Err(ConfigError::StartTimeInFuture {
                            name: name.to_owned(),
                            start_time: start_time.to_owned(),
                        });
                    }
                    millis
                }
            };
            Mode::Time {
                machine_id: settings.machine_id,
                epoch,
            }
        };

        let sequence = if settings.continuous { settings.start } else { 0 };

        Ok(Self {
            name: name.to_owned(),
            mode,
            clock,
            state: Mutex::new(State {
                sequence,
                elapsed: 0,
            }),
        })
    }

    /// Returns the next identifier for this stream.
    ///
    /// The whole call runs under the generator's lock: one clock read,
    /// arithmetic, no I/O.
    ///
    /// In continuous mode the counter increments and is returned directly.
    /// In time mode a strictly newer millisecond starts a fresh bucket with
    /// sequence 0; otherwise the sequence increments modulo 4096, and a wrap
    /// carries into the next bucket so no (bucket, sequence) pair repeats.
    /// Under sustained load above 4096 calls per millisecond the bucket runs
    /// ahead of the wall clock; the same branch masks clock regression.
    ///
    /// # Errors
    ///
    /// - [`Error::Overflow`] when a continuous counter sits at 2^63 - 1. The
    ///   counter is left unchanged.
    /// - [`Error::TimeLimitExceeded`] once the bucket passes the 41-bit
    ///   limit. The bucket is not rolled back, so the generator never
    ///   recovers.
    pub fn next_id(&self) -> Result<u64> {
        let mut state = self.state.lock();
        match self.mode {
            Mode::Continuous => {
                if state.sequence >= COUNTER_MAX {
                    return Err(Error::Overflow);
                }
                state.sequence += 1;
                Ok(state.sequence)
            }
            Mode::Time { machine_id, epoch } => {
                // Readings below the epoch saturate to 0 and land in the
                // same-bucket branch like any stalled or regressed clock.
                let now = self.clock.current_millis().saturating_sub(epoch);
                if now > state.elapsed {
                    state.elapsed = now;
                    state.sequence = 0;
                } else {
                    state.sequence = (state.sequence + 1) & SnowflakeId::max_sequence();
                    if state.sequence == 0 {
                        state.elapsed += 1;
                    }
                }
                if state.elapsed > SnowflakeId::max_timestamp() {
                    return Err(Error::TimeLimitExceeded);
                }
                Ok(SnowflakeId::from_components(state.elapsed, machine_id, state.sequence).to_u64())
            }
        }
    }

    /// Overwrites the counter of a continuous generator.
    ///
    /// The next identifier is `value + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotContinuous`] in time mode, where the sequence
    /// field is coupled to the elapsed bucket and may not be set
    /// independently. Nothing is mutated in that case.
    pub fn set_start(&self, value: u64) -> Result<()> {
        if !self.is_continuous() {
            return Err(Error::NotContinuous {
                name: self.name.clone(),
            });
        }
        self.state.lock().sequence = value;
        Ok(())
    }

    /// The name this generator was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` for the pure-counter mode.
    pub fn is_continuous(&self) -> bool {
        matches!(self.mode, Mode::Continuous)
    }

    /// The machine id embedded in time-mode identifiers; `None` in
    /// continuous mode.
    pub fn machine_id(&self) -> Option<u64> {
        match self.mode {
            Mode::Time { machine_id, .. } => Some(machine_id),
            Mode::Continuous => None,
        }
    }
}
