use std::{collections::HashMap, fs, path::Path, sync::Arc};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::{
    error::{ConfigError, Error, Result},
    generator::Generator,
    settings::{Settings, SettingsMap},
    time::{TimeSource, WallClock},
};

/// The process-wide mapping from stream name to its [`Generator`].
///
/// A registry is built once from the settings document and then shared by
/// reference with whichever components issue identifiers. Construction is
/// all-or-nothing: every configured generator validates, or the constructor
/// returns a [`ConfigError`] and no generator is ever reachable.
///
/// Two independent lock scopes keep unrelated streams from contending: the
/// registry's reader-biased lock covers only the O(1) map operations
/// (inserts happen at startup, lookups take the shared path), and each
/// generator's own lock covers its state for the duration of one call. The
/// registry lock is never held across a generator's critical section.
///
/// # Example
///
/// ```
/// use snowbank::Registry;
///
/// let registry = Registry::from_json_str(
///     r#"{
///         "orders": { "continuous": true, "start": 1000 },
///         "events": { "continuous": false, "machine_id": 7 }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(registry.generate("orders").unwrap(), 1001);
/// assert_eq!(registry.generate_decimal("orders").unwrap(), "1002");
/// ```
#[derive(Debug)]
pub struct Registry<C = WallClock> {
    generators: RwLock<HashMap<String, Arc<Generator<C>>>>,
    clock: C,
}

impl Registry {
    /// Builds a registry from a JSON settings document: an object mapping
    /// each stream name to its [`Settings`] record.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is not such an object, or any
    /// validation error from the entries themselves.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let settings: SettingsMap = serde_json::from_str(document)?;
        Self::from_settings(&settings, WallClock)
    }

    /// Reads and parses the JSON settings document at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the document cannot be read, plus everything
    /// [`Registry::from_json_str`] can return.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let document = fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }
}

impl<C> Registry<C>
where
    C: TimeSource + Clone,
{
    /// Fallible bulk construction from an already-parsed settings mapping.
    ///
    /// Every entry is validated and constructed before the registry exists;
    /// the first invalid entry aborts the whole construction, so a host can
    /// never start with a partially-initialized registry.
    pub fn from_settings(settings: &SettingsMap, clock: C) -> Result<Self, ConfigError> {
        let mut generators = HashMap::with_capacity(settings.len());
        for (name, entry) in settings {
            let generator = Generator::from_settings(name, entry, clock.clone())?;
            debug!(name = %name, continuous = entry.continuous, "registered generator");
            generators.insert(name.clone(), Arc::new(generator));
        }
        info!(count = generators.len(), "identifier registry ready");
        Ok(Self {
            generators: RwLock::new(generators),
            clock,
        })
    }

    /// Registers one additional stream. Idempotent: an already-registered
    /// name keeps its live state and its original settings, and `Ok` is
    /// returned without validating the new record.
    ///
    /// Validation runs outside the write lock; the insert re-checks presence
    /// under the lock, so two racing callers cannot construct the same name
    /// twice.
    ///
    /// # Errors
    ///
    /// The same validation errors as [`Registry::from_settings`], for new
    /// names only.
    pub fn register(&self, name: &str, settings: &Settings) -> Result<(), ConfigError> {
        if self.generators.read().contains_key(name) {
            return Ok(());
        }
        let generator = Arc::new(Generator::from_settings(name, settings, self.clock.clone())?);
        let mut generators = self.generators.write();
        generators.entry(name.to_owned()).or_insert_with(|| {
            debug!(name = %name, continuous = settings.continuous, "registered generator");
            generator
        });
        Ok(())
    }

    /// Resolves `name` to its generator.
    ///
    /// The returned handle is independent of the registry lock; callers may
    /// hold it for the process lifetime.
    pub fn lookup(&self, name: &str) -> Option<Arc<Generator<C>>> {
        self.generators.read().get(name).cloned()
    }

    /// Issues the next identifier from the named stream.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unregistered name, or whatever the
    /// generator itself returns ([`Error::Overflow`],
    /// [`Error::TimeLimitExceeded`]).
    pub fn generate(&self, name: &str) -> Result<u64> {
        self.lookup(name)
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })?
            .next_id()
    }

    /// Base-10 rendering of [`Registry::generate`].
    pub fn generate_decimal(&self, name: &str) -> Result<String> {
        self.generate(name).map(|id| id.to_string())
    }

    /// Lowercase base-16 rendering of [`Registry::generate`], without prefix
    /// or leading-zero padding.
    pub fn generate_hex(&self, name: &str) -> Result<String> {
        self.generate(name).map(|id| format!("{id:x}"))
    }

    /// Overwrites the counter of the named continuous stream; its next
    /// identifier is `value + 1`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unregistered name,
    /// [`Error::NotContinuous`] for a time-mode stream.
    pub fn set_start(&self, name: &str, value: u64) -> Result<()> {
        self.lookup(name)
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })?
            .set_start(value)
    }
}
