//! Culture state: the current culture and time zone of a session.
//!
//! A [`CultureState`] validates every change against its configuration and
//! broadcasts the new [`CultureSnapshot`] to its listeners. One state per
//! session needs no coordination. A state shared across threads is also fine:
//! each change runs its read-modify-notify sequence under a single transition
//! lock, so listeners always see the snapshot that triggered them and no
//! update is lost.
//!
//! Listeners run after the new state is visible. From inside a listener it
//! is fine to read the state and to subscribe, unsubscribe or count
//! listeners; changes to the listener list apply from the next notification.
//! Calling [`CultureState::set_culture`] or [`CultureState::set_time_zone`]
//! on the notifying state deadlocks.

use crate::config::CultureConfig;
use crate::error::CultureError;
use crate::i18n::{CultureCode, LanguageDescriptor, LanguageRegistry};
use chrono_tz::Tz;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::{debug, info, warn};

/// Point-in-time view of a culture state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureSnapshot {
    pub culture: CultureCode,
    pub time_zone: Tz,
}

/// Handle returned by [`CultureState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Arc<dyn Fn(&CultureSnapshot) -> anyhow::Result<()> + Send + Sync>;

struct Listeners {
    next_id: u64,
    entries: Vec<(Subscription, Listener)>,
}

pub struct CultureState {
    snapshot: RwLock<CultureSnapshot>,
    /// Serializes read-modify-notify; held while listeners run
    transition: Mutex<()>,
    /// Never held while listeners run
    listeners: Mutex<Listeners>,
    default_culture: CultureCode,
    default_time_zone: Tz,
    supported: Vec<LanguageDescriptor>,
}

impl std::fmt::Debug for CultureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CultureState")
            .field("current", &self.current())
            .field("default_culture", &self.default_culture)
            .field("default_time_zone", &self.default_time_zone)
            .field("supported", &self.supported)
            .finish()
    }
}

impl CultureState {
    /// Build a state from configuration, starting at the default culture
    /// and time zone.
    ///
    /// Supported codes that are not registered under their own code are
    /// skipped with a warning. The default culture is always supported and
    /// listed first when the configuration omits it.
    ///
    /// # Returns
    /// * `Ok(CultureState)` when the defaults are usable
    /// * `Err(CultureError)` when the default culture is not registered or the
    ///   default time zone is unknown (a startup misconfiguration)
    pub fn new(config: &CultureConfig, registry: &LanguageRegistry) -> Result<Self, CultureError> {
        config.validate(registry)?;
        let default_culture = config.default_culture_code()?;
        let default_time_zone = config.default_tz()?;

        let mut supported: Vec<LanguageDescriptor> = Vec::new();
        for raw in &config.supported_cultures {
            let Some(code) = CultureCode::parse(raw) else {
                warn!(code = %raw, "Ignoring unparseable supported culture");
                continue;
            };
            if supported.iter().any(|lang| lang.code == code) {
                continue;
            }
            match registry.resolve_or(code.as_str(), &default_culture) {
                Ok(descriptor) if descriptor.code == code => supported.push(descriptor.clone()),
                Ok(descriptor) => warn!(
                    code = %code,
                    resolved = %descriptor.code,
                    "Skipping supported culture without its own language descriptor"
                ),
                Err(e) => warn!(code = %code, error = %e, "Skipping unresolvable supported culture"),
            }
        }

        if !supported.iter().any(|lang| lang.code == default_culture) {
            let descriptor = registry.resolve_or(default_culture.as_str(), &default_culture)?;
            supported.insert(0, descriptor.clone());
        }

        Ok(Self {
            snapshot: RwLock::new(CultureSnapshot {
                culture: default_culture.clone(),
                time_zone: default_time_zone,
            }),
            transition: Mutex::new(()),
            listeners: Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
            default_culture,
            default_time_zone,
            supported,
        })
    }

    /// Get the current culture and time zone.
    pub fn current(&self) -> CultureSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Get the current culture code.
    pub fn culture(&self) -> CultureCode {
        self.current().culture
    }

    /// Get the current time zone.
    pub fn time_zone(&self) -> Tz {
        self.current().time_zone
    }

    /// Culture substituted for invalid or unsupported input.
    pub fn default_culture(&self) -> &CultureCode {
        &self.default_culture
    }

    /// Time zone substituted for unknown time zone ids.
    pub fn default_time_zone(&self) -> Tz {
        self.default_time_zone
    }

    /// Supported languages, in configured order.
    pub fn supported(&self) -> &[LanguageDescriptor] {
        &self.supported
    }

    /// Check whether `code` is one of the supported cultures.
    ///
    /// # Returns
    /// `true` if `code` has a descriptor in [`CultureState::supported`]; the
    /// default culture always does.
    pub fn is_supported(&self, code: &CultureCode) -> bool {
        self.supported.iter().any(|lang| lang.code == *code)
    }

    /// Switch the current culture.
    ///
    /// Unparseable or unsupported input is replaced by the default culture.
    /// Returns `true` when the culture changed and listeners were notified.
    pub fn set_culture(&self, requested: &str) -> bool {
        let code = match CultureCode::parse(requested) {
            Some(code) if self.is_supported(&code) => code,
            Some(code) => {
                warn!(requested = %code, fallback = %self.default_culture, "Unsupported culture, using default");
                self.default_culture.clone()
            }
            None => {
                warn!(requested = %requested, fallback = %self.default_culture, "Invalid culture, using default");
                self.default_culture.clone()
            }
        };

        self.transition(|snapshot| {
            if snapshot.culture == code {
                return false;
            }
            info!(from = %snapshot.culture, to = %code, "Culture changed");
            snapshot.culture = code;
            true
        })
    }

    /// Switch the current time zone.
    ///
    /// Ids unknown to the tz database are replaced by the default time zone.
    /// Returns `true` when the time zone changed and listeners were notified.
    pub fn set_time_zone(&self, requested: &str) -> bool {
        let zone = match Tz::from_str_insensitive(requested.trim()) {
            Ok(zone) => zone,
            Err(_) => {
                warn!(requested = %requested, fallback = %self.default_time_zone, "Invalid time zone, using default");
                self.default_time_zone
            }
        };

        self.transition(|snapshot| {
            if snapshot.time_zone == zone {
                return false;
            }
            info!(from = %snapshot.time_zone, to = %zone, "Time zone changed");
            snapshot.time_zone = zone;
            true
        })
    }

    /// Register a change listener. Listeners are called in subscription order.
    ///
    /// # Returns
    /// A [`Subscription`] handle for [`CultureState::unsubscribe`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CultureSnapshot) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut listeners = self.lock_listeners();
        let id = Subscription(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != subscription);
        listeners.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().entries.len()
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `change` and, if it reports a change, notify the listeners
    /// registered at that moment while still holding the transition lock.
    fn transition(&self, change: impl FnOnce(&mut CultureSnapshot) -> bool) -> bool {
        let _serialized = self
            .transition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let updated = {
            let mut snapshot = self
                .snapshot
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !change(&mut snapshot) {
                return false;
            }
            snapshot.clone()
        };

        // Collect first so listeners can touch the listener list
        let listeners: Vec<(Subscription, Listener)> = self
            .lock_listeners()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        notify(&listeners, &updated);
        true
    }
}

fn notify(listeners: &[(Subscription, Listener)], snapshot: &CultureSnapshot) {
    for (id, listener) in listeners {
        match catch_unwind(AssertUnwindSafe(|| listener(snapshot))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(subscription = id.0, error = %e, "Culture listener failed"),
            Err(_) => warn!(subscription = id.0, "Culture listener panicked"),
        }
    }
    debug!(listeners = listeners.len(), culture = %snapshot.culture, "Delivered culture change");
}
