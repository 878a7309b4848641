//! # Replicated Field
//!
//! A single authoritatively owned value. Every write, on either side of the
//! connection, goes through one hook path that receives the field's own
//! previously stored value and the new one. Each commit carries a version
//! that only ever grows, so observers can discard anything that arrives
//! twice or out of order.

use std::fmt;
use std::mem;

/// Commit counter of a single field. Zero means "never written".
pub type FieldVersion = u64;

/// Callback invoked on every write and on every observer (re)connection,
/// with `(previous, new)`.
pub type FieldHook<T> = Box<dyn FnMut(&T, &T) + Send + 'static>;

/// One replicated value with its version and hook
pub struct ReplicatedField<T> {
    value: T,
    version: FieldVersion,
    hook: Option<FieldHook<T>>,
}

impl<T> ReplicatedField<T> {
    /// Create an unwritten field holding `value`
    pub fn new(value: T) -> Self {
        Self::from_snapshot(0, value)
    }

    /// Rebuild a field from a committed snapshot. The hook does not run.
    pub fn from_snapshot(version: FieldVersion, value: T) -> Self {
        Self {
            value,
            version,
            hook: None,
        }
    }

    /// Attach the hook, builder style
    pub fn with_hook(mut self, hook: impl FnMut(&T, &T) + Send + 'static) -> Self {
        self.set_hook(hook);
        self
    }

    /// Replace the hook
    pub fn set_hook(&mut self, hook: impl FnMut(&T, &T) + Send + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Version of the last commit applied to this field
    pub fn version(&self) -> FieldVersion {
        self.version
    }

    /// Commit a new value. Authority only.
    ///
    /// The hook runs exactly once, with the value this field stored before the
    /// call, even when the new value equals the old one.
    pub fn set(&mut self, value: T) -> FieldVersion {
        let previous = mem::replace(&mut self.value, value);
        self.version += 1;
        self.run_hook(&previous);
        self.version
    }

    /// Apply a commit received from the authority.
    ///
    /// Returns `false` and leaves the field untouched when `version` is not
    /// newer than the stored one.
    pub fn apply(&mut self, version: FieldVersion, value: T) -> bool {
        if version <= self.version {
            return false;
        }
        let previous = mem::replace(&mut self.value, value);
        self.version = version;
        self.run_hook(&previous);
        true
    }

    /// Re-announce the current value to the hook as `(current, current)`.
    ///
    /// Called once per field whenever an observer (re)connects so hook side
    /// effects run even if the value never changes. Safe to repeat.
    pub fn on_observer_connect(&mut self) {
        if let Some(hook) = self.hook.as_mut() {
            hook(&self.value, &self.value);
        }
    }

    fn run_hook(&mut self, previous: &T) {
        if let Some(hook) = self.hook.as_mut() {
            hook(previous, &self.value);
        }
    }
}

impl<T: Default> Default for ReplicatedField<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReplicatedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicatedField")
            .field("value", &self.value)
            .field("version", &self.version)
            .field("has_hook", &self.hook.is_some())
            .finish()
    }
}
