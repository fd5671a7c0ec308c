// tessel-core - Runtime options
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Options carried by a [`Registry`](crate::Registry).

use tessel_value::SeqOptions;

/// Settings applied to values created through a registry.
///
/// ```
/// use tessel_core::{Options, Registry};
///
/// let registry = Registry::with_options(Options::default().warn_on_lazy_reuse(true));
/// assert!(registry.seq_options().warn_on_reuse);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Options given to lazy sequences created by source functions
    /// (`lazy`, `range`, `iterate`...).
    pub lazy: SeqOptions,
}

impl Options {
    #[must_use]
    pub fn warn_on_lazy_reuse(mut self, on: bool) -> Self {
        self.lazy = self.lazy.with_reuse_warning(on);
        self
    }
}
