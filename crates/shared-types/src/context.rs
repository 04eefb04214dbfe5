//! # Execution Context
//!
//! Per-operation data threaded explicitly through a single call chain.
//! Nothing here is ever persisted or stored globally.

/// Context of the ledger operation currently executing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// When set, pre-transfer restriction checks are skipped for this
    /// operation only (e.g. module-internal fee or escrow movements).
    bypass_restrictions: bool,
}

impl ExecutionContext {
    /// A normal, fully checked context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bypass_restrictions: false,
        }
    }

    /// Derive a context with restriction checks disabled.
    #[must_use]
    pub const fn with_bypass(self) -> Self {
        Self {
            bypass_restrictions: true,
        }
    }

    /// Whether restriction checks are bypassed.
    #[must_use]
    pub const fn bypass(&self) -> bool {
        self.bypass_restrictions
    }
}
