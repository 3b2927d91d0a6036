use std::sync::Arc;

use dashmap::DashSet;

/// Revoked-token set consulted on every authenticated request.
///
/// Keys are jti values. Membership check and insert are individually atomic
/// (DashSet), which is all the revocation path needs. Entries are never
/// evicted — revocation outlives the token's own expiry, and memory grows
/// with the number of logouts since process start. The set is injected
/// through `AppState` rather than held in a module-level global, so tests
/// get an isolated instance and a persistent backend can be swapped in.
#[derive(Clone, Default)]
pub struct Blacklist {
    revoked: Arc<DashSet<String>>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token identifier as revoked. Irreversible.
    pub fn add(&self, jti: &str) {
        self.revoked.insert(jti.to_string());
    }

    pub fn contains(&self, jti: &str) -> bool {
        self.revoked.contains(jti)
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────
