//! Request tokens that let only the newest load update local state.

/// Identifies one issued load and the search term it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    search_term: String,
}

impl LoadTicket {
    /// Monotonically increasing sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The search term the load was issued with.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

/// Hands out load tickets and decides which responses are current.
///
/// A response is current only if its ticket is the most recently issued
/// one; anything older was superseded while in flight and is discarded.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    issued: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket for `search_term`.
    pub fn issue(&mut self, search_term: &str) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            seq: self.issued,
            search_term: search_term.to_string(),
        }
    }

    /// Returns true if a response for `ticket` may be applied.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Sequence number of the newest ticket, 0 before any load.
    pub fn latest(&self) -> u64 {
        self.issued
    }
}
