//! Sequence tagging for row-source fetches ("last request wins").

/// Handle for one issued fetch.
///
/// The sequence number is compared against the latest issued one when the
/// fetch completes; anything older is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: Option<String>,
}

impl FetchTicket {
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query the fetch was issued for, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// Issues monotonically increasing fetch tickets.
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    issued: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding every earlier one.
    pub fn issue(&mut self, query: Option<&str>) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            query: query.map(str::to_string),
        }
    }

    /// Mark every outstanding ticket stale without issuing a new fetch.
    pub fn supersede(&mut self) {
        self.issued += 1;
    }

    /// Check if `ticket` belongs to the most recently issued fetch.
    #[inline]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Check if a newer fetch has been issued since `ticket`.
    #[inline]
    pub fn is_stale(&self, ticket: &FetchTicket) -> bool {
        !self.is_current(ticket)
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows were accepted and the tree rebuilt.
    Applied { records: usize },
    /// A newer fetch was issued; the result was discarded.
    Stale,
    /// The source failed; the previous tree was kept.
    Failed,
}
