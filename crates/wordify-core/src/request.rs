//! Request sequencing for background calls.
//!
//! Every request on a channel takes a ticket. Only the response holding the
//! latest ticket may update state; anything older is stale and dropped.

/// Identifies one request on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
    in_flight: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any still in flight
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Mark a response as received. Returns true if it should be applied.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) && self.in_flight {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Abandon any request in flight; its response will be ignored
    pub fn reset(&mut self) {
        self.latest += 1;
        self.in_flight = false;
    }
}
