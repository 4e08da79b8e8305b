/// Monotonic bill-number source, starting at 1.
///
/// The caller must advance the sequence and insert the numbered record inside
/// one critical section; the memory store does both under its mutex. The
/// Postgres backend keeps the equivalent state in the `bill_sequence` counter
/// row instead, so numbering survives restarts and is shared across server
/// instances.
#[derive(Debug)]
pub(crate) struct BillSequence {
    last: i64,
}

impl BillSequence {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Claim the next number. Claimed numbers are never reissued, even when
    /// the bill that held one is deleted.
    pub fn advance(&mut self) -> i64 {
        self.last += 1;
        self.last
    }
}
