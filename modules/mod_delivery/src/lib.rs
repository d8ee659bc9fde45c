use splithello_traits::{DeliveryStrategy, WriteStep};
use std::time::Duration;

/// Pause used between the two halves unless configured otherwise. Long enough
/// that the halves reach the peer as separate reads on ordinary stacks.
pub const DEFAULT_SPLIT_DELAY: Duration = Duration::from_secs(1);

/// Baseline: the whole message in one write call.
pub struct SingleWrite;

impl DeliveryStrategy for SingleWrite {
    fn plan(&self, len: usize) -> Vec<WriteStep> {
        vec![WriteStep::Write(0..len)]
    }

    fn name(&self) -> &str {
        "a single write"
    }
}

/// Lower half (`len / 2` bytes), a pause, then the remainder.
pub struct SplitWrite {
    pub delay: Duration,
}

impl Default for SplitWrite {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SPLIT_DELAY,
        }
    }
}

impl DeliveryStrategy for SplitWrite {
    fn plan(&self, len: usize) -> Vec<WriteStep> {
        let half = len / 2;
        vec![
            WriteStep::Write(0..half),
            WriteStep::Pause(self.delay),
            WriteStep::Write(half..len),
        ]
    }

    fn name(&self) -> &str {
        "two separate writes"
    }
}
