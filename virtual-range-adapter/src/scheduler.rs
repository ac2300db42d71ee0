/// How raw scroll signals are rate-limited before the tracker sees them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum RateLimit {
    /// Every signal is handled immediately.
    #[default]
    None,
    /// Each signal pushes the pending run back to `now + wait_ms`.
    Debounce { wait_ms: u64 },
    /// The first signal schedules a run at `now + wait_ms`; signals arriving before it fires
    /// are folded into it.
    Throttle { wait_ms: u64 },
}

impl RateLimit {
    pub fn wait_ms(self) -> u64 {
        match self {
            Self::None => 0,
            Self::Debounce { wait_ms } | Self::Throttle { wait_ms } => wait_ms,
        }
    }
}

/// Timer-free debounce/throttle state machine.
///
/// The adapter reports each scroll signal with [`Self::signal`] and polls with
/// [`Self::poll`] from its timer/frame loop. Superseded signals are dropped, never merged:
/// the run that eventually fires reads the host state as it is at that moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollScheduler {
    rate_limit: RateLimit,
    due_ms: Option<u64>,
}

impl ScrollScheduler {
    pub fn new(rate_limit: RateLimit) -> Self {
        Self {
            rate_limit,
            due_ms: None,
        }
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
    }

    /// Switches policy. Any pending run is dropped.
    pub fn set_rate_limit(&mut self, rate_limit: RateLimit) {
        self.rate_limit = rate_limit;
        self.due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Records a scroll signal. Returns `true` when it must be handled right away.
    pub fn signal(&mut self, now_ms: u64) -> bool {
        match self.rate_limit {
            RateLimit::None => true,
            RateLimit::Throttle { wait_ms } => {
                if self.due_ms.is_some() {
                    return false;
                }
                if wait_ms == 0 {
                    return true;
                }
                self.due_ms = Some(now_ms.saturating_add(wait_ms));
                false
            }
            RateLimit::Debounce { wait_ms } => {
                if wait_ms == 0 {
                    self.due_ms = None;
                    return true;
                }
                self.due_ms = Some(now_ms.saturating_add(wait_ms));
                false
            }
        }
    }

    /// Returns `true` (once) when the pending run is due.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
    }
}
