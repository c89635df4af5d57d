//! Pool termination state machine

/// `Running` → (close) → `Draining` → (every worker exited) → `Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// More input may still arrive; idle workers ask for it
    Running,
    /// No more input; idle workers are closed once the pool is quiescent
    Draining,
    Done,
}

impl PoolState {
    pub fn accepts_input(&self) -> bool {
        matches!(self, PoolState::Running)
    }
}
