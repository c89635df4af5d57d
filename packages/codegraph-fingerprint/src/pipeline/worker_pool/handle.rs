//! Cross-thread handle onto a running pool

use crossbeam_channel::{Receiver, Sender};

use crate::shared::models::{CodeChunk, CodegraphError, Result};

/// Requests from outside the coordinator
#[derive(Debug)]
pub(crate) enum Control {
    Submit(CodeChunk),
    Close,
}

/// Submit chunks and close the pool from any thread.
///
/// The pool also treats the loss of every handle as a close.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    pub(crate) control: Sender<Control>,
    pub(crate) input_requested: Receiver<()>,
}

impl PoolHandle {
    pub fn submit(&self, chunk: CodeChunk) -> Result<()> {
        self.control
            .send(Control::Submit(chunk))
            .map_err(|_| CodegraphError::pool("pool no longer accepts jobs"))
    }

    /// No more input will arrive
    pub fn close(&self) -> Result<()> {
        self.control
            .send(Control::Close)
            .map_err(|_| CodegraphError::pool("pool already finished"))
    }

    /// Signals raised while running whenever a worker found the queue empty
    pub fn input_requested(&self) -> &Receiver<()> {
        &self.input_requested
    }
}

/// Coalescing signal: at most one pending notification
pub(crate) fn signal(sender: &Sender<()>) {
    let _ = sender.try_send(());
}
