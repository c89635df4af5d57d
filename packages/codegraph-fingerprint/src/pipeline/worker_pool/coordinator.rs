//! Pool coordinator
//!
//! Single-threaded actor that owns the job queue, the in-flight multiset and
//! the remainder buffer. Workers only ever see typed messages; nothing here
//! is shared behind a lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, never, select, unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use super::handle::{signal, Control, PoolHandle};
use super::state::PoolState;
use super::worker::{spawn_worker, WorkerEvent};
use crate::config::FingerprintConfig;
use crate::features::chunking::{JobQueue, RemainderBuffer};
use crate::features::fingerprint::ports::SourceParser;
use crate::pipeline::protocol::{Dispatch, LogLevel, WorkerMessage};
use crate::shared::models::{CodeChunk, CodegraphError, FingerprintRecord, Job, Result};

struct WorkerSlot {
    dispatch: Sender<Dispatch>,
    thread: Option<JoinHandle<()>>,
}

pub struct WorkerPool {
    worker_count: usize,
    parser: Arc<dyn SourceParser>,
    batch_size: usize,
    progress_interval: usize,

    queue: JobQueue<CodeChunk>,
    in_flight: HashMap<String, usize>,
    remainders: RemainderBuffer,
    results: Vec<FingerprintRecord>,
    processed: usize,
    state: PoolState,

    workers: Vec<WorkerSlot>,
    idle: Vec<usize>,
    exited: usize,

    control_tx: Option<Sender<Control>>,
    control_rx: Receiver<Control>,
    input_tx: Sender<()>,
    input_rx: Receiver<()>,
    events_tx: Option<Sender<WorkerEvent>>,
    events_rx: Receiver<WorkerEvent>,
}

impl WorkerPool {
    pub fn new(
        worker_count: usize,
        parser: Arc<dyn SourceParser>,
        config: &FingerprintConfig,
    ) -> Self {
        let (control_tx, control_rx) = unbounded();
        let (input_tx, input_rx) = bounded(1);
        let (events_tx, events_rx) = unbounded();
        Self {
            worker_count: worker_count.max(1),
            parser,
            batch_size: config.batch_size,
            progress_interval: config.progress_interval.max(1),
            queue: JobQueue::new(),
            in_flight: HashMap::new(),
            remainders: RemainderBuffer::new(),
            results: Vec::new(),
            processed: 0,
            state: PoolState::Running,
            workers: Vec::new(),
            idle: Vec::new(),
            exited: 0,
            control_tx: Some(control_tx),
            control_rx,
            input_tx,
            input_rx,
            events_tx: Some(events_tx),
            events_rx,
        }
    }

    /// Queue one chunk; returns its job id
    pub fn add_job(&mut self, chunk: CodeChunk) -> u64 {
        self.queue.enqueue(chunk)
    }

    pub fn handle(&self) -> PoolHandle {
        let control = match &self.control_tx {
            Some(tx) => tx.clone(),
            None => unbounded().0,
        };
        PoolHandle {
            control,
            input_requested: self.input_rx.clone(),
        }
    }

    /// No more input will arrive
    pub fn close(&mut self) {
        if self.state == PoolState::Running {
            self.state = PoolState::Draining;
        }
    }

    pub fn state(&self) -> PoolState {
        self.state
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Spawn the workers and hand each one job (or none)
    pub fn start(&mut self) -> Result<()> {
        let Some(events_tx) = self.events_tx.take() else {
            return Ok(());
        };

        for worker in 0..self.worker_count {
            let (dispatch_tx, dispatch_rx) = bounded(1);
            let thread = spawn_worker(
                worker,
                Arc::clone(&self.parser),
                self.batch_size,
                dispatch_rx,
                events_tx.clone(),
            )?;
            self.workers.push(WorkerSlot {
                dispatch: dispatch_tx,
                thread: Some(thread),
            });
        }
        drop(events_tx);

        info!(
            workers = self.worker_count,
            jobs = self.queue.len(),
            language = %self.parser.language(),
            "Worker pool started"
        );

        for worker in 0..self.worker_count {
            self.dispatch_next(worker)?;
        }
        Ok(())
    }

    /// Run until every worker has exited and return all records.
    ///
    /// Any worker crash or channel failure aborts with `Err`; no partial
    /// result is returned in that case.
    pub fn process(mut self) -> Result<Vec<FingerprintRecord>> {
        self.start()?;
        // from here on only external handles keep the control channel open
        self.control_tx = None;

        let events = self.events_rx.clone();
        let mut control = self.control_rx.clone();

        while self.state != PoolState::Done {
            let mut handles_gone = false;
            select! {
                recv(events) -> event => {
                    let event = event.map_err(|_| {
                        CodegraphError::pool("workers disconnected before the pool finished")
                    })?;
                    self.on_event(event)?;
                }
                recv(control) -> request => match request {
                    Ok(Control::Submit(chunk)) => self.submit(chunk)?,
                    Ok(Control::Close) => self.close_input()?,
                    Err(_) => handles_gone = true,
                },
            }
            if handles_gone {
                control = never();
                self.close_input()?;
            }
        }

        self.join_workers()?;
        info!(
            processed = self.processed,
            records = self.results.len(),
            "Worker pool finished"
        );
        Ok(self.results)
    }

    fn on_event(&mut self, event: WorkerEvent) -> Result<()> {
        let (worker, message) = match event {
            WorkerEvent::Crashed { worker, message } => {
                error!(worker, %message, "Worker crashed, aborting pool");
                return Err(CodegraphError::WorkerCrashed { worker, message });
            }
            WorkerEvent::Message { worker, message } => (worker, message),
        };

        match message {
            WorkerMessage::Log { level, line } => {
                relay(worker, level, &line);
                Ok(())
            }
            WorkerMessage::Remainder(chunk) => self.on_remainder(chunk),
            WorkerMessage::Result { file_name, records } => {
                self.on_result(worker, file_name, records)
            }
            WorkerMessage::Idle => self.on_idle(worker),
        }
    }

    fn on_remainder(&mut self, chunk: CodeChunk) -> Result<()> {
        debug!(
            file = %chunk.file_name,
            chunk = chunk.chunk_id,
            bytes = chunk.text.len(),
            "Buffered remainder"
        );
        for merged in self.remainders.insert(chunk)? {
            debug!(file = %merged.file_name, bytes = merged.text.len(), "Re-queued merged remainders");
            self.queue.enqueue(merged);
        }
        self.wake_idle()
    }

    fn on_result(
        &mut self,
        worker: usize,
        file_name: String,
        records: Vec<FingerprintRecord>,
    ) -> Result<()> {
        debug!(worker, file = %file_name, functions = records.len(), "Result received");
        self.results.extend(records);
        self.processed += 1;
        if self.processed % self.progress_interval == 0 {
            info!(
                processed = self.processed,
                queued = self.queue.len(),
                "Parsing progress"
            );
        }

        if let Some(count) = self.in_flight.get_mut(&file_name) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&file_name);
            }
        }

        self.dispatch_next(worker)
    }

    fn on_idle(&mut self, worker: usize) -> Result<()> {
        self.idle.push(worker);
        if self.queue.is_empty() && self.state.accepts_input() {
            signal(&self.input_tx);
        }
        self.wake_idle()?;
        self.settle()
    }

    fn submit(&mut self, chunk: CodeChunk) -> Result<()> {
        if !self.state.accepts_input() {
            warn!(file = %chunk.file_name, "Pool is draining, dropping submitted chunk");
            return Ok(());
        }
        self.queue.enqueue(chunk);
        self.wake_idle()
    }

    fn close_input(&mut self) -> Result<()> {
        if self.state == PoolState::Running {
            debug!("Pool input closed, draining");
            self.state = PoolState::Draining;
        }
        self.settle()
    }

    /// With nothing queued or in flight, flush leftover remainders; once
    /// those are gone too and input is closed, close every idle worker
    fn settle(&mut self) -> Result<()> {
        if !self.queue.is_empty() || !self.in_flight.is_empty() {
            return Ok(());
        }
        if !self.remainders.is_empty() {
            for leftover in self.remainders.drain_leftovers() {
                debug!(file = %leftover.file_name, chunk = leftover.chunk_id, "Flushing isolated remainder");
                self.queue.enqueue(leftover);
            }
            return self.wake_idle();
        }
        if self.state == PoolState::Draining {
            self.close_idle()?;
        }
        Ok(())
    }

    fn close_idle(&mut self) -> Result<()> {
        for worker in std::mem::take(&mut self.idle) {
            self.send(worker, Dispatch::Close)?;
            self.exited += 1;
        }
        if self.exited == self.workers.len() {
            self.state = PoolState::Done;
        }
        Ok(())
    }

    /// Hand queued jobs to parked workers
    fn wake_idle(&mut self) -> Result<()> {
        while !self.queue.is_empty() {
            let Some(worker) = self.idle.pop() else {
                break;
            };
            self.dispatch_next(worker)?;
        }
        Ok(())
    }

    fn dispatch_next(&mut self, worker: usize) -> Result<()> {
        match self.queue.dequeue() {
            Some(job) => self.send_job(worker, job),
            None => self.send(worker, Dispatch::NoJob),
        }
    }

    fn send_job(&mut self, worker: usize, job: Job<CodeChunk>) -> Result<()> {
        *self
            .in_flight
            .entry(job.payload.file_name.clone())
            .or_insert(0) += 1;
        self.send(worker, Dispatch::Job(job))
    }

    fn send(&self, worker: usize, dispatch: Dispatch) -> Result<()> {
        self.workers[worker]
            .dispatch
            .send(dispatch)
            .map_err(|_| CodegraphError::pool(format!("worker {} hung up", worker)))
    }

    fn join_workers(&mut self) -> Result<()> {
        for (worker, slot) in self.workers.iter_mut().enumerate() {
            if let Some(thread) = slot.thread.take() {
                thread.join().map_err(|_| CodegraphError::WorkerCrashed {
                    worker,
                    message: "worker thread panicked outside a job".to_string(),
                })?;
            }
        }
        Ok(())
    }
}

fn relay(worker: usize, level: LogLevel, line: &str) {
    match level {
        LogLevel::Debug => debug!(worker, "{}", line),
        LogLevel::Info => info!(worker, "{}", line),
        LogLevel::Warn => warn!(worker, "{}", line),
        LogLevel::Error => error!(worker, "{}", line),
    }
}
