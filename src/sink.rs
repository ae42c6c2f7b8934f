//! Producer link: a background sample generator and the channels feeding it
//! into the UI thread.
//!
//! The producer runs on its own thread and shares no memory with the UI.
//! Commands go in over one channel ([`ProducerCommand`]), chunks come out over
//! another ([`ProducerEvent`]). Both directions are fire-and-forget; the UI
//! side polls for chunks once per frame with [`StreamLink::drain_into`].
//!
//! The chunk channel is bounded to [`CHUNK_QUEUE_DEPTH`]. While the UI is not
//! draining (window minimized, frames stalled) new chunks are dropped instead
//! of queued, so pending memory stays bounded.

use std::sync::mpsc::{
    Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError, TrySendError,
};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::buffer::SampleBuffer;
use crate::data::sample::Sample;
use crate::error::{Result, StreamChartError};

/// Emission interval used until a `Start` command says otherwise.
pub const DEFAULT_RATE: Duration = Duration::from_millis(100);
/// Samples per chunk used until a `Start` command says otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 100;
/// Shortest accepted emission interval; shorter rates are raised to it.
pub const MIN_RATE: Duration = Duration::from_millis(1);
/// Maximum number of undelivered chunks held in the channel.
pub const CHUNK_QUEUE_DEPTH: usize = 64;

/// Messages sent from the UI to the producer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerCommand {
    /// Begin emitting `chunk_size` samples every `rate` (at least [`MIN_RATE`]).
    /// The first chunk goes out immediately.
    Start { rate: Duration, chunk_size: usize },
    /// Change the emission interval without restarting. The next chunk is due one new interval from now.
    SetRate { rate: Duration },
    /// Stop emitting. Chunks already sent may still arrive.
    Stop,
}

/// Messages sent from the producer thread to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ProducerEvent {
    /// Newly generated samples, in timestamp order.
    Chunk(Vec<Sample>),
}

/// Source of synthetic samples driven by the producer thread.
pub trait SampleGenerator: Send + 'static {
    /// Generate the next `chunk_size` samples. `now_ms` is the current wall-clock time.
    fn next_chunk(&mut self, chunk_size: usize, now_ms: i64) -> Vec<Sample>;
}

/// Noisy sine wave: `50 + sin(id / 100) * 25 + uniform(-5, 5)`.
///
/// Ids continue from `next_id`; timestamps are strictly increasing across
/// chunks even when chunks are larger than the emission interval.
pub struct SineNoiseGenerator {
    next_id: u64,
    last_timestamp: Option<i64>,
    rng: StdRng,
}

impl Default for SineNoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SineNoiseGenerator {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            last_timestamp: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            next_id: 0,
            last_timestamp: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Continue after an existing dataset: next id and last emitted timestamp.
    pub fn continuing_after(mut self, next_id: u64, last_timestamp: Option<i64>) -> Self {
        self.next_id = next_id;
        self.last_timestamp = last_timestamp;
        self
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn value_for(&mut self, id: u64) -> f64 {
        let noise: f64 = self.rng.random::<f64>() - 0.5;
        50.0 + (id as f64 / 100.0).sin() * 25.0 + noise * 10.0
    }
}

impl SampleGenerator for SineNoiseGenerator {
    fn next_chunk(&mut self, chunk_size: usize, now_ms: i64) -> Vec<Sample> {
        let start = match self.last_timestamp {
            Some(last) => now_ms.max(last + 1),
            None => now_ms,
        };
        let mut chunk = Vec::with_capacity(chunk_size);
        for i in 0..chunk_size {
            let id = self.next_id + i as u64;
            let value = self.value_for(id);
            chunk.push(Sample::with_id(start + i as i64, value, id));
        }
        self.next_id += chunk_size as u64;
        if let Some(last) = chunk.last() {
            self.last_timestamp = Some(last.timestamp);
        }
        chunk
    }
}

/// Build the dataset shown at mount: `count` samples `step_ms` apart, the
/// last one `step_ms` before `now_ms`, ids `0..count`.
pub fn generate_initial_dataset(
    count: usize,
    step_ms: i64,
    now_ms: i64,
    generator: &mut SineNoiseGenerator,
) -> Vec<Sample> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let id = generator.next_id + i as u64;
        let timestamp = now_ms - (count - i) as i64 * step_ms;
        let value = generator.value_for(id);
        out.push(Sample::with_id(timestamp, value, id));
    }
    generator.next_id += count as u64;
    generator.last_timestamp = out.last().map(|s| s.timestamp);
    out
}

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

struct ProducerState {
    running: bool,
    rate: Duration,
    chunk_size: usize,
    next_tick: Instant,
    dropped: u64,
}

/// Producer thread body: wait for commands, emit on every tick while running.
fn producer_loop<G: SampleGenerator>(
    mut generator: G,
    commands: Receiver<ProducerCommand>,
    events: SyncSender<ProducerEvent>,
) {
    let mut state = ProducerState {
        running: false,
        rate: DEFAULT_RATE,
        chunk_size: DEFAULT_CHUNK_SIZE,
        next_tick: Instant::now(),
        dropped: 0,
    };

    loop {
        let received = if state.running {
            let timeout = state.next_tick.saturating_duration_since(Instant::now());
            match commands.recv_timeout(timeout) {
                Ok(cmd) => Some(cmd),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match commands.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            }
        };

        match received {
            Some(ProducerCommand::Start { rate, chunk_size }) => {
                state.rate = rate.max(MIN_RATE);
                state.chunk_size = chunk_size;
                if !state.running {
                    tracing::debug!(?rate, chunk_size, "producer started");
                    state.running = true;
                    state.next_tick = Instant::now();
                }
            }
            Some(ProducerCommand::SetRate { rate }) => {
                tracing::debug!(?rate, "producer rate changed");
                state.rate = rate.max(MIN_RATE);
                if state.running {
                    state.next_tick = Instant::now() + state.rate;
                }
            }
            Some(ProducerCommand::Stop) => {
                tracing::debug!("producer stopped");
                state.running = false;
            }
            None => {}
        }

        if state.running && Instant::now() >= state.next_tick {
            let chunk = generator.next_chunk(state.chunk_size, now_millis());
            tracing::trace!(len = chunk.len(), "emitting chunk");
            match events.try_send(ProducerEvent::Chunk(chunk)) {
                Ok(()) => {
                    if state.dropped > 0 {
                        tracing::warn!(
                            dropped = state.dropped,
                            "chunk queue was full, chunks dropped"
                        );
                        state.dropped = 0;
                    }
                }
                Err(TrySendError::Full(_)) => state.dropped += 1,
                Err(TrySendError::Disconnected(_)) => {
                    tracing::debug!("chunk receiver dropped, producer exiting");
                    break;
                }
            }
            state.next_tick = Instant::now() + state.rate;
        }
    }
}

/// UI-side handle to a running producer thread.
///
/// Dropping the link sends `Stop`, closes the command channel (which ends the
/// thread) and joins it.
pub struct StreamLink {
    commands: Option<Sender<ProducerCommand>>,
    events: Receiver<ProducerEvent>,
    thread: Option<JoinHandle<()>>,
}

impl StreamLink {
    /// Spawn a producer thread around `generator`. It stays idle until [`start`](Self::start).
    pub fn spawn<G: SampleGenerator>(generator: G) -> Result<Self> {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::sync_channel(CHUNK_QUEUE_DEPTH);
        let thread = std::thread::Builder::new()
            .name("sample-producer".to_string())
            .spawn(move || producer_loop(generator, cmd_rx, evt_tx))
            .map_err(StreamChartError::ProducerSpawn)?;
        Ok(Self {
            commands: Some(cmd_tx),
            events: evt_rx,
            thread: Some(thread),
        })
    }

    pub fn send(&self, cmd: ProducerCommand) -> Result<()> {
        let tx = self
            .commands
            .as_ref()
            .ok_or(StreamChartError::ProducerDisconnected)?;
        tx.send(cmd)
            .map_err(|_| StreamChartError::ProducerDisconnected)
    }

    pub fn start(&self, rate: Duration, chunk_size: usize) -> Result<()> {
        self.send(ProducerCommand::Start { rate, chunk_size })
    }

    pub fn set_rate(&self, rate: Duration) -> Result<()> {
        self.send(ProducerCommand::SetRate { rate })
    }

    pub fn stop(&self) -> Result<()> {
        self.send(ProducerCommand::Stop)
    }

    /// Next pending event without blocking.
    pub fn try_recv(&self) -> Option<ProducerEvent> {
        match self.events.try_recv() {
            Ok(evt) => Some(evt),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ProducerEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Merge every pending chunk into `buffer`, in send order.
    ///
    /// Returns the number of samples merged.
    pub fn drain_into(&self, buffer: &mut SampleBuffer) -> usize {
        let mut merged = 0;
        while let Some(ProducerEvent::Chunk(chunk)) = self.try_recv() {
            merged += chunk.len();
            buffer.append(chunk);
        }
        merged
    }

    /// Stop the producer and wait for its thread to exit.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.commands.take() {
            let _ = tx.send(ProducerCommand::Stop);
        }
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::warn!("producer thread panicked");
            }
        }
    }
}

impl Drop for StreamLink {
    fn drop(&mut self) {
        self.shutdown();
    }
}
