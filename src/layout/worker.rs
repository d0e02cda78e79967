use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::{LayoutConfig, LayoutResult, SchematicLayoutEngine, Viewport};
#[allow(unused_imports)]
use crate::logging::debug_log;
use crate::models::Diagram;

/// A finished layout tagged with the submission it answers
#[derive(Debug, Clone)]
pub struct LayoutResponse {
    pub generation: u64,
    pub result: LayoutResult,
}

/// Handle on the thread running one submission
///
/// Dropping the job raises its cancel flag, so replacing or clearing the
/// current job stops the in-flight simulation at its next iteration.
struct LayoutJob {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for LayoutJob {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Runs layouts on a background thread, one submission at a time
///
/// Every submission gets a new generation number; results from older
/// generations are discarded when polled.
pub struct LayoutWorker {
    config: LayoutConfig,
    job: Option<LayoutJob>,
    generation: u64,
    sender: Sender<LayoutResponse>,
    receiver: Receiver<LayoutResponse>,
}

impl LayoutWorker {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            config,
            job: None,
            generation: 0,
            sender,
            receiver,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the current submission is still running
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.job
            .as_ref()
            .and_then(|job| job.handle.as_ref())
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start laying out `diagram`, cancelling any submission still in flight
    ///
    /// Returns the generation number of the new submission.
    pub fn submit(&mut self, diagram: Diagram, viewport: Viewport) -> u64 {
        // Terminate any existing job (cancels in-flight simulation)
        self.job = None;
        self.generation += 1;

        let generation = self.generation;
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let sender = self.sender.clone();
        let config = self.config.clone();

        debug_log!("Submitting layout generation {generation}: {} nodes", diagram.nodes.len());

        let handle = thread::spawn(move || {
            let mut engine = SchematicLayoutEngine::from_diagram(diagram, config);
            let result = engine.layout_with_cancel(viewport, Some(&flag));
            if !result.complete {
                debug_log!("Layout generation {generation} cancelled");
                return;
            }
            // The worker may have been dropped meanwhile
            let _ = sender.send(LayoutResponse { generation, result });
        });

        self.job = Some(LayoutJob {
            cancel,
            handle: Some(handle),
        });
        generation
    }

    /// Cancel the submission in flight, if any
    ///
    /// The generation advances as well, so a result the cancelled run already
    /// sent is treated as stale.
    pub fn cancel(&mut self) {
        self.job = None;
        self.generation += 1;
    }

    /// Most recent result for the current generation, without blocking
    pub fn try_latest(&mut self) -> Option<LayoutResult> {
        let mut latest = None;
        while let Ok(response) = self.receiver.try_recv() {
            if response.generation == self.generation {
                latest = Some(response.result);
            } else {
                debug_log!("Discarding stale layout generation {}", response.generation);
            }
        }
        latest
    }

    /// Block until the current submission finishes and return its result
    ///
    /// Returns `None` if nothing is in flight or the run did not complete.
    pub fn wait(&mut self) -> Option<LayoutResult> {
        let mut job = self.job.take()?;
        if let Some(handle) = job.handle.take() {
            if handle.join().is_err() {
                log::warn!("Layout thread for generation {} panicked", self.generation);
            }
        }
        self.try_latest()
    }
}

impl Default for LayoutWorker {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
