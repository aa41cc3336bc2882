//! Background worker for running Monte Carlo simulations without blocking
//! the caller
//!
//! The caller sends a request, polls for responses, and may cancel at any
//! time. Progress messages are advisory; exactly one terminal message
//! (`Complete`, `Error`, or `Cancelled`) ends each run. All failure
//! crosses this boundary as an `Error` message, never as a panic or a
//! `Result` visible to the requesting side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::SimulationError;
use crate::montecarlo::{MonteCarloEngine, MonteCarloParams, MonteCarloResults};

/// Request sent to the background worker
#[derive(Debug)]
pub enum SimulationRequest {
    /// Run a Monte Carlo simulation (boxed to keep the enum small)
    MonteCarlo(Box<MonteCarloParams>),
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum SimulationResponse {
    /// Advisory progress update, 0..=100
    Progress { percent: u8 },
    /// Run completed; terminal
    Complete(Box<MonteCarloResults>),
    /// Run failed; terminal
    Error(String),
    /// Run was cancelled before completing; terminal, no partial results
    Cancelled,
}

/// Handle to a simulation thread.
///
/// Dropping the handle shuts the thread down; any run in flight is
/// abandoned through the cancel flag.
pub struct SimulationWorker {
    request_tx: Sender<SimulationRequest>,
    response_rx: Receiver<SimulationResponse>,
    cancel_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SimulationWorker {
    /// Spawn the background thread.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));

        let worker_cancel = cancel_flag.clone();
        let thread = thread::spawn(move || {
            worker_loop(request_rx, response_tx, worker_cancel);
        });

        Self {
            request_tx,
            response_rx,
            cancel_flag,
            thread: Some(thread),
        }
    }

    /// Send a request to the worker. Returns false if the thread is gone.
    pub fn send(&self, request: SimulationRequest) -> bool {
        // New work starts with a clear cancel flag
        self.cancel_flag.store(false, Ordering::SeqCst);
        self.request_tx.send(request).is_ok()
    }

    /// Non-blocking poll for the next response.
    pub fn try_recv(&self) -> Option<SimulationResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Blocking poll with a deadline, for callers without an event loop.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SimulationResponse> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    /// Abandon the run in flight. No partial results are delivered.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Ask the thread to exit after the current request.
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(SimulationRequest::Shutdown);
    }
}

impl Default for SimulationWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulationWorker {
    fn drop(&mut self) {
        self.cancel();
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop(
    requests: Receiver<SimulationRequest>,
    responses: Sender<SimulationResponse>,
    cancel_flag: Arc<AtomicBool>,
) {
    while let Ok(request) = requests.recv() {
        match request {
            SimulationRequest::Shutdown => break,
            SimulationRequest::MonteCarlo(params) => {
                debug!("worker: starting run of {} trials", params.num_simulations);
                let engine = MonteCarloEngine::new(*params);

                let progress_tx = responses.clone();
                let outcome = engine.run_observed(
                    // Fire and forget: a caller that already hung up just
                    // stops receiving notifications
                    move |percent| {
                        let _ = progress_tx.send(SimulationResponse::Progress { percent });
                    },
                    &cancel_flag,
                );

                let terminal = match outcome {
                    Ok(results) => SimulationResponse::Complete(Box::new(results)),
                    Err(SimulationError::Cancelled) => SimulationResponse::Cancelled,
                    Err(e) => SimulationResponse::Error(e.to_string()),
                };
                if responses.send(terminal).is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProductType;

    fn test_params(num_simulations: usize) -> MonteCarloParams {
        MonteCarloParams {
            monthly_contribution: 500.0,
            mean_return: 0.08,
            volatility: 0.15,
            years: 5,
            current_age: 40,
            admin_fee: 0.01,
            loading_fee: 0.0,
            product_type: ProductType::Vgbl,
            inflation: None,
            num_simulations,
            seed: Some(9),
        }
    }

    fn drain_until_terminal(worker: &SimulationWorker) -> (Vec<u8>, SimulationResponse) {
        let mut progress = Vec::new();
        loop {
            match worker.recv_timeout(Duration::from_secs(30)) {
                Some(SimulationResponse::Progress { percent }) => progress.push(percent),
                Some(terminal) => return (progress, terminal),
                None => panic!("worker produced no terminal response"),
            }
        }
    }

    #[test]
    fn test_run_completes_through_worker() {
        let worker = SimulationWorker::new();
        assert!(worker.send(SimulationRequest::MonteCarlo(Box::new(test_params(100)))));

        let (progress, terminal) = drain_until_terminal(&worker);

        assert!(progress.iter().all(|&p| p <= 100));
        match terminal {
            SimulationResponse::Complete(results) => {
                assert_eq!(results.paths.len(), 100);
                assert!(results.percentile5 <= results.percentile95);
            }
            other => panic!("expected Complete, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_params_surface_as_error_message() {
        let worker = SimulationWorker::new();
        let mut params = test_params(100);
        params.years = 0;
        worker.send(SimulationRequest::MonteCarlo(Box::new(params)));

        let (_, terminal) = drain_until_terminal(&worker);
        match terminal {
            SimulationResponse::Error(message) => {
                assert!(message.contains("at least 1 year"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_yields_cancelled() {
        let worker = SimulationWorker::new();
        // Large enough that cancellation lands mid-run
        worker.send(SimulationRequest::MonteCarlo(Box::new(test_params(200_000))));
        worker.cancel();

        let (_, terminal) = drain_until_terminal(&worker);
        assert!(matches!(terminal, SimulationResponse::Cancelled));
    }

    #[test]
    fn test_worker_handles_sequential_runs() {
        let worker = SimulationWorker::new();

        for _ in 0..2 {
            worker.send(SimulationRequest::MonteCarlo(Box::new(test_params(50))));
            let (_, terminal) = drain_until_terminal(&worker);
            assert!(matches!(terminal, SimulationResponse::Complete(_)));
        }
    }
}
