use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::{BoothError, CaptureError, Result};

/// Commands the booth understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Capture,
    /// Save the last result; `None` uses the configured output directory
    Download { dir: Option<PathBuf> },
    Restart,
    Stop,
    SetLayout(String),
    SetFilter(String),
    SetFrameColor(String),
    SetLegacyFrame(String),
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Path of the saved file, if there was anything to save
    Saved(Option<PathBuf>),
}

/// Guard that lets only one capture sequence run at a time
#[derive(Debug, Clone, Default)]
pub struct CaptureGate {
    in_flight: Arc<AtomicBool>,
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a capture is already running
    pub fn try_acquire(&self) -> Option<CapturePass> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CapturePass { in_flight: self.in_flight.clone() })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding the capture gate; releases it on drop
#[derive(Debug)]
pub struct CapturePass {
    in_flight: Arc<AtomicBool>,
}

impl Drop for CapturePass {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

pub(crate) struct Envelope {
    pub(crate) command: Command,
    pub(crate) pass: Option<CapturePass>,
    pub(crate) reply: oneshot::Sender<Result<Outcome>>,
}

/// Sends commands to a booth running on its own task
#[derive(Clone)]
pub struct BoothHandle {
    tx: mpsc::Sender<Envelope>,
    gate: CaptureGate,
}

impl BoothHandle {
    pub(crate) fn new(tx: mpsc::Sender<Envelope>, gate: CaptureGate) -> Self {
        Self { tx, gate }
    }

    /// Send a command and wait for its outcome
    ///
    /// A capture sent while another is in flight is refused straight away
    /// with [`CaptureError::Busy`] instead of being queued.
    pub async fn dispatch(&self, command: Command) -> Result<Outcome> {
        let pass = match command {
            Command::Capture => Some(self.gate.try_acquire().ok_or(CaptureError::Busy)?),
            _ => None,
        };

        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { command, pass, reply })
            .await
            .map_err(|_| BoothError::generic("booth controller has shut down"))?;

        response
            .await
            .map_err(|_| BoothError::generic("booth controller dropped the command"))?
    }

    pub fn is_capturing(&self) -> bool {
        self.gate.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_admits_one_pass() {
        let gate = CaptureGate::new();
        let pass = gate.try_acquire().unwrap();

        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());
        assert!(gate.clone().try_acquire().is_none());

        drop(pass);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_fails() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = BoothHandle::new(tx, CaptureGate::new());

        assert!(handle.dispatch(Command::Restart).await.is_err());
        // The pass taken for the capture is released with the failed send
        assert!(handle.dispatch(Command::Capture).await.is_err());
        assert!(!handle.is_capturing());
    }
}
