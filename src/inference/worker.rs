//! Background execution of inference calls.
//!
//! The UI loop polls at a fixed cadence and must never block on the
//! network, so generation requests run on a spawned thread and report back
//! over a channel. Failures never cross the channel: the worker maps them
//! to the advisory string the chat would show anyway.

use super::client::{advisory, InferenceClient};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Tracks one in-flight generation request.
#[derive(Debug, Default)]
pub struct InferenceWorker {
    receiver: Option<Receiver<String>>,
}

impl InferenceWorker {
    /// Creates an idle worker.
    #[must_use]
    pub fn new() -> Self {
        Self { receiver: None }
    }

    /// Whether a request is still in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.receiver.is_some()
    }

    /// Spawns a generation request. Ignored while one is already running.
    pub fn start(&mut self, client: InferenceClient, input: String) {
        if self.is_busy() {
            return;
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        thread::spawn(move || {
            let reply = match client.generate(&input) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(error = %err, "generation failed");
                    advisory(&err).to_string()
                }
            };
            // Receiver may be gone if the chat was closed mid-request
            let _ = sender.send(reply);
        });
    }

    /// Polls for a finished reply. Returns the reply text at most once per
    /// request; `None` while idle or still waiting.
    pub fn poll(&mut self) -> Option<String> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(reply) => {
                self.receiver = None;
                Some(reply)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker thread died without sending
                self.receiver = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_new_worker_is_idle() {
        let mut worker = InferenceWorker::new();
        assert!(!worker.is_busy());
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_poll_drains_reply_once() {
        let (sender, receiver) = channel();
        let mut worker = InferenceWorker {
            receiver: Some(receiver),
        };
        assert!(worker.is_busy());

        sender.send("hello".to_string()).unwrap();
        assert_eq!(worker.poll(), Some("hello".to_string()));
        assert!(!worker.is_busy());
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_disconnected_channel_clears_worker() {
        let (sender, receiver) = channel::<String>();
        let mut worker = InferenceWorker {
            receiver: Some(receiver),
        };
        drop(sender);

        assert!(worker.poll().is_none());
        assert!(!worker.is_busy());
    }
}
