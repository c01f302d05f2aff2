//! Off-thread decoding of user uploads.
//!
//! The render path never decodes: uploads are handed to the rayon pool and the decoded image (or
//! the failure) comes back as an [`UploadEvent`] that the session applies between draws.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::Context as _;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::StickerId;

/// Which slot of the session a decoded upload lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    Background,
    Frame,
    Sticker(StickerId),
}

/// Outcome of one upload.
#[derive(Debug)]
pub struct UploadEvent {
    pub target: UploadTarget,
    /// Submission number, increasing across every target of one uploader.
    pub seq: u64,
    pub result: BoothResult<PreparedImage>,
}

/// Decodes uploads on the rayon global pool and hands results back over a channel.
pub struct Uploader {
    tx: Sender<UploadEvent>,
    rx: Receiver<UploadEvent>,
    in_flight: usize,
    next_seq: u64,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

impl Uploader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            in_flight: 0,
            next_seq: 0,
        }
    }

    /// Queue already-read encoded bytes for decoding. Returns the submission number.
    pub fn submit_bytes(&mut self, target: UploadTarget, bytes: Vec<u8>) -> u64 {
        self.spawn(target, move || decode_image(&bytes))
    }

    /// Queue a file; reading happens on the worker as well.
    pub fn submit_path(&mut self, target: UploadTarget, path: impl Into<PathBuf>) -> u64 {
        let path = path.into();
        self.spawn(target, move || {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read upload '{}'", path.display()))
                .map_err(BoothError::from)?;
            decode_image(&bytes)
        })
    }

    fn spawn<F>(&mut self, target: UploadTarget, job: F) -> u64
    where
        F: FnOnce() -> BoothResult<PreparedImage> + Send + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(?target, seq, "queue upload decode");
        let tx = self.tx.clone();
        self.in_flight += 1;
        rayon::spawn(move || {
            let result = job();
            // The receiver only disappears with the uploader itself; nobody is left to notify.
            let _ = tx.send(UploadEvent {
                target,
                seq,
                result,
            });
        });
        seq
    }

    /// Number of submitted uploads whose result has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collect every finished upload without blocking.
    pub fn drain_ready(&mut self) -> Vec<UploadEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            out.push(ev);
        }
        out
    }

    /// Block until every submitted upload has finished.
    pub fn wait_all(&mut self) -> Vec<UploadEvent> {
        let mut out = Vec::with_capacity(self.in_flight);
        while self.in_flight > 0 {
            match self.rx.recv() {
                Ok(ev) => {
                    self.in_flight -= 1;
                    out.push(ev);
                }
                Err(_) => break,
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/upload.rs"]
mod tests;
