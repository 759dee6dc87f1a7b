//! Background cut worker.
//!
//! The cut runs on its own thread; the shell only drains events, so it stays
//! free to redraw progress while FFmpeg is busy.

use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use trimcut_core::TrimCutError;
use trimcut_media::{run_cut, CutCancel, CutJob, CutProgress, CutReport, MediaService};

/// Messages from the worker thread.
#[derive(Debug)]
pub enum WorkerEvent {
    Progress(CutProgress),
    Finished(CutReport),
    Failed(TrimCutError),
}

pub struct CutWorker {
    events: Receiver<WorkerEvent>,
    cancel: CutCancel,
    handle: Option<JoinHandle<()>>,
}

impl CutWorker {
    /// Start `job` on a new thread. Exactly one `Finished` or `Failed` event
    /// is sent, after which the channel closes.
    pub fn spawn<S>(service: S, job: CutJob) -> io::Result<Self>
    where
        S: MediaService + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cancel = CutCancel::new();
        let worker_cancel = cancel.clone();
        let handle = thread::Builder::new()
            .name("trimcut-worker".into())
            .spawn(move || work(&service, &job, &worker_cancel, &tx))?;

        Ok(Self {
            events: rx,
            cancel,
            handle: Some(handle),
        })
    }

    pub fn events(&self) -> &Receiver<WorkerEvent> {
        &self.events
    }

    /// Ask the worker to stop before its next step. It still sends a final
    /// `Failed(Cancelled)` event unless the job had already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the thread to exit.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Cut worker panicked");
            }
        }
    }
}

fn work(service: &dyn MediaService, job: &CutJob, cancel: &CutCancel, tx: &Sender<WorkerEvent>) {
    let result = run_cut(
        service,
        job,
        |progress| {
            // The receiver only goes away when the shell has quit.
            let _ = tx.send(WorkerEvent::Progress(progress));
        },
        cancel,
    );
    let event = match result {
        Ok(report) => WorkerEvent::Finished(report),
        Err(err) => WorkerEvent::Failed(err),
    };
    let _ = tx.send(event);
}
