//! Background generation worker.
//!
//! The UI loop never awaits the model. It sends a [`GenerationJob`] and keeps
//! drawing; the worker answers with a [`GenerationDone`] carrying the same id.

use nanotale_core::{generate_story, GenerateOutcome, StoryForm, StoryGenerator};
use tokio::sync::mpsc;
use tracing::debug;

/// A submission sent from the UI to the worker.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub id: u64,
    pub form: StoryForm,
}

/// The worker's answer to one job.
#[derive(Debug, Clone)]
pub struct GenerationDone {
    pub id: u64,
    pub outcome: GenerateOutcome,
}

/// Spawn the worker task and return its channel endpoints.
pub fn spawn_worker(
    generator: StoryGenerator,
) -> (mpsc::Sender<GenerationJob>, mpsc::Receiver<GenerationDone>) {
    let (job_tx, job_rx) = mpsc::channel(8);
    let (done_tx, done_rx) = mpsc::channel(8);

    tokio::spawn(worker_loop(generator, job_rx, done_tx));

    (job_tx, done_rx)
}

async fn worker_loop(
    generator: StoryGenerator,
    mut job_rx: mpsc::Receiver<GenerationJob>,
    done_tx: mpsc::Sender<GenerationDone>,
) {
    while let Some(job) = job_rx.recv().await {
        debug!(id = job.id, "generation job received");
        let outcome = generate_story(&generator, job.form).await;
        if done_tx
            .send(GenerationDone {
                id: job.id,
                outcome,
            })
            .await
            .is_err()
        {
            break;
        }
    }
    debug!("generation worker stopped");
}
