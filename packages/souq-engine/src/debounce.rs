//! Debounced live search. Every scheduled request replaces and aborts the
//! previous timer task; only the last one standing runs the pipeline after
//! the quiescence window and delivers its response.

use std::sync::{Arc, Mutex};

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::sleep};

use crate::{Engine, lock_unpoisoned, search::{SearchRequest, SearchResponse}};

pub struct SearchDebouncer {
	engine: Arc<Engine>,
	delay: std::time::Duration,
	pending: Mutex<Option<JoinHandle<()>>>,
}
impl SearchDebouncer {
	pub fn new(engine: Arc<Engine>) -> Self {
		let delay = std::time::Duration::from_millis(engine.cfg.search.debounce_ms);

		Self { engine, delay, pending: Mutex::new(None) }
	}

	/// Schedules `request` to run after the quiescence window, superseding any
	/// not-yet-fired schedule. An aborted timer has no side effects; a failed
	/// pipeline run is traced and delivers nothing.
	pub fn schedule(&self, request: SearchRequest, out: UnboundedSender<Arc<SearchResponse>>) {
		let engine = self.engine.clone();
		let delay = self.delay;
		let task = tokio::spawn(async move {
			sleep(delay).await;

			match engine.search(&request) {
				Ok(response) =>
					if out.send(response).is_err() {
						tracing::debug!("Debounced search receiver dropped.");
					},
				Err(err) => {
					tracing::warn!(error = %err, "Debounced search failed.");
				},
			}
		});
		let mut pending = lock_unpoisoned(&self.pending);

		if let Some(previous) = pending.replace(task) {
			previous.abort();
		}
	}

	/// Drops the pending schedule, if any, without running it.
	pub fn cancel(&self) {
		if let Some(task) = lock_unpoisoned(&self.pending).take() {
			task.abort();
		}
	}
}
