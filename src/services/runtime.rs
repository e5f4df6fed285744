// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-threaded event loop for replaying scripted UI events.
//!
//! Script events are delivered in order, each after its own delay. Events
//! the controller defers (geolocation results, the form layout restore)
//! go through a [`DeferredQueue`] and are delivered by timer tasks. The
//! loop ends once the script is exhausted and no timer is outstanding.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AppEvent, Coordinates};
use crate::services::WorkoutLog;
use crate::views::{Geolocation, Scheduler};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// One scripted event and the delay before it is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub after_ms: u64,
    pub event: AppEvent,
}

/// Parse an event script (a JSON array of steps).
pub fn load_script(json: &str) -> Result<Vec<ScriptStep>> {
    serde_json::from_str(json).map_err(|e| AppError::Script(e.to_string()))
}

/// Events waiting to be turned into timers.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    items: Rc<RefCell<VecDeque<(Duration, AppEvent)>>>,
}

impl DeferredQueue {
    pub fn push(&self, delay: Duration, event: AppEvent) {
        self.items.borrow_mut().push_back((delay, event));
    }

    pub fn drain(&self) -> Vec<(Duration, AppEvent)> {
        self.items.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

/// Scheduler that defers events through the event loop.
#[derive(Debug, Clone)]
pub struct QueuedScheduler {
    queue: DeferredQueue,
}

impl Scheduler for QueuedScheduler {
    fn schedule(&mut self, delay: Duration, event: AppEvent) {
        tracing::trace!(event = event.name(), delay_ms = delay.as_millis() as u64, "Deferred");
        self.queue.push(delay, event);
    }
}

/// Geolocation that answers from a fixed position after a latency, or
/// fails when no position is known.
#[derive(Debug, Clone)]
pub struct DeferredGeolocation {
    position: Option<Coordinates>,
    latency: Duration,
    queue: DeferredQueue,
}

impl Geolocation for DeferredGeolocation {
    fn request_position(&mut self) {
        let event = match self.position {
            Some(position) => AppEvent::GeolocationResolved { position },
            None => AppEvent::GeolocationFailed,
        };
        self.queue.push(self.latency, event);
    }
}

/// Drives a [`WorkoutLog`] from a script plus its own deferred events.
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    queue: DeferredQueue,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduler(&self) -> QueuedScheduler {
        QueuedScheduler {
            queue: self.queue.clone(),
        }
    }

    pub fn geolocation(&self, config: &Config) -> DeferredGeolocation {
        DeferredGeolocation {
            position: config.home_position,
            latency: config.geolocation_latency,
            queue: self.queue.clone(),
        }
    }

    /// Run until the script is exhausted and every deferred event has been
    /// handled. Returns the number of events handled.
    pub async fn run(&self, log: &mut WorkoutLog, script: Vec<ScriptStep>) -> usize {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let feeder = tokio::spawn(async move {
            for step in script {
                if step.after_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(step.after_ms)).await;
                }
                if tx.send(step.event).is_err() {
                    break;
                }
            }
        });

        let mut timers = JoinSet::new();
        self.spawn_deferred(&mut timers);

        let mut script_open = true;
        let mut handled = 0;

        loop {
            let event = tokio::select! {
                biased;

                Some(joined) = timers.join_next() => match joined {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::error!(error = %err, "Timer task failed");
                        continue;
                    }
                },
                received = rx.recv(), if script_open => match received {
                    Some(event) => event,
                    None => {
                        script_open = false;
                        continue;
                    }
                },
                else => break,
            };

            log.handle(event);
            handled += 1;
            self.spawn_deferred(&mut timers);
        }

        if let Err(err) = feeder.await {
            tracing::error!(error = %err, "Script feeder failed");
        }

        tracing::debug!(handled, "Event loop finished");
        handled
    }

    fn spawn_deferred(&self, timers: &mut JoinSet<AppEvent>) {
        for (delay, event) in self.queue.drain() {
            timers.spawn(async move {
                tokio::time::sleep(delay).await;
                event
            });
        }
    }
}
