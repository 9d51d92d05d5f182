// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller-wide publish/subscribe notification bus.
//!
//! Each subscriber owns a bounded queue; publishing never blocks. A full
//! queue drops its oldest entry and inserts a `notification.dropped` marker
//! in its place so consumers can detect the gap without the bus itself
//! having to track what was lost.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use netctl_core::{Event, ProjectId, Scope};
use parking_lot::Mutex;
use tokio::sync::Notify;

const DEFAULT_QUEUE_CAPACITY: usize = 1024;

struct Subscriber {
    id: u64,
    project_filter: Option<ProjectId>,
    queue: Mutex<VecDeque<Event>>,
    capacity: usize,
    notify: Arc<Notify>,
}

impl Subscriber {
    fn wants(&self, event: &Event) -> bool {
        match (&self.project_filter, &event.scope) {
            (None, _) => true,
            (Some(_), Scope::Controller) => true,
            (Some(wanted), Scope::Project(id)) => wanted == id,
        }
    }

    fn push(&self, event: Event) {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            queue.pop_front();
            queue.push_back(Event::dropped_marker(event.scope.clone()));
        }
        queue.push_back(event);
        drop(queue);
        self.notify.notify_one();
    }
}

/// A subscription handle. Drop it to unsubscribe.
pub struct Subscription {
    bus: NotificationBus,
    id: u64,
    subscriber: Arc<Subscriber>,
}

impl Subscription {
    /// Waits for and returns the next event, or `None` once the bus has shut
    /// down and the queue has drained.
    pub async fn recv(&self) -> Option<Event> {
        loop {
            if let Some(event) = self.subscriber.queue.lock().pop_front() {
                return Some(event);
            }
            self.subscriber.notify.notified().await;
        }
    }

    /// Drains whatever is queued right now without waiting.
    pub fn try_recv(&self) -> Option<Event> {
        self.subscriber.queue.lock().pop_front()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

/// Cloneable handle to the bus. Construction takes no reference to the
/// controller facade itself; the bus is handed to the facade, not the other
/// way around.
#[derive(Clone, Default)]
pub struct NotificationBus {
    subscribers: Arc<Mutex<Vec<Arc<Subscriber>>>>,
    next_id: Arc<AtomicU64>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every controller-wide event.
    pub fn subscribe(&self) -> Subscription {
        self.subscribe_with_capacity(None, DEFAULT_QUEUE_CAPACITY)
    }

    /// Subscribes to events scoped to a single project, plus controller-wide events.
    pub fn subscribe_project(&self, project_id: ProjectId) -> Subscription {
        self.subscribe_with_capacity(Some(project_id), DEFAULT_QUEUE_CAPACITY)
    }

    pub fn subscribe_with_capacity(&self, project_filter: Option<ProjectId>, capacity: usize) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let subscriber = Arc::new(Subscriber {
            id,
            project_filter,
            queue: Mutex::new(VecDeque::new()),
            capacity,
            notify: Arc::new(Notify::new()),
        });
        self.subscribers.lock().push(subscriber.clone());
        Subscription { bus: self.clone(), id, subscriber }
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.lock().retain(|s| s.id != id);
    }

    /// Publishes an event to every interested subscriber. Never blocks.
    pub fn publish(&self, event: Event) {
        let subscribers = self.subscribers.lock();
        for subscriber in subscribers.iter().filter(|s| s.wants(&event)) {
            subscriber.push(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
