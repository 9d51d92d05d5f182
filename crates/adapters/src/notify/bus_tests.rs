// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use netctl_core::ProjectId;
use serde_json::json;

use super::*;

#[tokio::test]
async fn subscriber_receives_published_controller_event() {
    let bus = NotificationBus::new();
    let sub = bus.subscribe();
    bus.publish(Event::controller("compute.created", json!({"id": "c1"})));
    let event = sub.recv().await.unwrap();
    assert_eq!(event.action, "compute.created");
}

#[tokio::test]
async fn project_scoped_subscriber_ignores_other_projects() {
    let bus = NotificationBus::new();
    let p1 = ProjectId::new("p1");
    let p2 = ProjectId::new("p2");
    let sub = bus.subscribe_project(p1.clone());

    bus.publish(Event::project(p2, "project.opened", json!(null)));
    bus.publish(Event::project(p1, "project.opened", json!(null)));

    let event = sub.recv().await.unwrap();
    assert_eq!(event.action, "project.opened");
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn project_scoped_subscriber_still_gets_controller_wide_events() {
    let bus = NotificationBus::new();
    let sub = bus.subscribe_project(ProjectId::new("p1"));
    bus.publish(Event::controller("compute.created", json!(null)));
    assert!(sub.recv().await.is_some());
}

#[tokio::test]
async fn overflowing_queue_drops_oldest_and_inserts_marker() {
    let bus = NotificationBus::new();
    let sub = bus.subscribe_with_capacity(None, 2);

    bus.publish(Event::controller("a", json!(null)));
    bus.publish(Event::controller("b", json!(null)));
    bus.publish(Event::controller("c", json!(null)));

    let first = sub.try_recv().unwrap();
    assert_eq!(first.action, "b");
    let second = sub.try_recv().unwrap();
    assert_eq!(second.action, "notification.dropped");
    let third = sub.try_recv().unwrap();
    assert_eq!(third.action, "c");
}

#[tokio::test]
async fn dropping_subscription_unsubscribes() {
    let bus = NotificationBus::new();
    {
        let _sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
    }
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test]
async fn publish_never_blocks_with_no_subscribers() {
    let bus = NotificationBus::new();
    bus.publish(Event::controller("noop", json!(null)));
}
