// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use netctl_core::{Compute, ComputeId};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn compute_for(server: &MockServer) -> Compute {
    let url = server.uri();
    let without_scheme = url.trim_start_matches("http://");
    let (host, port) = without_scheme.split_once(':').unwrap();
    Compute::new(ComputeId::new("c1"), "test", host, port.parse().unwrap())
}

#[tokio::test]
async fn connect_succeeds_when_compute_responds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "3.0"})))
        .mount(&server)
        .await;

    let transport = HttpComputeTransport::new();
    let (tx, _rx) = mpsc::channel(8);
    transport.connect(&compute_for(&server), tx).await.unwrap();
}

#[tokio::test]
async fn request_surfaces_auth_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/ports"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transport = HttpComputeTransport::new();
    let result = transport
        .request(&compute_for(&server), Method::Get, "/network/ports", None)
        .await;
    assert!(matches!(result, Err(ComputeError::Auth)));
}

#[tokio::test]
async fn request_surfaces_http_errors_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let transport = HttpComputeTransport::new();
    let result = transport.request(&compute_for(&server), Method::Get, "/broken", None).await;
    match result {
        Err(ComputeError::Http { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn request_returns_json_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/network/ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"udp": [10000, 10001]})))
        .mount(&server)
        .await;

    let transport = HttpComputeTransport::new();
    let value = transport
        .request(&compute_for(&server), Method::Get, "/network/ports", None)
        .await
        .unwrap();
    assert_eq!(value["udp"][0], 10000);
}
