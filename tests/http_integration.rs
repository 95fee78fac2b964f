// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP client and server.

use std::net::SocketAddr;
use std::time::Duration;

use boiler_lib::engine::{LoopState, RegulationConfig};
use boiler_lib::error::{Error, ParseError, ProtocolError};
use boiler_lib::protocol::{BoilerClient, HttpConfig, router};
use boiler_lib::types::{BoilerState, ErrorCode, Temperature};
use boiler_lib::ControlService;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn t(celsius: f64) -> Temperature {
    Temperature::new(celsius).unwrap()
}

// ============================================================================
// BoilerClient against a mock server
// ============================================================================

mod client {
    use super::*;

    async fn client_for(server: &MockServer) -> BoilerClient {
        BoilerClient::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn reads_actual_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thermostat/actual"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"actual_temperature": 21.5})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.get_actual_temperature().await.unwrap(), t(21.5));
    }

    #[tokio::test]
    async fn posts_desired_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/thermostat/desired"))
            .and(body_json(json!({"desired_temperature": 23.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Desired temperature set successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let message = client.set_desired_temperature(23.0).await.unwrap();
        assert_eq!(message, "Desired temperature set successfully");
    }

    #[tokio::test]
    async fn rejected_value_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/thermostat/desired"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "Invalid temperature value"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .set_desired_temperature_value(json!("abc"))
            .await
            .unwrap_err();

        match err {
            Error::Protocol(ProtocolError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid temperature value");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_uses_reason_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boiler/state"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_boiler_state().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::Status { status: 503, ref message })
                if message == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn missing_field_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thermostat/desired"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"temperature": 22.0})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_desired_temperature().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::MissingField(ref field)) if field == "desired_temperature"
        ));
    }

    #[tokio::test]
    async fn reads_boiler_and_error_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boiler/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "heating"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/boiler/error"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": 1,
                "error_message": "Low pressure"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.get_boiler_state().await.unwrap(), BoilerState::Heating);

        let error = client.get_error_state().await.unwrap();
        assert_eq!(error.code(), ErrorCode::LowPressure);
        assert_eq!(error.error_message, "Low pressure");
    }
}

// ============================================================================
// BoilerClient against the real router
// ============================================================================

mod end_to_end {
    use super::*;

    async fn serve(config: RegulationConfig) -> (ControlService, SocketAddr) {
        let service = ControlService::new(config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(service.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (service, addr)
    }

    fn client(addr: SocketAddr) -> BoilerClient {
        HttpConfig::new(addr.ip().to_string())
            .with_port(addr.port())
            .with_timeout(Duration::from_secs(5))
            .into_client()
            .unwrap()
    }

    #[tokio::test]
    async fn serves_defaults() {
        let (_service, addr) = serve(RegulationConfig::default()).await;
        let client = client(addr);

        assert_eq!(client.get_actual_temperature().await.unwrap(), t(21.5));
        assert_eq!(client.get_desired_temperature().await.unwrap(), t(22.0));
        assert_eq!(client.get_boiler_state().await.unwrap(), BoilerState::Heating);

        let error = client.get_error_state().await.unwrap();
        assert_eq!(error.error_code, 0);
        assert_eq!(error.error_message, "No error");
    }

    #[tokio::test]
    async fn set_and_converge() {
        let config = RegulationConfig::default().with_tick_period(Duration::from_millis(5));
        let (service, addr) = serve(config).await;
        let client = client(addr);

        let message = client.set_desired_temperature(22.3).await.unwrap();
        assert_eq!(message, "Desired temperature set successfully");
        assert_eq!(client.get_desired_temperature().await.unwrap(), t(22.3));
        assert_eq!(service.engine().loop_state(), LoopState::Running);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while client.get_actual_temperature().await.unwrap() != t(22.3) {
            assert!(tokio::time::Instant::now() < deadline, "no convergence");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(
            client.get_boiler_state().await.unwrap(),
            BoilerState::NotHeating
        );

        service.engine().shutdown().await;
    }

    #[tokio::test]
    async fn numeric_string_is_accepted() {
        let (service, addr) = serve(RegulationConfig::default()).await;
        let client = client(addr);

        client
            .set_desired_temperature_value(json!("19.5"))
            .await
            .unwrap();
        assert_eq!(client.get_desired_temperature().await.unwrap(), t(19.5));

        service.engine().shutdown().await;
    }

    #[tokio::test]
    async fn invalid_values_are_rejected_with_400() {
        let (service, addr) = serve(RegulationConfig::default()).await;
        let client = client(addr);

        for value in [json!("abc"), json!("NaN"), json!(null), json!(true)] {
            let err = client
                .set_desired_temperature_value(value.clone())
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Protocol(ProtocolError::Status { status: 400, ref message })
                        if message == "Invalid temperature value"
                ),
                "{value}: {err:?}"
            );
        }

        assert_eq!(client.get_desired_temperature().await.unwrap(), t(22.0));
        assert_eq!(service.engine().loop_state(), LoopState::Idle);
    }

    #[tokio::test]
    async fn missing_field_is_rejected_with_400() {
        let (_service, addr) = serve(RegulationConfig::default()).await;
        let http = reqwest::Client::new();
        let url = format!("http://{addr}/thermostat/desired");

        let empty_object = http.post(&url).json(&json!({})).send().await.unwrap();
        let no_body = http.post(&url).send().await.unwrap();
        let not_json = http
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        for response in [empty_object, no_body, not_json] {
            assert_eq!(response.status(), 400);
            let body: serde_json::Value = response.json().await.unwrap();
            assert_eq!(body, json!({"error": "Missing desired_temperature"}));
        }
    }

    #[tokio::test]
    async fn out_of_range_number_is_invalid_not_missing() {
        let (service, addr) = serve(RegulationConfig::default()).await;
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/thermostat/desired"))
            .header("content-type", "application/json")
            .body(r#"{"desired_temperature": 1e400}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Invalid temperature value"}));
        assert_eq!(service.engine().loop_state(), LoopState::Idle);
    }

    #[tokio::test]
    async fn reports_injected_fault() {
        let (service, addr) = serve(RegulationConfig::default()).await;
        service.engine().set_error_code(ErrorCode::IgnitionFailure);

        let error = client(addr).get_error_state().await.unwrap();
        assert_eq!(error.error_code, 3);
        assert_eq!(error.error_message, "Ignition failure");
    }

    #[tokio::test]
    async fn health_probe() {
        let (_service, addr) = serve(RegulationConfig::default()).await;
        let body = reqwest::get(format!("http://{addr}/healthz"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }
}
