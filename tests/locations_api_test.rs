//! Integration tests for states, municipalities and the IBGE import.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;
use lei_em_maos::UserType;

#[tokio::test]
async fn test_states_prefer_local_table() {
    let app = TestApp::spawn().await;
    app.insert_state("SP", "São Paulo").await;
    app.insert_state("AC", "Acre").await;

    let response = app.get("/api/states").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([
            { "id": "AC", "name": "Acre" },
            { "id": "SP", "name": "São Paulo" }
        ])
    );
    assert_eq!(app.ibge.state_calls(), 0);
}

#[tokio::test]
async fn test_states_fall_back_to_ibge() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/states").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);
    assert_eq!(response.body[0]["id"], "MG");
    assert_eq!(app.ibge.state_calls(), 1);
}

#[tokio::test]
async fn test_states_fail_when_nothing_can_answer() {
    let app = TestApp::spawn().await;
    app.ibge.go_offline();

    let response = app.get("/api/states").await;

    assert!(!response.status.is_success());
    assert_eq!(response.body["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_municipalities_from_ibge() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/states/sp/municipalities").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([
            { "id": "3509502", "name": "Campinas", "stateId": "SP" },
            { "id": "3550308", "name": "São Paulo", "stateId": "SP" }
        ])
    );
    assert_eq!(app.ibge.municipality_calls(), 1);
}

#[tokio::test]
async fn test_municipalities_fall_back_to_local_table() {
    let app = TestApp::spawn().await;
    app.insert_state("SP", "São Paulo").await;
    app.insert_municipality("3548500", "Santos", "SP").await;
    app.insert_municipality("3509502", "Campinas", "SP").await;
    app.ibge.go_offline();

    let response = app.get("/api/states/SP/municipalities").await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Campinas", "Santos"]);
}

#[tokio::test]
async fn test_municipalities_reject_bad_state_code() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/states/SAO/municipalities").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.ibge.municipality_calls(), 0);
}

#[tokio::test]
async fn test_populate_imports_municipalities() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.insert_state("SP", "São Paulo").await;

    let response = app
        .request(
            Method::POST,
            "/api/populate-municipalities/sp",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Successfully populated 2 municipalities for SP", "count": 2 })
    );

    // Imported rows answer once IBGE goes away
    app.ibge.go_offline();
    let local = app.get("/api/states/SP/municipalities").await;
    assert_eq!(local.status, StatusCode::OK);
    assert_eq!(local.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_populate_twice_does_not_duplicate() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.insert_state("SP", "São Paulo").await;

    for _ in 0..2 {
        let response = app
            .request(
                Method::POST,
                "/api/populate-municipalities/SP",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    app.ibge.go_offline();
    let local = app.get("/api/states/SP/municipalities").await;
    assert_eq!(local.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_populate_unknown_state_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/populate-municipalities/AC",
            Some(&token),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.ibge.municipality_calls(), 0);
}

#[tokio::test]
async fn test_populate_requires_admin() {
    let app = TestApp::spawn().await;
    let (_, politician) = app
        .token_for("politico@sp.gov.br", UserType::Politician)
        .await;
    app.insert_state("SP", "São Paulo").await;

    let response = app
        .request(
            Method::POST,
            "/api/populate-municipalities/SP",
            Some(&politician),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.ibge.municipality_calls(), 0);
}
