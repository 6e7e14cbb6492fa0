// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    login = { "/autenticacao/login", true },
    refresh = { "/autenticacao/refresh", true },
    login_with_query = { "/autenticacao/login?x=1", true },
    prefixed = { "/api/autenticacao/refresh", true },
    pets = { "/v1/pets", false },
    tutor = { "/v1/tutores/7", false },
    autenticacao_root = { "/autenticacao", false },
)]
fn public_endpoint_matching(path: &str, expected: bool) {
    assert_eq!(is_public(path), expected);
    assert_eq!(ApiRequest::get(path).is_public(), expected);
}

#[test]
fn builder_collects_query_and_body() {
    let req = ApiRequest::get("/v1/pets").query("page", 2).query("size", 10).query("nome", "Rex");
    assert_eq!(req.method, Method::GET);
    assert_eq!(
        req.query,
        vec![
            ("page".to_owned(), "2".to_owned()),
            ("size".to_owned(), "10".to_owned()),
            ("nome".to_owned(), "Rex".to_owned()),
        ]
    );
    assert!(matches!(req.body, RequestBody::Empty));

    let req = ApiRequest::post("/v1/pets").json(serde_json::json!({ "nome": "Rex" }));
    assert_eq!(req.method, Method::POST);
    assert!(matches!(req.body, RequestBody::Json(ref v) if v["nome"] == "Rex"));
}

#[test]
fn outbound_retry_marker_starts_clear() {
    let mut outbound = Outbound::new(ApiRequest::get("/v1/pets"));
    assert!(!outbound.is_retried());
    assert_eq!(outbound.attempts(), 0);

    outbound.mark_retried();
    assert!(outbound.is_retried());
    assert_eq!(outbound.attempts(), 1);
}

#[test]
fn empty_body_decodes_as_null() -> anyhow::Result<()> {
    let resp = ApiResponse { status: 204, body: Bytes::new() };
    assert!(resp.is_empty());
    let value: Option<serde_json::Value> = resp.json()?;
    assert_eq!(value, None);
    Ok(())
}

#[test]
fn json_body_decodes() -> anyhow::Result<()> {
    let resp = ApiResponse { status: 200, body: Bytes::from_static(br#"{"id":3}"#) };
    let value: serde_json::Value = resp.json()?;
    assert_eq!(value["id"], 3);
    Ok(())
}

#[test]
fn malformed_json_is_a_decode_error() {
    let resp = ApiResponse { status: 200, body: Bytes::from_static(b"{oops") };
    let result: Result<serde_json::Value, ApiError> = resp.json();
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn file_part_builds_form() -> anyhow::Result<()> {
    let part = FilePart {
        field: "foto".into(),
        file_name: "rex.png".into(),
        content_type: Some("image/png".into()),
        bytes: Bytes::from_static(b"\x89PNG"),
    };
    let form = part.to_form()?;
    assert!(!form.boundary().is_empty());
    Ok(())
}

#[test]
fn file_part_rejects_bad_content_type() {
    let part = FilePart {
        field: "foto".into(),
        file_name: "rex.png".into(),
        content_type: Some("not a mime".into()),
        bytes: Bytes::new(),
    };
    assert!(part.to_form().is_err());
}
