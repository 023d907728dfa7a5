//! Full HTTP-to-JSON pipeline through the public entry points.

use weblock::{verify_and_extract, HttpData, JsonLockfile};

fn response_message() -> Vec<u8> {
    let body = [
        "{",
        "   \"data\": {",
        "       \"items\": [",
        "           {",
        "               \"data\": \"Artist\",",
        "               \"profile\": {",
        "                    \"name\": \"Taylor Swift\"",
        "                }",
        "           }",
        "       ]",
        "   }",
        "}",
    ]
    .join("\r\n");

    let mut message = String::from("HTTP/1.1 200 OK\r\n");
    message.push_str("content-type: application/json; charset=utf-8\r\n");
    message.push_str("content-encoding: gzip\r\n");
    message.push_str("\r\n");
    message.push_str(&body);
    message.into_bytes()
}

fn response_lock(status: &str, encoding: &str) -> HttpData {
    serde_json::from_str(&format!(
        r#"{{
            "version": "HTTP/1.1",
            "status": "{status}",
            "message": "OK",
            "headerName1": "content-type",
            "headerValue1": "application/json; charset=utf-8",
            "headerName2": "content-encoding",
            "headerValue2": "{encoding}"
        }}"#
    ))
    .expect("lockfile schema")
}

fn json_lock() -> JsonLockfile {
    serde_json::from_str(
        r#"{ "keys": ["data", "items", 0, "profile", "name"], "value_type": "string" }"#,
    )
    .expect("lockfile schema")
}

#[test]
fn locks_the_response_and_extracts_the_body_value() {
    let message = response_message();
    let out = verify_and_extract(&response_lock("200", "gzip"), &json_lock(), &message)
        .expect("pipeline");
    assert_eq!(out.value(), b"Taylor Swift");
}

#[test]
fn wrong_status_fails_the_start_line_lock() {
    let message = response_message();
    assert!(verify_and_extract(&response_lock("404", "gzip"), &json_lock(), &message).is_err());
}

#[test]
fn wrong_header_value_fails_the_header_lock() {
    let message = response_message();
    assert!(verify_and_extract(&response_lock("200", "chunked"), &json_lock(), &message).is_err());
}

#[test]
fn request_lock_verifies_a_request() {
    let message = b"GET /api HTTP/1.1\r\nHost: localhost\r\n\r\n{\"key\": 7}".to_vec();
    let http: HttpData = serde_json::from_str(
        r#"{
            "method": "GET",
            "target": "/api",
            "version": "HTTP/1.1",
            "headerName1": "Host",
            "headerValue1": "localhost"
        }"#,
    )
    .expect("lockfile schema");
    let json: JsonLockfile =
        serde_json::from_str(r#"{ "keys": ["key"], "value_type": "number" }"#).expect("schema");
    let out = verify_and_extract(&http, &json, &message).expect("pipeline");
    assert_eq!(out.decode_number().expect("digits"), 7);
}

#[test]
fn message_without_a_body_is_rejected() {
    let message = b"HTTP/1.1 200 OK\r\n".to_vec();
    assert!(verify_and_extract(&response_lock("200", "gzip"), &json_lock(), &message).is_err());
}
