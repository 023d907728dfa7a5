//! Lockfile schema
//!
//! A lockfile declares what the caller wants proven about a payload:
//! for JSON, a key path and the type of the value at its end; for HTTP,
//! the start-line components and the headers that must be present.
//! Headers arrive as flattened `headerName1`/`headerValue1` pairs, so
//! the HTTP side deserializes through a raw string map and rebuilds the
//! ordered list itself.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Expected type of the locked JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ValueType {
    /// A quoted string value
    #[serde(rename = "string")]
    String,
    /// A bare integer value
    #[serde(rename = "number")]
    Number,
}

/// One step of the locked key path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Object key
    String(String),
    /// Array index
    Num(usize),
}

/// A JSON value lock: the path to walk and the type to find there.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonLockfile {
    keys: Vec<Key>,
    value_type: ValueType,
}

impl JsonLockfile {
    /// The locked key path, outermost first.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The declared type of the value at the end of the path.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

/// An HTTP message lock, either side of the exchange.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HttpData {
    /// Request lock: method, target, version
    Request(Request),
    /// Response lock: version, status, message
    Response(Response),
}

/// Locked request start line and headers.
#[derive(Debug)]
pub struct Request {
    method: String,
    target: String,
    version: String,
    headers: Vec<(String, String)>,
}

/// Locked response status line and headers.
#[derive(Debug)]
pub struct Response {
    version: String,
    status: String,
    message: String,
    headers: Vec<(String, String)>,
}

impl HttpData {
    /// The three start-line components in wire order.
    #[must_use]
    pub fn start_line(&self) -> (&str, &str, &str) {
        match self {
            HttpData::Request(r) => (&r.method, &r.target, &r.version),
            HttpData::Response(r) => (&r.version, &r.status, &r.message),
        }
    }

    /// The locked headers in lockfile order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        match self {
            HttpData::Request(r) => &r.headers,
            HttpData::Response(r) => &r.headers,
        }
    }
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw: HashMap<String, String> = HashMap::deserialize(deserializer)?;
        Ok(Self {
            method: take(&mut raw, "method").map_err(D::Error::custom)?,
            target: take(&mut raw, "target").map_err(D::Error::custom)?,
            version: take(&mut raw, "version").map_err(D::Error::custom)?,
            headers: collect_headers(&mut raw),
        })
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw: HashMap<String, String> = HashMap::deserialize(deserializer)?;
        Ok(Self {
            version: take(&mut raw, "version").map_err(D::Error::custom)?,
            status: take(&mut raw, "status").map_err(D::Error::custom)?,
            message: take(&mut raw, "message").map_err(D::Error::custom)?,
            headers: collect_headers(&mut raw),
        })
    }
}

fn take(raw: &mut HashMap<String, String>, field: &'static str) -> Result<String, String> {
    raw.remove(field)
        .ok_or_else(|| format!("missing field `{field}`"))
}

/// Rebuild the ordered header list from `headerName{i}`/`headerValue{i}`
/// pairs. Numbering starts at 1 and stops at the first gap.
fn collect_headers(raw: &mut HashMap<String, String>) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    let mut i = 1;
    while let (Some(name), Some(value)) = (
        raw.remove(&format!("headerName{i}")),
        raw.remove(&format!("headerValue{i}")),
    ) {
        headers.push((name, value));
        i += 1;
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lockfile_mixes_keys_and_indices() {
        let lockfile: JsonLockfile = serde_json::from_str(
            r#"{ "keys": ["a", 0, "b"], "value_type": "number" }"#,
        )
        .expect("schema");
        assert_eq!(
            lockfile.keys(),
            &[
                Key::String("a".into()),
                Key::Num(0),
                Key::String("b".into())
            ]
        );
        assert_eq!(lockfile.value_type(), ValueType::Number);
    }

    #[test]
    fn request_lockfile_rebuilds_ordered_headers() {
        let data: HttpData = serde_json::from_str(
            r#"{
                "method": "GET",
                "target": "/api",
                "version": "HTTP/1.1",
                "headerName1": "Host",
                "headerValue1": "localhost",
                "headerName2": "Accept",
                "headerValue2": "*/*"
            }"#,
        )
        .expect("schema");
        assert_eq!(data.start_line(), ("GET", "/api", "HTTP/1.1"));
        assert_eq!(
            data.headers(),
            &[
                ("Host".to_string(), "localhost".to_string()),
                ("Accept".to_string(), "*/*".to_string())
            ]
        );
    }

    #[test]
    fn response_lockfile_parses_the_status_line() {
        let data: HttpData = serde_json::from_str(
            r#"{
                "version": "HTTP/1.1",
                "status": "200",
                "message": "OK",
                "headerName1": "content-type",
                "headerValue1": "application/json"
            }"#,
        )
        .expect("schema");
        assert_eq!(data.start_line(), ("HTTP/1.1", "200", "OK"));
        assert_eq!(data.headers().len(), 1);
    }
}
