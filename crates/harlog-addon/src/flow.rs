use serde::{Deserialize, Serialize};

/// One completed exchange as handed over by the host proxy: a request, its
/// response, and the server connection that carried them. All timestamps are
/// raw epoch seconds as recorded by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub request: FlowRequest,
    pub response: FlowResponse,
    pub server_conn: ServerConn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRequest {
    pub method: String,
    pub url: String,
    pub http_version: (u8, u8),
    /// Order- and case-preserving; duplicate names allowed.
    pub headers: Vec<(String, String)>,
    pub body_size: u64,
    pub timestamp_start: f64,
    pub timestamp_end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResponse {
    pub status: u16,
    pub reason: String,
    pub http_version: (u8, u8),
    pub headers: Vec<(String, String)>,
    pub body_size: u64,
    /// Body size after the host decoded any content-encoding; defaults to
    /// the raw size when the host did not decode.
    pub decoded_body_size: Option<u64>,
    pub timestamp_start: f64,
    pub timestamp_end: f64,
}

/// The server side of the connection that carried this flow. Identified by
/// an opaque host-assigned id so reuse across flows can be detected. The
/// setup timestamps are absent when the host did not observe that phase
/// (no ssl timestamp on a plaintext connection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConn {
    pub id: u64,
    pub timestamp_start: Option<f64>,
    pub timestamp_tcp_setup: Option<f64>,
    pub timestamp_ssl_setup: Option<f64>,
}

impl FlowRequest {
    /// First header with the given name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// All headers with the given name, in order.
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        find_headers(&self.headers, name)
    }

    /// HTTP version as the HAR-style "major.minor" string.
    pub fn http_version_string(&self) -> String {
        version_string(self.http_version)
    }
}

impl FlowResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        find_headers(&self.headers, name)
    }

    pub fn http_version_string(&self) -> String {
        version_string(self.http_version)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn find_headers<'a>(
    headers: &'a [(String, String)],
    name: &'a str,
) -> impl Iterator<Item = &'a str> {
    headers
        .iter()
        .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn version_string(version: (u8, u8)) -> String {
    format!("{}.{}", version.0, version.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_headers(headers: Vec<(&str, &str)>) -> FlowRequest {
        FlowRequest {
            method: "GET".to_string(),
            url: "https://example.com/".to_string(),
            http_version: (1, 1),
            headers: headers
                .into_iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            body_size: 0,
            timestamp_start: 0.0,
            timestamp_end: 0.0,
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive_first_match() {
        let req = request_with_headers(vec![
            ("Referer", "https://a.example/"),
            ("referer", "https://b.example/"),
        ]);
        assert_eq!(req.header("REFERER"), Some("https://a.example/"));
        assert_eq!(req.header("missing"), None);
    }

    #[test]
    fn headers_named_preserves_order_and_duplicates() {
        let req = request_with_headers(vec![
            ("Set-Cookie", "a=1"),
            ("Content-Type", "text/html"),
            ("set-cookie", "b=2"),
        ]);
        let values: Vec<&str> = req.headers_named("set-cookie").collect();
        assert_eq!(values, vec!["a=1", "b=2"]);
    }

    #[test]
    fn version_string_joins_major_minor() {
        let req = request_with_headers(vec![]);
        assert_eq!(req.http_version_string(), "1.1");
    }
}
