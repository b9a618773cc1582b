use crate::flow::{Flow, FlowRequest, FlowResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use harlog_core::har::{Cache, Content, Cookie, Entry, Header, QueryParam, Request, Response, Timings};
use url::Url;

/// Map one completed flow plus its computed timings to a HAR entry.
/// Absent optional data (no Content-Type, no Location, unparsable URL)
/// falls back to empty values; nothing here fails.
pub fn build_entry(flow: &Flow, timings: Timings) -> Entry {
    Entry {
        started_date_time: iso8601(flow.request.timestamp_start),
        time: timings.total(),
        request: build_request(&flow.request),
        response: build_response(&flow.response),
        cache: Cache {},
        timings,
        page_ref: None,
    }
}

fn build_request(request: &FlowRequest) -> Request {
    Request {
        method: request.method.clone(),
        url: request.url.clone(),
        http_version: request.http_version_string(),
        cookies: request_cookies(request),
        headers: har_headers(&request.headers),
        query_string: query_params(&request.url),
        headers_size: headers_size(&request.headers),
        body_size: request.body_size as i64,
    }
}

fn build_response(response: &FlowResponse) -> Response {
    let raw_size = response.body_size as i64;
    let decoded_size = response.decoded_body_size.unwrap_or(response.body_size) as i64;

    Response {
        status: response.status as i64,
        status_text: response.reason.clone(),
        http_version: response.http_version_string(),
        cookies: response_cookies(response),
        headers: har_headers(&response.headers),
        content: Content {
            size: raw_size,
            compression: decoded_size - raw_size,
            mime_type: response.header("content-type").unwrap_or_default().to_string(),
        },
        redirect_url: response.header("location").unwrap_or_default().to_string(),
        headers_size: headers_size(&response.headers),
        body_size: raw_size,
    }
}

/// Epoch seconds to an ISO-8601 UTC timestamp with millisecond precision.
/// Out-of-range timestamps fall back to the epoch.
fn iso8601(timestamp: f64) -> String {
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract() * 1e9) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn har_headers(headers: &[(String, String)]) -> Vec<Header> {
    headers
        .iter()
        .map(|(name, value)| Header {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Byte length of the headers as a serialized "name: value\r\n" block.
fn headers_size(headers: &[(String, String)]) -> i64 {
    headers
        .iter()
        .map(|(name, value)| name.len() + value.len() + 4)
        .sum::<usize>() as i64
}

fn query_params(url: &str) -> Vec<QueryParam> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };
    parsed
        .query_pairs()
        .map(|(name, value)| QueryParam {
            name: name.into_owned(),
            value: value.into_owned(),
        })
        .collect()
}

/// Cookies sent by the client, parsed out of the Cookie header.
fn request_cookies(request: &FlowRequest) -> Vec<Cookie> {
    let Some(cookie_header) = request.header("cookie") else {
        return Vec::new();
    };
    cookie_header
        .split(';')
        .filter_map(parse_cookie_pair)
        .collect()
}

/// Cookies set by the server: the name=value part of each Set-Cookie
/// header, attributes dropped.
fn response_cookies(response: &FlowResponse) -> Vec<Cookie> {
    response
        .headers_named("set-cookie")
        .filter_map(|header| parse_cookie_pair(header.split(';').next().unwrap_or(header)))
        .collect()
}

fn parse_cookie_pair(pair: &str) -> Option<Cookie> {
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Cookie {
        name: name.to_string(),
        value: value.trim().to_string(),
    })
}
