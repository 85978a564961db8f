//! Conditional responses for binary assets (API and application pictures).

use axum::{
    body::Body,
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SubsecRound, Utc};

use crate::domain::InlinePicture;

pub const PICTURE_CACHE_CONTROL: &str = "max-age=86400, no-transform";

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache validators derived from an entity's last update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    etag: String,
    last_modified: DateTime<Utc>,
}

impl Validators {
    pub fn from_updated_at(updated_at: DateTime<Utc>) -> Self {
        Self { etag: format!("\"{}\"", updated_at.timestamp_millis()), last_modified: updated_at }
    }

    /// Quoted strong entity tag.
    pub fn etag(&self) -> &str {
        &self.etag
    }

    pub fn last_modified(&self) -> String {
        format_http_date(self.last_modified)
    }

    fn apply(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.etag) {
            headers.insert(ETAG, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.last_modified()) {
            headers.insert(LAST_MODIFIED, value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The client copy is current; answer 304
    NotModified,
    /// Send the full representation
    Modified,
}

/// Evaluate `If-None-Match` / `If-Modified-Since` against the validators.
///
/// `If-None-Match` takes precedence; when present `If-Modified-Since` is ignored.
pub fn evaluate_preconditions(headers: &HeaderMap, validators: &Validators) -> Precondition {
    if let Some(if_none_match) = headers.get(IF_NONE_MATCH) {
        let matched = if_none_match
            .to_str()
            .map(|value| etag_list_matches(value, &validators.etag))
            .unwrap_or(false);
        return if matched { Precondition::NotModified } else { Precondition::Modified };
    }

    let since = headers
        .get(IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date);

    match since {
        Some(since) if validators.last_modified.trunc_subsecs(0) <= since => {
            Precondition::NotModified
        }
        _ => Precondition::Modified,
    }
}

fn etag_list_matches(header: &str, etag: &str) -> bool {
    let current = weak_form(etag);
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || (!candidate.is_empty() && weak_form(candidate) == current)
    })
}

fn weak_form(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

pub fn format_http_date(instant: DateTime<Utc>) -> String {
    instant.format(HTTP_DATE_FORMAT).to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim()).ok().map(|date| date.with_timezone(&Utc))
}

/// 200 with the picture bytes, or 304 when the client copy is current.
pub fn picture_response(
    request_headers: &HeaderMap,
    picture: InlinePicture,
    updated_at: DateTime<Utc>,
) -> Response {
    let validators = Validators::from_updated_at(updated_at);
    let mut headers = HeaderMap::new();
    validators.apply(&mut headers);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(PICTURE_CACHE_CONTROL));

    if evaluate_preconditions(request_headers, &validators) == Precondition::NotModified {
        return (StatusCode::NOT_MODIFIED, headers).into_response();
    }

    let content_type = picture
        .mime_type
        .parse::<mime::Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }

    (StatusCode::OK, headers, Body::from(picture.content)).into_response()
}

/// Attach fresh validators to a response, e.g. after a picture upload.
pub fn with_validators(response: impl IntoResponse, updated_at: DateTime<Utc>) -> Response {
    let mut response = response.into_response();
    Validators::from_updated_at(updated_at).apply(response.headers_mut());
    response
}
