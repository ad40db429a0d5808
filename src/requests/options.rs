use std::fmt;

use serde_json::Value;

use super::error::{RequestError, RequestResult};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub type SuccessCallback<D> = Box<dyn FnOnce(D)>;
pub type ErrorCallback = Box<dyn FnOnce(RequestError)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    SameOrigin,
    Include,
}

/// Request payload. `Json` is serialized on send, `Text` goes out as is.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Json(Value),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_owned())
    }
}

/// Everything forwarded to the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
    pub credentials: Option<Credentials>,
}

/// Transport options after body normalization, ready to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub credentials: Option<Credentials>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl FetchOptions {
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    pub fn prepare(self) -> RequestResult<PreparedRequest> {
        let needs_content_type = !self.has_header(CONTENT_TYPE);
        let mut headers = self.headers;
        let body = match self.body {
            None => None,
            Some(Body::Text(text)) => Some(text),
            Some(Body::Json(value)) => {
                if needs_content_type {
                    headers.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
                }
                Some(serde_json::to_string(&value).map_err(RequestError::Encode)?)
            }
        };

        Ok(PreparedRequest {
            method: self.method,
            headers,
            body,
            credentials: self.credentials,
        })
    }
}

/// Callbacks plus transport options for one call.
pub struct RequestOptions<D = Value> {
    pub success: Option<SuccessCallback<D>>,
    pub error: Option<ErrorCallback>,
    pub fetch: FetchOptions,
}

impl<D> Default for RequestOptions<D> {
    fn default() -> Self {
        Self {
            success: None,
            error: None,
            fetch: FetchOptions::default(),
        }
    }
}

impl<D> RequestOptions<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, callback: impl FnOnce(D) + 'static) -> Self {
        self.success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(RequestError) + 'static) -> Self {
        self.error = Some(Box::new(callback));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.fetch.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fetch.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.fetch.body = Some(body.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.fetch.credentials = Some(credentials);
        self
    }
}
