use gloo::net::http::{self, RequestBuilder};
use web_sys::RequestCredentials;

use super::{
    error::RequestResult,
    options::{Credentials, Method, PreparedRequest},
    transport::{RawResponse, Transport},
};

/// Browser `fetch` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn fetch(&self, url: &str, request: PreparedRequest) -> RequestResult<RawResponse> {
        let mut builder = RequestBuilder::new(url).method(request.method.into());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(credentials) = request.credentials {
            builder = builder.credentials(credentials.into());
        }

        let response = match request.body {
            Some(body) => builder.body(body)?.send().await?,
            None => builder.send().await?,
        };
        let status = response.status();
        let status_text = response.status_text();
        // The body of a failed response is never looked at.
        let body = if response.ok() {
            response.text().await?
        } else {
            String::new()
        };

        Ok(RawResponse {
            status,
            status_text,
            body,
        })
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
            Method::Options => http::Method::OPTIONS,
            Method::Patch => http::Method::PATCH,
        }
    }
}

impl From<Credentials> for RequestCredentials {
    fn from(credentials: Credentials) -> Self {
        match credentials {
            Credentials::Omit => RequestCredentials::Omit,
            Credentials::SameOrigin => RequestCredentials::SameOrigin,
            Credentials::Include => RequestCredentials::Include,
        }
    }
}
