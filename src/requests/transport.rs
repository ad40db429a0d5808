use super::{error::RequestResult, options::PreparedRequest};

/// What the helper needs back from the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Asynchronous HTTP client the helper sends through.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn fetch(&self, url: &str, request: PreparedRequest) -> RequestResult<RawResponse>;
}
