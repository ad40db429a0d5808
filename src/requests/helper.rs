use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    ui::{Navigator, Notifier, WeuiNotifier, WindowNavigator},
};

use super::{
    envelope::Envelope,
    error::{Completion, RequestError},
    fetch::FetchTransport,
    options::{ErrorCallback, FetchOptions, RequestOptions, SuccessCallback},
    transport::Transport,
};

const UNAUTHORIZED: u16 = 401;

/// Sends requests and turns each response into exactly one outcome:
/// the success callback, the error callback, or nothing when the session
/// expired and the user is being sent back to the login page.
pub struct RequestHelper<T> {
    transport: T,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    config: Config,
}

impl RequestHelper<FetchTransport> {
    pub fn browser() -> Self {
        Self::new(FetchTransport, Rc::new(WeuiNotifier), Rc::new(WindowNavigator))
    }
}

impl<T: Transport + 'static> RequestHelper<T> {
    pub fn new(transport: T, notifier: Rc<dyn Notifier>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            transport,
            notifier,
            navigator,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fire and forget: the pipeline runs on the event loop and reports
    /// through the callbacks in `options`.
    pub fn request<D>(self: &Rc<Self>, url: impl Into<String>, options: RequestOptions<D>)
    where
        D: DeserializeOwned + 'static,
    {
        let helper = Rc::clone(self);
        let url = url.into();
        wasm_bindgen_futures::spawn_local(async move {
            helper.dispatch(&url, options).await;
        });
    }

    /// Runs one request to completion and invokes the matching callback.
    pub async fn dispatch<D: DeserializeOwned>(&self, url: &str, options: RequestOptions<D>) {
        let RequestOptions {
            success,
            error,
            fetch,
        } = options;
        let completion = self.complete(url, fetch).await;
        self.finish(completion, success, error);
    }

    /// Sends the request and classifies the response without running callbacks.
    pub async fn complete<D: DeserializeOwned>(&self, url: &str, fetch: FetchOptions) -> Completion<D> {
        let prepared = match fetch.prepare() {
            Ok(prepared) => prepared,
            Err(err) => return err.into(),
        };
        log::debug!("{} {}", prepared.method, url);

        let response = match self.transport.fetch(url, prepared).await {
            Ok(response) => response,
            Err(err) => return err.into(),
        };

        if !response.ok() {
            if response.status == UNAUTHORIZED {
                log::error!("session expired");
                self.prompt_login();
                return Completion::Handled;
            }
            return RequestError::Status {
                status: response.status,
                status_text: response.status_text,
            }
            .into();
        }

        match Envelope::parse(&response.body).and_then(Envelope::into_data) {
            Ok(data) => Completion::Success(data),
            Err(err) => err.into(),
        }
    }

    fn prompt_login(&self) {
        let navigator = Rc::clone(&self.navigator);
        let route = self.config.login_route.clone();
        self.notifier.toast(
            &self.config.session_expired_message,
            Box::new(move || navigator.navigate(&route)),
        );
    }

    fn finish<D>(
        &self,
        completion: Completion<D>,
        success: Option<SuccessCallback<D>>,
        error: Option<ErrorCallback>,
    ) {
        match completion {
            Completion::Success(data) => {
                if let Some(success) = success {
                    success(data);
                }
            }
            Completion::Failure(err) => self.fail(err, error),
            Completion::Handled => {}
        }
    }

    /// Hands `err` to the caller's error callback, or shows it as a top tip.
    pub fn fail(&self, err: RequestError, error: Option<ErrorCallback>) {
        match error {
            Some(error) => error(err),
            None => self.notifier.top_tips(&err.to_string()),
        }
    }
}

/// Sends one request with the browser transport, `weui` notifications and
/// `window.location` navigation.
pub fn request<D>(url: impl Into<String>, options: RequestOptions<D>)
where
    D: DeserializeOwned + 'static,
{
    Rc::new(RequestHelper::browser()).request(url, options);
}
