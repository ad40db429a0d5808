//! In-memory collaborators for driving the request pipeline on the host.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{
    requests::{PreparedRequest, RawResponse, RequestError, RequestHelper, RequestResult, Transport},
    ui::{Navigator, Notifier},
};

/// Replies from `queue` first, then with `response` for every call, and keeps
/// what was sent. With nothing left every call fails like an unreachable
/// network.
#[derive(Default)]
pub(crate) struct MockTransport {
    pub queue: RefCell<VecDeque<RawResponse>>,
    pub response: Option<RawResponse>,
    pub sent: RefCell<Vec<(String, PreparedRequest)>>,
}

impl MockTransport {
    pub fn replying(status: u16, status_text: &str, body: &str) -> Rc<Self> {
        Rc::new(Self {
            response: Some(RawResponse {
                status,
                status_text: status_text.to_owned(),
                body: body.to_owned(),
            }),
            ..Default::default()
        })
    }

    /// One `(status, body)` reply per call, in order.
    pub fn sequence(replies: &[(u16, &str)]) -> Rc<Self> {
        let queue = replies
            .iter()
            .map(|&(status, body)| RawResponse {
                status,
                status_text: String::new(),
                body: body.to_owned(),
            })
            .collect();
        Rc::new(Self {
            queue: RefCell::new(queue),
            ..Default::default()
        })
    }

    pub fn unreachable() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Transport for Rc<MockTransport> {
    async fn fetch(&self, url: &str, request: PreparedRequest) -> RequestResult<RawResponse> {
        self.sent.borrow_mut().push((url.to_owned(), request));
        let queued = self.queue.borrow_mut().pop_front();
        queued
            .or_else(|| self.response.clone())
            .ok_or_else(|| RequestError::Transport("Failed to fetch".to_owned()))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub tips: RefCell<Vec<String>>,
    pub toasts: RefCell<Vec<(String, Box<dyn FnOnce()>)>>,
}

impl Notifier for RecordingNotifier {
    fn top_tips(&self, message: &str) {
        self.tips.borrow_mut().push(message.to_owned());
    }

    fn toast(&self, message: &str, on_close: Box<dyn FnOnce()>) {
        self.toasts.borrow_mut().push((message.to_owned(), on_close));
    }
}

impl RecordingNotifier {
    /// Dismisses every pending toast.
    pub fn acknowledge_all(&self) {
        let toasts = std::mem::take(&mut *self.toasts.borrow_mut());
        for (_, on_close) in toasts {
            on_close();
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub routes: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.borrow_mut().push(route.to_owned());
    }
}

pub(crate) struct Harness {
    pub transport: Rc<MockTransport>,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub helper: RequestHelper<Rc<MockTransport>>,
}

pub(crate) fn harness(transport: Rc<MockTransport>) -> Harness {
    let notifier = Rc::new(RecordingNotifier::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let helper = RequestHelper::new(
        Rc::clone(&transport),
        notifier.clone() as Rc<dyn Notifier>,
        navigator.clone() as Rc<dyn Navigator>,
    );
    Harness {
        transport,
        notifier,
        navigator,
        helper,
    }
}
