//! Typed calls against the server's JSON API.
//!
//! Every call goes through [`RequestHelper`], so an expired session sends the
//! user back to the login page and never reaches the caller's error callback.

use std::{fmt, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    requests::{
        Body, Completion, FetchTransport, Method, RequestError, RequestHelper, RequestOptions,
        RequestResult, Transport,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QrLogin {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LoginStatus {
    #[serde(rename = "loggedin")]
    pub logged_in: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Communities {
    pub names: Vec<String>,
    /// Index into `names`, negative when none is selected.
    pub current: i64,
}

impl Communities {
    pub fn current_name(&self) -> Option<&str> {
        usize::try_from(self.current)
            .ok()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunitySelector {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeKind {
    Notices,
    Moments,
    CcpPosts,
    Proposals,
}

impl LikeKind {
    pub const ALL: [LikeKind; 4] = [
        LikeKind::Notices,
        LikeKind::Moments,
        LikeKind::CcpPosts,
        LikeKind::Proposals,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            LikeKind::Notices => "notices",
            LikeKind::Moments => "moments",
            LikeKind::CcpPosts => "ccpposts",
            LikeKind::Proposals => "proposals",
        }
    }
}

impl fmt::Display for LikeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LikeKind::Notices => "Notices",
            LikeKind::Moments => "Moments",
            LikeKind::CcpPosts => "Party posts",
            LikeKind::Proposals => "Proposals",
        })
    }
}

pub struct Api<T> {
    helper: Rc<RequestHelper<T>>,
    base: String,
}

impl<T> Clone for Api<T> {
    fn clone(&self) -> Self {
        Self {
            helper: Rc::clone(&self.helper),
            base: self.base.clone(),
        }
    }
}

impl Api<FetchTransport> {
    pub fn browser(config: &Config) -> Self {
        Self::new(Rc::new(RequestHelper::browser().with_config(config.clone())))
    }
}

impl<T: Transport + 'static> Api<T> {
    pub fn new(helper: Rc<RequestHelper<T>>) -> Self {
        let base = helper.config().api_base.clone();
        Self { helper, base }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    fn send<D>(&self, call: Call<D>)
    where
        D: DeserializeOwned + 'static,
    {
        self.helper.request(call.url, call.options);
    }

    /// Starts a QR login; the payload carries the QR image url.
    pub fn start_qr_login(&self, options: RequestOptions<QrLogin>) {
        self.send(self.start_qr_login_call(options));
    }

    pub fn is_logged_in(&self, options: RequestOptions<LoginStatus>) {
        self.send(self.is_logged_in_call(options));
    }

    pub fn communities(&self, options: RequestOptions<Communities>) {
        self.send(self.communities_call(options));
    }

    pub fn set_current_community(&self, selector: CommunitySelector, options: RequestOptions<()>) {
        self.send(self.set_current_community_call(&selector, options));
    }

    /// Likes up to `count` posts of `kind`; the payload is how many were liked.
    pub fn like(&self, kind: LikeKind, count: u32, options: RequestOptions<LikeCount>) {
        if count == 0 {
            let err = RequestError::InvalidArgument(format!("invalid count {}", count));
            self.helper.fail(err, options.error);
            return;
        }
        self.send(self.like_call(kind, count, options));
    }

    /// Shows `err` the way an unhandled request failure is shown.
    pub fn report(&self, err: RequestError) {
        self.helper.fail(err, None);
    }

    /// Switches to each community in turn and likes up to `count` posts of
    /// `kind` there. A failure in one community does not stop the others; an
    /// expired session stops the run.
    pub async fn like_in_communities(
        &self,
        names: &[String],
        kind: LikeKind,
        count: u32,
    ) -> Completion<Vec<CommunityLikes>> {
        if count == 0 {
            return RequestError::InvalidArgument(format!("invalid count {}", count)).into();
        }

        let mut liked = Vec::with_capacity(names.len());
        for name in names {
            let selector = CommunitySelector::Name(name.clone());
            let select = self.set_current_community_call(&selector, RequestOptions::new());
            let result = match self.helper.complete::<()>(&select.url, select.options.fetch).await {
                Completion::Success(()) => {
                    let like = self.like_call(kind, count, RequestOptions::new());
                    match self.helper.complete::<LikeCount>(&like.url, like.options.fetch).await {
                        Completion::Success(count) => Ok(count),
                        Completion::Failure(err) => Err(err),
                        Completion::Handled => return Completion::Handled,
                    }
                }
                Completion::Failure(err) => Err(err),
                Completion::Handled => return Completion::Handled,
            };
            liked.push(CommunityLikes {
                community: name.clone(),
                result,
            });
        }
        Completion::Success(liked)
    }

    fn start_qr_login_call(&self, options: RequestOptions<QrLogin>) -> Call<QrLogin> {
        Call {
            url: self.url("startqrlogin"),
            options: options.method(Method::Post),
        }
    }

    fn is_logged_in_call(&self, options: RequestOptions<LoginStatus>) -> Call<LoginStatus> {
        Call {
            url: self.url("isloggedin"),
            options: options.method(Method::Get),
        }
    }

    fn communities_call(&self, options: RequestOptions<Communities>) -> Call<Communities> {
        Call {
            url: self.url("getcommunities"),
            options: options.method(Method::Get),
        }
    }

    fn set_current_community_call(
        &self,
        selector: &CommunitySelector,
        options: RequestOptions<()>,
    ) -> Call<()> {
        Call {
            url: self.url("setcurrentcommunity"),
            options: options.method(Method::Post).body(set_current_body(selector)),
        }
    }

    fn like_call(
        &self,
        kind: LikeKind,
        count: u32,
        options: RequestOptions<LikeCount>,
    ) -> Call<LikeCount> {
        Call {
            url: self.url(&format!("like{}", kind.path_segment())),
            options: options.method(Method::Post).body(json!({ "count": count })),
        }
    }
}

#[derive(Debug)]
pub struct CommunityLikes {
    pub community: String,
    pub result: RequestResult<LikeCount>,
}

/// One endpoint invocation, ready for the helper.
struct Call<D> {
    url: String,
    options: RequestOptions<D>,
}

fn set_current_body(selector: &CommunitySelector) -> Body {
    match selector {
        CommunitySelector::Index(index) => json!({ "current": index }),
        CommunitySelector::Name(name) => json!({ "name": name }),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;
    use crate::{
        requests::PreparedRequest,
        testing::{harness, MockTransport},
    };

    type Shared<D> = Rc<RefCell<Vec<D>>>;

    fn collect<D: 'static>() -> (Shared<D>, RequestOptions<D>) {
        let seen: Shared<D> = Rc::default();
        let sink = Rc::clone(&seen);
        let options = RequestOptions::new()
            .on_success(move |data| sink.borrow_mut().push(data))
            .on_error(|err| panic!("unexpected failure: {}", err));
        (seen, options)
    }

    /// Runs `call` against a transport answering `body`, returns what was sent.
    fn exchange<D, F>(body: &str, call: F) -> (String, PreparedRequest)
    where
        D: DeserializeOwned + 'static,
        F: FnOnce(&Api<Rc<MockTransport>>) -> Call<D>,
    {
        let h = harness(MockTransport::replying(200, "OK", body));
        let helper = Rc::new(h.helper);
        let api = Api::new(Rc::clone(&helper));

        let call = call(&api);
        block_on(helper.dispatch(&call.url, call.options));

        let mut sent = h.transport.sent.borrow_mut();
        assert_eq!(sent.len(), 1);
        sent.remove(0)
    }

    #[test]
    fn communities_expose_current_name() {
        let communities = Communities {
            names: vec!["East".to_owned(), "West".to_owned()],
            current: 1,
        };
        assert_eq!(communities.current_name(), Some("West"));

        let none = Communities {
            current: -1,
            ..communities
        };
        assert_eq!(none.current_name(), None);
    }

    #[test]
    fn start_qr_login_posts() {
        let (seen, options) = collect::<QrLogin>();
        let (url, request) = exchange(r#"{"success":true,"data":{"url":"/qr/1.png"}}"#, |api| {
            api.start_qr_login_call(options)
        });

        assert_eq!(url, "/api/startqrlogin");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, None);
        assert_eq!(
            *seen.borrow(),
            vec![QrLogin {
                url: "/qr/1.png".to_owned()
            }]
        );
    }

    #[test]
    fn is_logged_in_reads_server_field() {
        let (seen, options) = collect::<LoginStatus>();
        let (url, request) = exchange(r#"{"success":true,"data":{"loggedin":true}}"#, |api| {
            api.is_logged_in_call(options)
        });

        assert_eq!(url, "/api/isloggedin");
        assert_eq!(request.method, Method::Get);
        assert_eq!(*seen.borrow(), vec![LoginStatus { logged_in: true }]);
    }

    #[test]
    fn communities_decode() {
        let (seen, options) = collect::<Communities>();
        let (url, _) = exchange(
            r#"{"success":true,"data":{"names":["East","West"],"current":0}}"#,
            |api| api.communities_call(options),
        );

        assert_eq!(url, "/api/getcommunities");
        assert_eq!(seen.borrow()[0].current_name(), Some("East"));
    }

    #[test]
    fn set_current_community_by_index_and_name() {
        let (seen, options) = collect::<()>();
        let (url, request) = exchange(r#"{"success":true}"#, |api| {
            api.set_current_community_call(&CommunitySelector::Index(2), options)
        });
        assert_eq!(url, "/api/setcurrentcommunity");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"current":2}"#));
        assert_eq!(seen.borrow().len(), 1);

        let (_, options) = collect::<()>();
        let (_, request) = exchange(r#"{"success":true}"#, |api| {
            api.set_current_community_call(&CommunitySelector::Name("East".to_owned()), options)
        });
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"East"}"#));
    }

    #[test]
    fn like_posts_count_to_kind_route() {
        let (seen, options) = collect::<LikeCount>();
        let (url, request) = exchange(r#"{"success":true,"data":{"count":3}}"#, |api| {
            api.like_call(LikeKind::CcpPosts, 5, options)
        });

        assert_eq!(url, "/api/likeccpposts");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"count":5}"#));
        assert_eq!(*seen.borrow(), vec![LikeCount { count: 3 }]);
    }

    #[test]
    fn api_base_comes_from_config() {
        let h = harness(MockTransport::unreachable());
        let config = Config {
            api_base: "/v2".to_owned(),
            ..Config::default()
        };
        let api = Api::new(Rc::new(h.helper.with_config(config)));
        assert_eq!(api.url("isloggedin"), "/v2/isloggedin");
    }

    #[test]
    fn likes_each_community_in_turn() {
        let transport = MockTransport::sequence(&[
            (200, r#"{"success":true}"#),
            (200, r#"{"success":true,"data":{"count":2}}"#),
            (200, r#"{"success":false,"err":"gone"}"#),
        ]);
        let h = harness(transport);
        let api = Api::new(Rc::new(h.helper));
        let names = vec!["East".to_owned(), "West".to_owned()];

        let liked = match block_on(api.like_in_communities(&names, LikeKind::Notices, 4)) {
            Completion::Success(liked) => liked,
            other => panic!("unexpected completion: {:?}", other),
        };

        assert_eq!(liked.len(), 2);
        assert_eq!(liked[0].community, "East");
        assert_eq!(liked[0].result.as_ref().unwrap(), &LikeCount { count: 2 });
        assert_eq!(liked[1].community, "West");
        assert_eq!(
            liked[1].result.as_ref().unwrap_err().to_string(),
            "request error, gone"
        );

        let sent = h.transport.sent.borrow();
        let urls: Vec<_> = sent.iter().map(|(url, _)| url.as_str()).collect();
        assert_eq!(
            urls,
            ["/api/setcurrentcommunity", "/api/likenotices", "/api/setcurrentcommunity"]
        );
        assert_eq!(sent[0].1.body.as_deref(), Some(r#"{"name":"East"}"#));
        assert_eq!(sent[1].1.body.as_deref(), Some(r#"{"count":4}"#));
    }

    #[test]
    fn expired_session_stops_community_run() {
        let h = harness(MockTransport::sequence(&[(401, "")]));
        let api = Api::new(Rc::new(h.helper));
        let names = vec!["East".to_owned(), "West".to_owned()];

        let completion = block_on(api.like_in_communities(&names, LikeKind::Moments, 1));

        assert!(matches!(completion, Completion::Handled));
        assert_eq!(h.transport.sent.borrow().len(), 1);
        assert_eq!(h.notifier.toasts.borrow().len(), 1);
    }

    #[test]
    fn community_run_refuses_zero_count() {
        let h = harness(MockTransport::unreachable());
        let api = Api::new(Rc::new(h.helper));

        let completion = block_on(api.like_in_communities(&["East".to_owned()], LikeKind::Moments, 0));

        assert!(matches!(
            completion,
            Completion::Failure(RequestError::InvalidArgument(_))
        ));
        assert!(h.transport.sent.borrow().is_empty());
    }

    #[test]
    fn like_paths_match_server_routes() {
        let segments: Vec<_> = LikeKind::ALL.iter().map(LikeKind::path_segment).collect();
        assert_eq!(segments, ["notices", "moments", "ccpposts", "proposals"]);
    }

    #[test]
    fn zero_like_count_is_refused_locally() {
        let h = harness(MockTransport::unreachable());
        let api = Api::new(Rc::new(h.helper));
        let errors = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&errors);
        api.like(
            LikeKind::Moments,
            0,
            RequestOptions::new().on_error(move |err| sink.borrow_mut().push(err.to_string())),
        );

        assert_eq!(*errors.borrow(), vec!["request error, invalid count 0".to_owned()]);
        assert!(h.transport.sent.borrow().is_empty());
    }

    #[test]
    fn zero_like_count_without_callback_shows_tip() {
        let h = harness(MockTransport::unreachable());
        let api = Api::new(Rc::new(h.helper));

        api.like(LikeKind::Notices, 0, RequestOptions::new());

        assert_eq!(
            *h.notifier.tips.borrow(),
            vec!["request error, invalid count 0".to_owned()]
        );
    }
}
