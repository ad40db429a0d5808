use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::{
    api::{Api, LoginStatus, QrLogin},
    config::Config,
    requests::RequestOptions,
    ui::{Navigator, WindowNavigator},
};

const POLL_INTERVAL_MS: u32 = 2_000;

#[function_component(QrLoginPage)]
pub fn qr_login_page() -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let qr_url = use_state(|| None::<String>);

    {
        let qr_url = qr_url.clone();
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                Api::browser(&config).start_qr_login(
                    RequestOptions::new()
                        .on_success(move |login: QrLogin| qr_url.set(Some(login.url))),
                );
                || ()
            },
            (),
        );
    }

    // poll only once the server knows about this session
    use_effect_with_deps(
        move |waiting| {
            let poll = (*waiting).then(|| {
                let api = Api::browser(&config);
                let route = config.community_route.clone();
                Interval::new(POLL_INTERVAL_MS, move || {
                    let route = route.clone();
                    api.is_logged_in(RequestOptions::new().on_success(move |status: LoginStatus| {
                        if status.logged_in {
                            WindowNavigator.navigate(&route);
                        }
                    }));
                })
            });
            move || drop(poll)
        },
        qr_url.is_some(),
    );

    html!(
        <div class="page qr-login">
            <h2>{"Scan to log in"}</h2>
            {
                match &*qr_url {
                    Some(url) => html!(<img class="qr-code" src={url.clone()} alt="login QR code" />),
                    None => html!(<p>{"Loading..."}</p>),
                }
            }
        </div>
    )
}
