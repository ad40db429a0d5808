use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    api::{Api, Communities, CommunityLikes, LikeKind},
    config::Config,
    requests::{Completion, RequestOptions},
};

const DEFAULT_LIKE_COUNT: u32 = 10;

fn summarize(kind: LikeKind, liked: &[CommunityLikes]) -> Vec<String> {
    liked
        .iter()
        .map(|entry| match &entry.result {
            Ok(count) => format!("{} / {}: liked {} posts", entry.community, kind, count.count),
            Err(err) => format!("{} / {}: {}", entry.community, kind, err),
        })
        .collect()
}

#[function_component(CommunityPage)]
pub fn community_page() -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let communities = use_state(|| None::<Communities>);
    let chosen = use_state(Vec::<String>::new);
    let count = use_state(|| DEFAULT_LIKE_COUNT);
    let report = use_state(Vec::<String>::new);

    {
        let communities = communities.clone();
        let chosen = chosen.clone();
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                Api::browser(&config).communities(RequestOptions::new().on_success(
                    move |loaded: Communities| {
                        if let Some(current) = loaded.current_name() {
                            chosen.set(vec![current.to_owned()]);
                        }
                        communities.set(Some(loaded));
                    },
                ));
                || ()
            },
            (),
        );
    }

    let on_count = {
        let count = count.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            count.set(input.value().trim().parse().unwrap_or(0));
        })
    };

    let like_buttons = LikeKind::ALL
        .iter()
        .map(|&kind| {
            let report = report.clone();
            let names = (*chosen).clone();
            let count = *count;
            let config = config.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                let api = Api::browser(&config);
                let report = report.clone();
                let names = names.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api.like_in_communities(&names, kind, count).await {
                        Completion::Success(liked) => report.set(summarize(kind, &liked)),
                        Completion::Failure(err) => api.report(err),
                        Completion::Handled => {}
                    }
                });
            });
            html!(<button class="weui-btn weui-btn_primary" onclick={onclick}>{kind.to_string()}</button>)
        })
        .collect::<Html>();

    let picker = match &*communities {
        Some(loaded) => loaded
            .names
            .iter()
            .map(|name| {
                let checked = chosen.contains(name);
                let onchange = {
                    let chosen = chosen.clone();
                    let name = name.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut names = (*chosen).clone();
                        names.retain(|chosen_name| chosen_name != &name);
                        if input.checked() {
                            names.push(name.clone());
                        }
                        chosen.set(names);
                    })
                };
                html!(
                    <label class="weui-cell weui-check__label">
                        <input class="weui-check" type="checkbox" checked={checked} onchange={onchange} />
                        {name.clone()}
                    </label>
                )
            })
            .collect::<Html>(),
        None => html!(<p>{"Loading communities..."}</p>),
    };

    html!(
        <div class="page community">
            {picker}
            <input
                class="weui-input"
                type="number"
                min="1"
                value={count.to_string()}
                onchange={on_count}
            />
            {like_buttons}
            <ul class="report">
                { for report.iter().map(|line| html!(<li>{line.clone()}</li>)) }
            </ul>
        </div>
    )
}
