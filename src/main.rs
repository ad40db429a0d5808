use atom_web::{
    config::Config,
    pages::{CommunityPage, Page, QrLoginPage},
    ui::WindowNavigator,
};
use yew::{context::ContextProvider, prelude::*};

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Config,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let page = match Page::from_path(&WindowNavigator::current_path(), &props.config) {
        Page::QrLogin => html!(<QrLoginPage />),
        Page::Community => html!(<CommunityPage />),
    };

    html!(
        <ContextProvider<Config> context={props.config.clone()}>
            {page}
        </ContextProvider<Config>>
    )
}

fn main() {
    let config = Config::for_build();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    yew::start_app_with_props::<App>(AppProps { config });
}
