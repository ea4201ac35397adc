// The client-side Dioxus application logic.

use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;

mod account;
mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
mod lockups;
mod screens;

use account::SharedAccount;
use account::SignerAccount;
use api::pool::PoolId;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Button;
use components::pico::ButtonType;
use components::pico::Container;
use components::toasts::SignalNotifier;
use components::toasts::ToastStack;
use screens::pool::PoolScreen;
use screens::pools::PoolsScreen;

const PRICE_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, PartialEq, Default)]
enum Screen {
    #[default]
    Pools,
    Pool(PoolId),
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let css = r#"
    .app-header nav { --pico-nav-element-spacing-vertical: 0.5rem; }
    .app-header strong { font-size: 1.25rem; }
    .app-header small { color: var(--pico-muted-color); font-family: var(--pico-font-family-monospace); }
    table td, table th { white-space: nowrap; }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let initial_data_future = use_server_future(move || async move {
        let (chain_result, prefs_result, signer_result) =
            tokio::join!(api::chain_config(), api::get_user_prefs(), api::signer_account());

        let chain = chain_result?;
        let user_prefs = prefs_result?;
        let signer_address = signer_result?;

        dioxus_logger::tracing::info!("chain: {:#?}", chain);
        dioxus_logger::tracing::info!("prefs: {:#?}", user_prefs);

        Ok::<_, api::ApiError>((chain, user_prefs, signer_address))
    })?;

    let body = match &*initial_data_future.read() {
        Some(Ok((chain, prefs, signer_address))) => {
            rsx! {
                LoadedApp {
                    app_state: AppState::new(chain.clone(), *prefs),
                    signer_address: signer_address.clone(),
                }
            }
        }
        Some(Err(e)) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
        _ => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(app_state: AppState, signer_address: Option<String>) -> Element {
    use_context_provider(|| app_state.clone());

    let account: SharedAccount =
        use_context_provider(|| Rc::new(SignerAccount::new(signer_address.clone())) as SharedAccount);

    let toasts = use_signal(Vec::new);
    let next_toast_id = use_signal(|| 0);
    use_context_provider(|| SignalNotifier::new(toasts, next_toast_id));

    let prices_signal = use_signal(|| None);
    use_context_provider(|| AppStateMut {
        prices: prices_signal,
    });
    let mut app_state_mut = use_context::<AppStateMut>();

    let prices_resource = use_resource(move || async move { api::fiat_prices().await });

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let mut res = prices_resource;
        async move {
            loop {
                compat::sleep(PRICE_REFRESH_INTERVAL).await;
                res.restart();
            }
        }
    });

    use_effect(move || match prices_resource.read().as_ref() {
        Some(Ok(price_map)) => {
            // This check prevents infinite loops if the resource returns the same data.
            if app_state_mut.prices.peek().as_ref() != Some(price_map) {
                app_state_mut.prices.set(Some(price_map.clone()));
            }
        }
        Some(Err(e)) => dioxus_logger::tracing::warn!("fiat prices unavailable: {}", e),
        None => {}
    });

    let mut active_screen = use_signal(Screen::default);
    use_context_provider(|| active_screen);

    let address = account.bech32_address().to_string();

    rsx! {
        Container {
            header {
                class: "app-header",
                nav {
                    ul {
                        li { strong { "Osmosis Bondings" } }
                    }
                    ul {
                        li {
                            if address.is_empty() {
                                small { "no signer" }
                            } else {
                                small { title: "{address}", "{address}" }
                            }
                        }
                        li {
                            Button {
                                button_type: ButtonType::Secondary,
                                outline: true,
                                disabled: active_screen() == Screen::Pools,
                                on_click: move |_| active_screen.set(Screen::Pools),
                                "Pools"
                            }
                        }
                    }
                }
            }
            match active_screen() {
                Screen::Pools => rsx! {
                    PoolsScreen {}
                },
                Screen::Pool(pool_id) => rsx! {
                    PoolScreen { key: "{pool_id}", pool_id }
                },
            }
        }
        ToastStack {}
    }
}
