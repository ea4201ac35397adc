use std::time::Duration;

use api::incentives::IncentiveSnapshot;
use api::pool::PoolId;
use api::queries::LockupQueries;
use api::ApiError;
use dioxus::prelude::*;

use crate::account::SharedAccount;
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::action_link::ActionLink;
use crate::components::pico::Card;
use crate::lockups::MyLockupsTable;
use crate::Screen;

const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[component]
pub fn PoolScreen(pool_id: PoolId) -> Element {
    let account = use_context::<SharedAccount>();
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let active_screen = use_context::<Signal<Screen>>();

    let owner = account.bech32_address().to_string();
    let mut pool_resource = use_resource(move || {
        let owner = owner.clone();
        async move {
            let (queries, incentives) =
                tokio::join!(api::lockup_queries(owner), api::incentive_snapshot(pool_id));
            Ok::<_, ApiError>((queries?, incentives?))
        }
    });

    // Last good load. Refreshes replace it without unmounting the table,
    // so a row that is mid-submission keeps its state.
    let mut latest = use_signal(|| None::<(LockupQueries, IncentiveSnapshot)>);
    use_effect(move || {
        if let Some(Ok(data)) = pool_resource.read().as_ref() {
            if latest.peek().as_ref() != Some(data) {
                latest.set(Some(data.clone()));
            }
        }
    });

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let mut data_resource = pool_resource;
        async move {
            loop {
                crate::compat::sleep(REFRESH_INTERVAL).await;
                data_resource.restart();
            }
        }
    });

    let fiat = app_state.user_prefs.fiat_currency();
    let prices_ready = app_state_mut
        .prices
        .read()
        .as_ref()
        .is_some_and(|prices| prices.contains(fiat));

    let refresh_error = match &*pool_resource.read() {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    };

    rsx! {
        Card {
            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem;",
                h3 { style: "margin-bottom: 0;", "Pool #{pool_id}" }
                ActionLink {
                    state: active_screen,
                    to: Screen::Pools,
                    "All pools"
                }
            }

            if !account.is_ready_to_send_msgs() {
                p {
                    small {
                        style: "color: var(--pico-muted-color);",
                        "No signer is connected. Bondings are shown but cannot be unbonded."
                    }
                }
            }

            match (latest(), refresh_error) {
                (Some((queries, incentives)), error) => rsx! {
                    if let Some(e) = error {
                        p { small { style: "color: var(--pico-del-color);", "Refresh failed: {e}" } }
                    }
                    if prices_ready {
                        MyLockupsTable { pool_id, queries, incentives }
                    } else {
                        p { "Loading prices..." }
                        progress {}
                    }
                },
                (None, Some(e)) => rsx! {
                    h4 { "Error" }
                    p { "Failed to load pool data: {e}" }
                    button { onclick: move |_| pool_resource.restart(), "Retry" }
                },
                (None, None) => rsx! {
                    p { "Loading..." }
                    progress {}
                },
            }
        }
    }
}
