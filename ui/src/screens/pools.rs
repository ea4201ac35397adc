use api::coin::CoinAmount;
use api::duration::BondingDuration;
use api::fiat_currency::FiatCurrency;
use api::incentives::IncentivizedGauge;
use api::pool::PoolId;
use api::price_map::PriceMap;
use dioxus::prelude::*;
use itertools::Itertools;

use crate::account::SharedAccount;
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::action_link::ActionLink;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Card;
use crate::Screen;

/// Incentivized pools with the durations each one rewards, ordered by pool id.
fn group_by_pool(gauges: &[IncentivizedGauge]) -> Vec<(PoolId, Vec<BondingDuration>)> {
    gauges
        .iter()
        .sorted_by_key(|g| g.pool_id)
        .chunk_by(|g| g.pool_id)
        .into_iter()
        .map(|(pool_id, group)| {
            let durations = group.map(|g| g.lockable_duration).sorted().dedup().collect();
            (pool_id, durations)
        })
        .collect()
}

/// OSMO price in the user's fiat currency, or "-" until prices load.
fn osmo_price_label(prices: Option<&PriceMap>, fiat: FiatCurrency) -> String {
    prices
        .and_then(|prices| prices.get(fiat))
        .map(|price| fiat.format_price(price))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn PoolsScreen() -> Element {
    rsx! {
        PoolsOverview {}
        MyPools {}
        IncentivizedPools {}
    }
}

#[component]
fn PoolsOverview() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();

    let fiat = app_state.user_prefs.fiat_currency();
    let price = osmo_price_label(app_state_mut.prices.read().as_ref(), fiat);

    rsx! {
        Card {
            h3 { "Pools" }
            p {
                style: "margin: 0;",
                "OSMO Price: "
                strong { "{price}" }
            }
        }
    }
}

#[component]
fn MyPools() -> Element {
    let account = use_context::<SharedAccount>();
    let active_screen = use_context::<Signal<Screen>>();
    let owner = account.bech32_address().to_string();

    let mut shares_resource = use_resource(move || {
        let owner = owner.clone();
        async move { api::lockup_queries(owner).await.map(|queries| queries.pool_shares()) }
    });

    rsx! {
        match &*shares_resource.read() {
            None => rsx! {
                Card { h3 { "My Pools" }, p { "Loading..." }, progress {} }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Error" }
                    p { "Failed to load your pools: {e}" }
                    button { onclick: move |_| shares_resource.restart(), "Retry" }
                }
            },
            Some(Ok(shares)) if shares.is_empty() => rsx! {
                Card {
                    h3 { "My Pools" }
                    EmptyState {
                        title: "No Bonded Shares".to_string(),
                        description: Some("Shares you bond in a pool will show up here.".to_string()),
                    }
                }
            },
            Some(Ok(shares)) => rsx! {
                Card {
                    h3 { "My Pools" }
                    table {
                        thead {
                            tr {
                                th { "Pool" }
                                th { "Bonded Shares" }
                            }
                        }
                        tbody {
                            for (pool_id, amount) in shares.clone() {
                                tr {
                                    key: "{pool_id}",
                                    td {
                                        ActionLink {
                                            state: active_screen,
                                            to: Screen::Pool(pool_id),
                                            "Pool #{pool_id}"
                                        }
                                    }
                                    td { {shares_label(&amount)} }
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}

fn shares_label(amount: &CoinAmount) -> String {
    amount.pretty().max_decimals(6).trim(true).to_string()
}

#[component]
fn IncentivizedPools() -> Element {
    let mut pools_resource = use_resource(move || async move { api::incentivized_pools().await });
    let active_screen = use_context::<Signal<Screen>>();

    rsx! {
        match &*pools_resource.read() {
            None => rsx! {
                Card { h3 { "Incentivized Pools" }, p { "Loading..." }, progress {} }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Error" }
                    p { "Failed to load incentivized pools: {e}" }
                    button { onclick: move |_| pools_resource.restart(), "Retry" }
                }
            },
            Some(Ok(gauges)) if gauges.is_empty() => rsx! {
                Card {
                    h3 { "Incentivized Pools" }
                    EmptyState {
                        title: "No Incentivized Pools".to_string(),
                        description: Some("The chain does not currently reward any pool.".to_string()),
                    }
                }
            },
            Some(Ok(gauges)) => {
                let pools = group_by_pool(gauges);
                rsx! {
                    Card {
                        h3 { "Incentivized Pools" }
                        div {
                            style: "max-height: 70vh; overflow-y: auto;",
                            table {
                                thead {
                                    tr {
                                        th { "Pool" }
                                        th { "Rewarded Durations" }
                                    }
                                }
                                tbody {
                                    for (pool_id, durations) in pools {
                                        tr {
                                            key: "{pool_id}",
                                            td {
                                                ActionLink {
                                                    state: active_screen,
                                                    to: Screen::Pool(pool_id),
                                                    "Pool #{pool_id}"
                                                }
                                            }
                                            td {
                                                {durations.iter().map(|d| d.humanize()).join(", ")}
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
