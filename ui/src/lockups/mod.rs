//! The "My Bondings" table: one row per bonding duration of a pool.

pub mod rows;
pub mod unbond;

use crate::account::SharedAccount;
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::toasts::SignalNotifier;
use api::incentives::IncentiveSnapshot;
use api::pool::PoolId;
use api::queries::LockupQueries;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use rows::lockup_rows;
use rows::LockupRowModel;
use unbond::begin_submission;
use unbond::is_action_enabled;
use unbond::unbond_all;
use unbond::UnbondState;

#[component]
pub fn MyLockupsTable(pool_id: PoolId, queries: LockupQueries, incentives: IncentiveSnapshot) -> Element {
    let account = use_context::<SharedAccount>();
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();

    let fiat = app_state.user_prefs.fiat_currency();
    let prices = app_state_mut.prices.read().clone().unwrap_or_default();

    let rows: Vec<LockupRowModel> = lockup_rows(
        pool_id,
        account.bech32_address(),
        &queries,
        &incentives,
        &prices,
        fiat,
    )
    .collect();

    rsx! {
        div {
            h6 { "My Bondings" }
            div {
                style: "overflow-x: auto;",
                table {
                    thead {
                        tr {
                            th { "Bonding Duration" }
                            th { "Current APY" }
                            th { "Amount" }
                            th { style: "text-align: right;", "Action" }
                        }
                    }
                    tbody {
                        for row in rows {
                            LockupTableRow {
                                key: "{row.duration_label}",
                                row,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LockupTableRow(row: LockupRowModel) -> Element {
    let account = use_context::<SharedAccount>();
    let app_state = use_context::<AppState>();
    let notifier = use_context::<SignalNotifier>();
    let mut state = use_signal(UnbondState::default);

    let account_ready = account.is_ready_to_send_msgs();
    let lock_ids = row.lockup.lock_ids.clone();

    rsx! {
        LockupRowView {
            row,
            account_ready,
            state: state(),
            on_unbond: move |_| {
                if !begin_submission(&mut state.write()) {
                    return;
                }

                let account = account.clone();
                let explorer = app_state.chain.explorer();
                let lock_ids = lock_ids.clone();
                // The row may unmount before the transaction lands.
                let set_state = move |next: UnbondState| {
                    if let Ok(mut current) = state.try_write() {
                        *current = next;
                    }
                };
                spawn_forever(async move {
                    unbond_all(&*account, notifier, explorer, lock_ids, set_state).await;
                });
            },
        }
    }
}

#[component]
fn LockupRowView(
    row: LockupRowModel,
    account_ready: bool,
    state: UnbondState,
    on_unbond: EventHandler<MouseEvent>,
) -> Element {
    let enabled = is_action_enabled(account_ready, &row.lockup.amount, state);
    let amount = row.amount_display();

    rsx! {
        tr {
            td { "{row.duration_label}" }
            td { "{row.apy}" }
            td { "{amount}" }
            td {
                style: "text-align: right;",
                Button {
                    disabled: !enabled,
                    busy: state.is_submitting(),
                    on_click: move |evt| on_unbond.call(evt),
                    if !state.is_submitting() {
                        "Unbond All"
                    }
                }
            }
        }
    }
}
