//! The "Unbond All" action of a lockup row.

use crate::account::AccountFacade;
use crate::components::toasts::Notifier;
use crate::components::toasts::Toast;
use api::coin::CoinAmount;
use api::lock::LockId;
use api::tx::TxExplorer;
use dioxus_logger::tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumIs)]
pub enum UnbondState {
    #[default]
    Idle,
    Submitting,
}

pub fn is_action_enabled(account_ready: bool, amount: &CoinAmount, state: UnbondState) -> bool {
    account_ready && !amount.is_zero() && state.is_idle()
}

/// Moves an idle row to `Submitting`. Returns `false` when a submission is already under way.
pub fn begin_submission(state: &mut UnbondState) -> bool {
    if state.is_submitting() {
        return false;
    }
    *state = UnbondState::Submitting;
    true
}

/// Begins unlocking every lock in `lock_ids` with one message.
///
/// `set_state` sees `Submitting` before the message is sent and `Idle` once
/// the outcome is known, whether that is a submission error or the
/// delivered transaction result.
pub async fn unbond_all<A, N, S>(
    account: &A,
    notifier: N,
    explorer: TxExplorer,
    lock_ids: Vec<LockId>,
    mut set_state: S,
) where
    A: AccountFacade + ?Sized,
    N: Notifier + Clone + 'static,
    S: FnMut(UnbondState) + Clone + 'static,
{
    if !account.is_ready_to_send_msgs() {
        warn!("unbond requested before the account is ready");
        set_state(UnbondState::Idle);
        return;
    }

    set_state(UnbondState::Submitting);
    info!("unbonding {} lock(s)", lock_ids.len());

    let on_result = {
        let notifier = notifier.clone();
        let mut set_state = set_state.clone();
        Box::new(move |result: api::tx::TxResult| {
            if result.is_success() {
                notifier.display_toast(Toast::Successful {
                    custom_link: explorer.tx_url(&result.hash),
                });
            } else {
                notifier.display_toast(Toast::Failed { message: result.log });
            }
            set_state(UnbondState::Idle);
        })
    };

    match account
        .send_begin_unlocking_msg(lock_ids, String::new(), on_result)
        .await
    {
        Ok(()) => notifier.display_toast(Toast::Broadcasting),
        Err(e) => {
            warn!("unbond failed: {}", e);
            notifier.display_toast(Toast::Failed {
                message: e.to_string(),
            });
            set_state(UnbondState::Idle);
        }
    }
}
