//! Transaction toasts and the notifier that shows them.

use crate::compat;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use std::time::Duration;

const TOAST_LIFETIME: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, PartialEq, Eq, strum::EnumIs)]
pub enum Toast {
    Broadcasting,
    Successful { custom_link: String },
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum ToastKind {
    #[strum(serialize = "TX_BROADCASTING")]
    TxBroadcasting,
    #[strum(serialize = "TX_SUCCESSFUL")]
    TxSuccessful,
    #[strum(serialize = "TX_FAILED")]
    TxFailed,
}

impl Toast {
    pub fn kind(&self) -> ToastKind {
        match self {
            Toast::Broadcasting => ToastKind::TxBroadcasting,
            Toast::Successful { .. } => ToastKind::TxSuccessful,
            Toast::Failed { .. } => ToastKind::TxFailed,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Toast::Broadcasting => "Transaction Broadcasting",
            Toast::Successful { .. } => "Transaction Successful",
            Toast::Failed { .. } => "Transaction Failed",
        }
    }
}

pub trait Notifier {
    fn display_toast(&self, toast: Toast);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    id: u64,
    toast: Toast,
}

/// Keeps the visible toasts in a signal so [`ToastStack`] re-renders on change.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalNotifier {
    toasts: Signal<Vec<ToastEntry>>,
    next_id: Signal<u64>,
}

impl SignalNotifier {
    pub fn new(toasts: Signal<Vec<ToastEntry>>, next_id: Signal<u64>) -> Self {
        Self { toasts, next_id }
    }

    fn dismiss(mut self, id: u64) {
        self.toasts.write().retain(|entry| entry.id != id);
    }
}

impl Notifier for SignalNotifier {
    fn display_toast(&self, toast: Toast) {
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);

        let mut toasts = self.toasts;
        toasts.write().push(ToastEntry { id, toast });

        let notifier = *self;
        // Detached from the caller's scope so the toast still expires after it unmounts.
        spawn_forever(async move {
            compat::sleep(TOAST_LIFETIME).await;
            notifier.dismiss(id);
        });
    }
}

#[component]
pub fn ToastStack() -> Element {
    let notifier = use_context::<SignalNotifier>();
    let toasts = notifier.toasts.read().clone();

    rsx! {
        div {
            style: "position: fixed; right: 1rem; bottom: 1rem; z-index: 1000; display: flex; flex-direction: column; gap: 0.5rem; max-width: 22rem;",
            for entry in toasts {
                article {
                    key: "{entry.id}",
                    "data-kind": <&'static str>::from(entry.toast.kind()),
                    style: "margin: 0; padding: 0.75rem 1rem; cursor: pointer;",
                    onclick: move |_| notifier.dismiss(entry.id),
                    strong {
                        style: if entry.toast.is_failed() { "color: var(--pico-del-color);" } else { "" },
                        "{entry.toast.title()}"
                    }
                    match &entry.toast {
                        Toast::Broadcasting => rsx! {
                            p { style: "margin: 0;", "Waiting for transaction to be included in the block" }
                        },
                        Toast::Successful { custom_link } => rsx! {
                            p {
                                style: "margin: 0;",
                                a {
                                    href: "{custom_link}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    onclick: |evt: MouseEvent| evt.stop_propagation(),
                                    "View explorer"
                                }
                            }
                        },
                        Toast::Failed { message } => rsx! {
                            p { style: "margin: 0;", "{message}" }
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;

    #[test]
    fn kinds_and_titles() {
        let failed = Toast::Failed {
            message: "out of gas".to_string(),
        };
        let kind: &'static str = failed.kind().into();

        assert_eq!(kind, "TX_FAILED");
        assert_eq!(failed.title(), "Transaction Failed");
        assert_eq!(Toast::Broadcasting.kind(), ToastKind::TxBroadcasting);
        assert_eq!(
            Toast::Successful {
                custom_link: "https://explorer.test/txs/ABC".to_string()
            }
            .title(),
            "Transaction Successful"
        );
    }

    /// Raises a toast from its own task, then unmounts itself.
    #[component]
    fn ShortLivedRow() -> Element {
        let notifier = use_context::<SignalNotifier>();
        let mut mounted = use_context::<Signal<bool>>();
        use_hook(move || {
            spawn(async move {
                notifier.display_toast(Toast::Broadcasting);
                mounted.set(false);
            });
        });
        rsx! { span { "short-lived row" } }
    }

    fn host() -> Element {
        let toasts = use_signal(Vec::new);
        let next_id = use_signal(|| 0);
        use_context_provider(|| SignalNotifier::new(toasts, next_id));
        let row_mounted = use_signal(|| true);
        use_context_provider(|| row_mounted);

        rsx! {
            if row_mounted() {
                ShortLivedRow {}
            }
            ToastStack {}
        }
    }

    async fn run_for(dom: &mut VirtualDom, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            let woke = tokio::select! {
                _ = dom.wait_for_work() => true,
                _ = tokio::time::sleep_until(deadline) => false,
            };
            if !woke {
                break;
            }
            dom.render_immediate_to_vec();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_its_raiser_unmounts() {
        let mut dom = VirtualDom::new(host);
        dom.rebuild_in_place();

        run_for(&mut dom, Duration::from_secs(1)).await;
        let html = dioxus_ssr::render(&dom);
        assert!(!html.contains("short-lived row"));
        assert!(html.contains("Transaction Broadcasting"));

        run_for(&mut dom, TOAST_LIFETIME).await;
        let html = dioxus_ssr::render(&dom);
        assert!(!html.contains("Transaction Broadcasting"));
    }
}
