use dioxus::prelude::*;

use crate::Screen;

#[derive(Props, Clone, PartialEq)]
pub struct ActionLinkProps {
    #[props(optional)]
    pub state: Option<Signal<Screen>>,

    #[props(optional)]
    pub to: Option<Screen>,

    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,

    pub children: Element,
}

/// A link that switches screens in place instead of following an href.
#[component]
pub fn ActionLink(props: ActionLinkProps) -> Element {
    rsx! {
        a {
            href: "#",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();

                if let (Some(mut state_signal), Some(target)) = (props.state, &props.to) {
                    state_signal.set(*target);
                }

                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
