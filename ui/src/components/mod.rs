//! Shared building blocks for the screens.
pub mod action_link;
pub mod empty_state;
pub mod pico;
pub mod toasts;
