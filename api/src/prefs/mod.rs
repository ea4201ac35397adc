pub mod chain_config;
pub mod user_prefs;
