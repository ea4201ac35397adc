use api::prefs::chain_config::ChainConfig;
use api::prefs::user_prefs::UserPrefs;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct AppStateData {
    pub chain: ChainConfig,
    pub user_prefs: UserPrefs,
}

/// Settings that stay fixed for the life of the app.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(chain: ChainConfig, user_prefs: UserPrefs) -> Self {
        Self(Arc::new(AppStateData { chain, user_prefs }))
    }
}
