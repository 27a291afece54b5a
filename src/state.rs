use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::revalidate::Revalidations;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub revalidations: Revalidations,
}
