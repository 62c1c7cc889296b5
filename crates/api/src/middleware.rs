//! API middleware and shared state.

#![allow(missing_docs)]

use muse_core::{LoveService, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub love_service: LoveService,
}
