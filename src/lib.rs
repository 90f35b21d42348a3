//! Client for a user-administration REST backend: typed API calls, a
//! reducer-driven session store, and session persistence for the CLI.

pub mod config;
pub mod net;
pub mod session;
pub mod state;
pub mod storage;
