//! Service layer: remote edit client, history store, session controller.

pub mod history;
pub mod refine;
pub mod session;
