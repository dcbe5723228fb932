//! HTTP handlers for the fingenie service.

pub mod ask;
pub mod health;

pub use ask::ask_question;
pub use health::{readiness_check, root};
