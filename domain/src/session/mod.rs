//! Backend request domain.
//!
//! - [`entities::ChatMessage`]: a single role-tagged turn sent to a model

pub mod entities;
