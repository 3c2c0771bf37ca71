//! Live rendering of discussion events

pub mod reporter;
