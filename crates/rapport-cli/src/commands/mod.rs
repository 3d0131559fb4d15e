pub mod chat;
pub mod notes;
pub mod reflow;
