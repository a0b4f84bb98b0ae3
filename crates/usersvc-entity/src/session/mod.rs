//! Session records held in the credential store.

pub mod record;

pub use record::SessionRecord;
