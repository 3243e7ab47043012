//! Request and response types shared by the search client and its callers.

pub mod document;
pub mod query;
pub mod response;
