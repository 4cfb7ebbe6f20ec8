// Job postings: listing with filters, detail, creation.

pub mod filters;
pub mod handlers;
pub mod store;
pub mod validation;
