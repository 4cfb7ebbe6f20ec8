// Users, profiles and the profile's skill list.

pub mod handlers;
pub mod store;
pub mod validation;
