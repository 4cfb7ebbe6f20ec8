pub mod job;
pub mod project;
pub mod resource;
pub mod skill;
pub mod user;
