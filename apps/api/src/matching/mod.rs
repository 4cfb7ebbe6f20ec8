// Skill-matching recommender.
// normalize → scoring → ranker are pure; source/service/handlers are the I/O boundary.

pub mod assembler;
pub mod handlers;
pub mod normalize;
pub mod ranker;
pub mod recommend;
pub mod scoring;
pub mod service;
pub mod source;

#[cfg(test)]
pub mod fakes;
