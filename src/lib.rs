// Pumice: guideline-driven content moderation
//
// This is the library root. Each module corresponds to a major subsystem
// of the moderation pipeline.

pub mod audit;
pub mod classify;
pub mod config;
pub mod guidelines;
pub mod media;
pub mod pipeline;
pub mod status;
pub mod verdict;
pub mod web;
