//! Vitrine renders office-location pages and carousel content blocks from a headless CMS,
//! either on request over HTTP or ahead of time into a static directory.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
