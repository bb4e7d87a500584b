//! Askama view models and templates.

pub mod blocks;
pub mod views;
