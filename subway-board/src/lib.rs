//! NYC subway arrival board.
//!
//! Answers "what is leaving this stop next?": merges the upstream boards of
//! a stop and its directional platforms into one ranked list, alongside
//! transfers, headways and the stop's trunk line.

pub mod board;
pub mod cache;
pub mod catalog;
pub mod domain;
pub mod topology;
pub mod transiter;
pub mod web;
