//! MadLibs web service
//!
//! Asks a language model for a fill-in-the-blank story template on a topic,
//! fills it with the player's words, turns the finished story into a comic
//! brief, and renders an illustration with an image-generation model.

pub mod ai;
pub mod api;
pub mod app;
pub mod error;
pub mod images;
pub mod madlib;
pub mod models;
pub mod prompts;
pub mod store;

pub use error::{Error, Result};
