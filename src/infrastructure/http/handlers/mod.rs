//! HTTP Handlers

mod combination;
mod ping;

pub use combination::*;
pub use ping::*;
