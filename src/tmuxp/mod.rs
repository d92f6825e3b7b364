//! tmuxp session config generation

mod renderer;

pub use renderer::{write_session, SessionRenderer};
