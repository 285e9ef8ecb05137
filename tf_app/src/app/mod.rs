//! App state and scripted editor session

pub mod defaults;
mod script;
mod state;

pub use script::ScriptStep;
pub use state::AppState;
