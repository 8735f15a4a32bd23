//! Recording replay: parse a dumper file back into events and feed them
//! through the same reducer live play uses.

mod error;
mod parser;
mod reader;
mod session;

pub use error::ReplayError;
pub use parser::RecordingParser;
pub use reader::{LoadSummary, Reader, load_recording};
pub use session::ReplaySession;
