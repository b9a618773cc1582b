mod log;
mod reader;
mod types;
mod writer;

pub use log::HarLog;
pub use reader::HarReader;
pub use types::*;
pub use writer::HarWriter;
