pub mod error;
pub mod export;
pub mod parser;
pub mod record;
pub mod settings;

pub use error::{Error, Result};
pub use parser::{parse, run_parser, Dialect, Engine, ParseReport};
pub use record::{Record, RecordTable};
