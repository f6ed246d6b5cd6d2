pub mod blocked;
pub mod keywords;
pub mod parser;

pub use parser::{find_identifiers, parse_transcript, segments};
