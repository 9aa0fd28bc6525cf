mod artist;
mod common;
mod element;
mod file_finder;
mod label;
mod master;
mod release;
mod stream;

// Re-export public API
pub use element::Element;
pub use file_finder::find_dump;
pub use stream::{open_dump, parse, parse_file, EntityStream, IdSource};
