//! discogs-dump-cli library
//!
//! This crate provides the core functionality for the `discogs-dump-cli`
//! binary. Keep the crate root minimal — implementation and tests live in
//! their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of the
//! dump-to-CSV pipeline:
//!
//! - [`parser`] - Streams gzip-compressed Discogs dump XML into typed entity records
//! - [`exporter`] - Writes entity streams out as relational CSV tables
//! - [`cli`] - Command-line interface orchestrating the export workflow
//! - [`models`] - Data structures representing entities and their sub-records
//! - [`config`] - Export configuration with TOML file support
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The parser is a lazy, single-pass iterator; memory stays bounded no matter
//! how large the dump is:
//!
//! ```no_run
//! use discogs_dump_cli::models::EntityKind;
//! use discogs_dump_cli::parser;
//!
//! # fn main() -> discogs_dump_cli::errors::AppResult<()> {
//! let dump = std::path::Path::new("data/dumps/discogs_20230801_artists.xml.gz");
//! for entity in parser::parse_file(dump, EntityKind::Artist)? {
//!     let entity = entity?;
//!     println!("artist {}", entity.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod ui;
pub mod utils;
