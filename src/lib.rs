#![doc = include_str!("../README.md")]
#![warn(rustdoc::all)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{ResolverError, Result};

pub mod sun;
pub use sun::SourceUnitName;

pub mod path_utils;

pub mod vfs;
pub use vfs::{Origin, SourceUnit, Vfs};

pub mod remapping;
pub use remapping::{Remapping, RemappingEngine};

pub mod resolver;
pub use resolver::ImportResolver;

pub mod loader;
pub use loader::{Dispatcher, LoadOutcome, LoaderCallback};

pub mod config;
pub use config::ResolverConfigBuilder;

pub mod session;
pub use session::Session;

pub mod driver;

pub mod standard_json;
pub use standard_json::{SourceEntry, StandardJsonSources};
