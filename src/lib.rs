//! Betriebskosten - operating cost settlement from the terminal
//!
//! Splits a building's operating costs between parties. A configurable share
//! (30% by default) is allocated by floor area, the rest by heat meter
//! readings. A second workspace holds a simple EÜR ledger.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Documents, parties, meters and ledger entries
//! - `normalize`: Repairs untyped JSON into valid state
//! - `storage`: JSON file storage layer
//! - `services`: Allocation engine and document operations
//! - `audit`: Audit logging system
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use betriebskosten::config::{BkvPaths, Settings};
//! use betriebskosten::storage::Storage;
//!
//! let paths = BkvPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod services;
pub mod storage;

pub use error::{BkvError, BkvResult};
