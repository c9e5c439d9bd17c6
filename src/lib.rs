//! roster - Terminal-based student records manager
//!
//! This library provides the core functionality for the roster application:
//! a single-tenant register of students with their attendance, grades and fee
//! payments, and the monthly reports sent to their parents.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (students, grades, payments, attendance)
//! - `storage`: The student document and its in-memory repository
//! - `services`: Business logic layer
//! - `reports`: Day buckets, summaries, monthly reports and the dashboard
//! - `audit`: Audit logging system
//! - `export`: Spreadsheet import/export and full dumps
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::config::{RosterPaths, Settings};
//! use roster::storage::Storage;
//!
//! let paths = RosterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, settings)?;
//! storage.load()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{RosterError, RosterResult};
