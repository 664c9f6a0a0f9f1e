//! # Contacts Core
//!
//! Core business logic for the contacts service.
//!
//! This crate contains pure data operations:
//! - Owner-scoped contact CRUD and field lookups ([`ContactService`])
//! - The upcoming-birthdays window ([`birthdays`])
//! - SQLite persistence and schema migrations ([`store`], [`db`])
//!
//! **No API concerns**: authentication, HTTP servers and request schemas belong in `api-rest` or
//! `api-shared`. The caller's identity is always passed in explicitly.

pub mod birthdays;
pub mod clock;
pub mod config;
pub mod constants;
pub mod contact;
pub mod db;
pub mod error;
pub mod repositories;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CoreConfig, DatabaseLocation, ListDefaults};
pub use contact::{Contact, ContactFields};
pub use contacts_types::{ContactId, MonthDay, OwnerId};
pub use error::{ContactError, ContactResult};
pub use repositories::contacts::ContactService;
pub use store::{ContactLookup, ContactStore, Page, SqliteContactStore};
