//! `precocerto-auth`: account boundary for sign-in, sign-up, user records.
//!
//! Credential validation and record storage belong to external providers;
//! this crate only defines the ports they plug into and the flows built on
//! top of them.

pub mod account;
pub mod identity;
pub mod records;

pub use account::{AccountService, SignupError};
pub use identity::{AuthError, IdentityProvider, InMemoryIdentityProvider, Session, UserIdentity};
pub use records::{InMemoryRecordStore, RecordStore, UserRecord, WriteError};
