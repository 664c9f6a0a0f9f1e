//! Repository services.
//!
//! Services here sit on top of a [`ContactStore`](crate::store::ContactStore) and add the
//! behaviour callers rely on: input normalisation, pagination defaults and the birthday window.

pub mod contacts;
