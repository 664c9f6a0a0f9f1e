//! The contact record and its caller-supplied fields.

use chrono::NaiveDate;
use contacts_types::{ContactId, OwnerId};

/// Everything about a contact that its owner supplies and may later replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Only the month and day take part in birthday matching; the year is kept as given.
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
}

/// A stored contact.
///
/// `id` is assigned by the store and `owner_id` is taken from the authenticated caller at
/// creation. Neither changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub owner_id: OwnerId,
    pub fields: ContactFields,
}
