//! Request and response bodies for the contacts API.
//!
//! These are the wire shapes only; conversions into and out of core types live here so handlers
//! stay thin.

use chrono::NaiveDate;
use contacts_core::{Contact, ContactFields};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body for creating or replacing a contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1990-01-15")]
    pub birthday: NaiveDate,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl From<ContactReq> for ContactFields {
    fn from(req: ContactReq) -> Self {
        ContactFields {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            birthday: req.birthday,
            additional_info: req.additional_info,
        }
    }
}

/// A stored contact as returned to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactRes {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1990-01-15")]
    pub birthday: NaiveDate,
    /// Identity of the owning user.
    pub user_id: i64,
    pub additional_info: Option<String>,
}

impl From<Contact> for ContactRes {
    fn from(contact: Contact) -> Self {
        let Contact {
            id,
            owner_id,
            fields,
        } = contact;
        ContactRes {
            id: id.get(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            birthday: fields.birthday,
            user_id: owner_id.get(),
            additional_info: fields.additional_info,
        }
    }
}

/// Pagination for the contact list. Omitted values use the server's configured defaults.
#[derive(Clone, Copy, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of contacts to skip
    pub skip: Option<u32>,
    /// Maximum number of contacts to return
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body, e.g. `{"detail": "Contact not found"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

impl ErrorRes {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
