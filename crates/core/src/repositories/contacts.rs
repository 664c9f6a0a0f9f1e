//! Owner-scoped contact operations.
//!
//! Every operation takes the caller's [`OwnerId`] explicitly. Lookups that find nothing return
//! `Ok(None)`; absence is an ordinary outcome, not an error. Store failures are the only errors.
//!
//! ## Lookup normalisation
//!
//! Last-name and email lookups trim surrounding whitespace from the query before comparing.
//! First-name lookups compare the query exactly as given. The asymmetry is long-standing
//! observable behaviour of the API and is kept as is.

use crate::birthdays::birthday_window;
use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::contact::{Contact, ContactFields};
use crate::error::ContactResult;
use crate::store::{ContactLookup, ContactStore, Page};
use contacts_types::{ContactId, OwnerId};
use std::sync::Arc;

/// Service for creating, querying, updating and deleting an owner's contacts.
#[derive(Clone)]
pub struct ContactService {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn ContactStore>,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    /// Creates a contact service.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration, used for list defaults
    /// * `store` - Persistence for contacts
    /// * `clock` - Source of "today" for the upcoming-birthdays query
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn ContactStore>, clock: Arc<dyn Clock>) -> Self {
        Self { cfg, store, clock }
    }

    /// Stores a new contact for `owner`. No uniqueness checks are made.
    pub fn create(&self, fields: ContactFields, owner: OwnerId) -> ContactResult<Contact> {
        let contact = self.store.insert(owner, &fields)?;
        tracing::debug!(contact_id = %contact.id, %owner, "contact created");
        Ok(contact)
    }

    pub fn get_by_id(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let contact = self.store.get(id, owner)?;
        log_lookup("id", contact.as_ref(), owner);
        Ok(contact)
    }

    /// First contact whose first name equals `name` exactly. The query is not trimmed.
    pub fn get_by_first_name(&self, name: &str, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let contact = self
            .store
            .find_first(ContactLookup::FirstName(name), owner)?;
        log_lookup("first_name", contact.as_ref(), owner);
        Ok(contact)
    }

    /// First contact whose last name equals `name` with surrounding whitespace removed.
    pub fn get_by_last_name(&self, name: &str, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let contact = self
            .store
            .find_first(ContactLookup::LastName(name.trim()), owner)?;
        log_lookup("last_name", contact.as_ref(), owner);
        Ok(contact)
    }

    /// First contact whose email equals `email` with surrounding whitespace removed.
    pub fn get_by_email(&self, email: &str, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let contact = self
            .store
            .find_first(ContactLookup::Email(email.trim()), owner)?;
        log_lookup("email", contact.as_ref(), owner);
        Ok(contact)
    }

    /// Lists the owner's contacts in natural order.
    ///
    /// Missing `offset`/`limit` values fall back to the configured
    /// [`ListDefaults`](crate::config::ListDefaults). An offset past the end yields an empty list.
    pub fn list(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
        owner: OwnerId,
    ) -> ContactResult<Vec<Contact>> {
        let page = self.cfg.list_defaults().page(offset, limit);
        self.list_page(page, owner)
    }

    pub fn list_page(&self, page: Page, owner: OwnerId) -> ContactResult<Vec<Contact>> {
        let contacts = self.store.list(page, owner)?;
        tracing::debug!(
            %owner,
            offset = page.offset,
            limit = page.limit,
            returned = contacts.len(),
            "contacts listed"
        );
        Ok(contacts)
    }

    /// Replaces every mutable field of an owned contact.
    ///
    /// Returns `Ok(None)` without touching the store when the contact does not exist or belongs to
    /// someone else.
    pub fn update(
        &self,
        id: ContactId,
        fields: ContactFields,
        owner: OwnerId,
    ) -> ContactResult<Option<Contact>> {
        let contact = self.store.update(id, &fields, owner)?;
        match &contact {
            Some(_) => tracing::debug!(contact_id = %id, %owner, "contact updated"),
            None => tracing::debug!(contact_id = %id, %owner, "update target not found"),
        }
        Ok(contact)
    }

    /// Deletes an owned contact and returns it. Deleting again returns `Ok(None)`.
    pub fn delete(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let contact = self.store.delete(id, owner)?;
        match &contact {
            Some(_) => tracing::debug!(contact_id = %id, %owner, "contact deleted"),
            None => tracing::debug!(contact_id = %id, %owner, "delete target not found"),
        }
        Ok(contact)
    }

    /// Contacts whose birthday falls within the eight days starting today.
    ///
    /// Only month and day are compared; see [`birthday_window`].
    pub fn upcoming_birthdays(&self, owner: OwnerId) -> ContactResult<Vec<Contact>> {
        let today = self.clock.today();
        let window = birthday_window(today)?;
        let contacts = self.store.list_by_birthday(&window, owner)?;
        tracing::debug!(%owner, %today, matched = contacts.len(), "upcoming birthdays");
        Ok(contacts)
    }
}

fn log_lookup(by: &'static str, contact: Option<&Contact>, owner: OwnerId) {
    match contact {
        Some(contact) => tracing::debug!(by, contact_id = %contact.id, %owner, "contact found"),
        None => tracing::debug!(by, %owner, "contact not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{DatabaseLocation, ListDefaults};
    use crate::store::SqliteContactStore;
    use chrono::NaiveDate;

    const ALICE: OwnerId = OwnerId::new(1);
    const BOB: OwnerId = OwnerId::new(2);

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_at(today: NaiveDate) -> ContactService {
        let cfg = Arc::new(
            CoreConfig::new(DatabaseLocation::InMemory, ListDefaults::default())
                .expect("CoreConfig::new should succeed"),
        );
        let store = SqliteContactStore::open(cfg.database()).expect("store should open");
        ContactService::new(cfg, Arc::new(store), Arc::new(FixedClock::new(today)))
    }

    fn test_service() -> ContactService {
        service_at(date(2024, 6, 1))
    }

    fn fields(first: &str, last: &str, email: &str, birthday: NaiveDate) -> ContactFields {
        ContactFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: "07700 900000".to_string(),
            birthday,
            additional_info: Some("notes".to_string()),
        }
    }

    fn smith() -> ContactFields {
        fields("John", "Smith", "john@example.com", date(1980, 5, 17))
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let service = test_service();
        let input = smith();

        let created = service.create(input.clone(), ALICE).expect("create should succeed");
        let fetched = service
            .get_by_id(created.id, ALICE)
            .unwrap()
            .expect("contact should exist");

        assert_eq!(fetched.fields, input);
        assert_eq!(fetched.owner_id, ALICE);
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn test_create_allows_duplicates() {
        let service = test_service();
        let a = service.create(smith(), ALICE).unwrap();
        let b = service.create(smith(), ALICE).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_other_owner_sees_nothing() {
        let service = test_service();
        let created = service.create(smith(), ALICE).unwrap();

        assert_eq!(service.get_by_id(created.id, BOB).unwrap(), None);
        assert_eq!(service.get_by_first_name("John", BOB).unwrap(), None);
        assert_eq!(service.get_by_last_name("Smith", BOB).unwrap(), None);
        assert_eq!(service.get_by_email("john@example.com", BOB).unwrap(), None);
        assert!(service.list(None, None, BOB).unwrap().is_empty());
    }

    #[test]
    fn test_first_name_lookup_is_exact() {
        let service = test_service();
        service.create(smith(), ALICE).unwrap();

        assert!(service.get_by_first_name("John", ALICE).unwrap().is_some());
        assert_eq!(service.get_by_first_name(" John ", ALICE).unwrap(), None);
        assert_eq!(service.get_by_first_name("john", ALICE).unwrap(), None);
    }

    #[test]
    fn test_last_name_and_email_lookups_are_trimmed() {
        let service = test_service();
        let created = service.create(smith(), ALICE).unwrap();

        let by_last = service.get_by_last_name(" Smith ", ALICE).unwrap();
        assert_eq!(by_last.map(|c| c.id), Some(created.id));

        let by_email = service.get_by_email("\tjohn@example.com  ", ALICE).unwrap();
        assert_eq!(by_email.map(|c| c.id), Some(created.id));

        assert_eq!(service.get_by_last_name("smith", ALICE).unwrap(), None);
    }

    #[test]
    fn test_lookup_returns_first_of_duplicates() {
        let service = test_service();
        let first = service.create(smith(), ALICE).unwrap();
        service
            .create(fields("Jane", "Smith", "jane@example.com", date(1982, 1, 1)), ALICE)
            .unwrap();

        let found = service.get_by_last_name("Smith", ALICE).unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn test_list_applies_defaults_and_paging() {
        let service = test_service();
        let ids: Vec<_> = (0..4)
            .map(|i| {
                service
                    .create(
                        fields(&format!("C{i}"), "L", "c@example.com", date(1990, 1, 1)),
                        ALICE,
                    )
                    .unwrap()
                    .id
            })
            .collect();

        let all = service.list(None, None, ALICE).unwrap();
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), ids);

        let page = service.list(Some(2), Some(5), ALICE).unwrap();
        assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), ids[2..].to_vec());

        let limited = service.list(Some(1), Some(1), ALICE).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, ids[1]);

        assert!(service.list(Some(4), None, ALICE).unwrap().is_empty());
        assert!(service.list(None, Some(0), ALICE).unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_mutable_fields() {
        let service = test_service();
        let created = service.create(smith(), ALICE).unwrap();

        let mut replacement = fields("Johnny", "Smyth", "js@example.com", date(1981, 6, 18));
        replacement.additional_info = None;
        let updated = service
            .update(created.id, replacement.clone(), ALICE)
            .unwrap()
            .expect("update should succeed");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, ALICE);
        assert_eq!(updated.fields, replacement);
    }

    #[test]
    fn test_update_missing_or_foreign_is_not_found() {
        let service = test_service();
        let created = service.create(smith(), ALICE).unwrap();

        let foreign = service
            .update(created.id, fields("X", "Y", "z@example.com", date(2000, 1, 1)), BOB)
            .unwrap();
        assert_eq!(foreign, None);

        let missing = service
            .update(ContactId::new(9_999), smith(), ALICE)
            .unwrap();
        assert_eq!(missing, None);

        let unchanged = service.get_by_id(created.id, ALICE).unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let service = test_service();
        let created = service.create(smith(), ALICE).unwrap();

        assert_eq!(service.delete(created.id, BOB).unwrap(), None);
        assert_eq!(service.delete(created.id, ALICE).unwrap(), Some(created.clone()));
        assert_eq!(service.delete(created.id, ALICE).unwrap(), None);
    }

    #[test]
    fn test_upcoming_birthdays_across_year_end() {
        let service = service_at(date(2024, 12, 29));
        let birthday = |m, d| fields("B", "Day", "b@example.com", date(1970, m, d));

        let mut included = Vec::new();
        for (m, d) in [(12, 29), (12, 31), (1, 3), (1, 5)] {
            included.push(service.create(birthday(m, d), ALICE).unwrap().id);
        }
        for (m, d) in [(1, 6), (12, 28)] {
            service.create(birthday(m, d), ALICE).unwrap();
        }
        service.create(birthday(12, 30), BOB).unwrap();

        let found: Vec<_> = service
            .upcoming_birthdays(ALICE)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(found, included);
    }

    #[test]
    fn test_upcoming_birthdays_include_leap_day() {
        let leap_birthday = fields("Leap", "Ling", "leap@example.com", date(2000, 2, 29));

        let service = service_at(date(2024, 2, 26));
        let created = service.create(leap_birthday.clone(), ALICE).unwrap();
        let found = service.upcoming_birthdays(ALICE).unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn test_upcoming_birthdays_in_common_year_use_real_dates() {
        let service = service_at(date(2025, 2, 26));
        let leap = service
            .create(fields("Leap", "Ling", "leap@example.com", date(2000, 2, 29)), ALICE)
            .unwrap();
        let march = service
            .create(fields("Mar", "Ch", "mar@example.com", date(1999, 3, 5)), ALICE)
            .unwrap();

        let found = service.upcoming_birthdays(ALICE).unwrap();
        assert_eq!(found, vec![march]);
        assert!(!found.iter().any(|c| c.id == leap.id));
    }
}
