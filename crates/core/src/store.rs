//! Contact persistence.
//!
//! [`ContactStore`] is the seam between the contact service and storage. Every method takes the
//! owner explicitly and only ever sees rows whose `owner_id` matches it, so a contact owned by
//! someone else looks exactly like one that does not exist.
//!
//! Natural order is ascending `id`, i.e. insertion order.

use crate::config::DatabaseLocation;
use crate::contact::{Contact, ContactFields};
use crate::db::open_connection;
use crate::{ContactError, ContactResult};
use contacts_types::{ContactId, MonthDay, OwnerId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

const CONTACT_COLUMNS: &str =
    "id, owner_id, first_name, last_name, email, phone, birthday, additional_info";

/// Exact-match lookup on a single text column.
///
/// Values are compared as given; any normalisation is the caller's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactLookup<'a> {
    FirstName(&'a str),
    LastName(&'a str),
    Email(&'a str),
}

impl<'a> ContactLookup<'a> {
    fn column(&self) -> &'static str {
        match self {
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
            Self::Email(_) => "email",
        }
    }

    fn value(&self) -> &'a str {
        match self {
            Self::FirstName(v) | Self::LastName(v) | Self::Email(v) => v,
        }
    }
}

/// Offset/limit window over an owner's contacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

/// Owner-scoped persistence primitives for contacts.
pub trait ContactStore: Send + Sync {
    /// Persists a new contact and returns it with its assigned id.
    fn insert(&self, owner: OwnerId, fields: &ContactFields) -> ContactResult<Contact>;

    fn get(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>>;

    /// First contact in natural order whose column equals the lookup value.
    fn find_first(
        &self,
        lookup: ContactLookup<'_>,
        owner: OwnerId,
    ) -> ContactResult<Option<Contact>>;

    fn list(&self, page: Page, owner: OwnerId) -> ContactResult<Vec<Contact>>;

    /// Contacts whose birthday month-day is one of `month_days`. Birth years never match.
    fn list_by_birthday(
        &self,
        month_days: &[MonthDay],
        owner: OwnerId,
    ) -> ContactResult<Vec<Contact>>;

    /// Replaces every mutable field. `None` means nothing was changed.
    fn update(
        &self,
        id: ContactId,
        fields: &ContactFields,
        owner: OwnerId,
    ) -> ContactResult<Option<Contact>>;

    /// Removes the contact and returns what was removed.
    fn delete(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>>;
}

/// SQLite-backed contact store.
///
/// The connection sits behind a mutex so the store can be shared across request handlers.
pub struct SqliteContactStore {
    conn: Mutex<Connection>,
}

impl SqliteContactStore {
    /// Opens (and migrates) the database at `location`.
    pub fn open(location: &DatabaseLocation) -> ContactResult<Self> {
        Ok(Self::from_connection(open_connection(location)?))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> ContactResult<Self> {
        Self::open(&DatabaseLocation::InMemory)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> ContactResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ContactError::LockPoisoned)
    }
}

impl ContactStore for SqliteContactStore {
    fn insert(&self, owner: OwnerId, fields: &ContactFields) -> ContactResult<Contact> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO contacts
                (owner_id, first_name, last_name, email, phone, birthday, additional_info)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                owner.get(),
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.birthday,
                fields.additional_info,
            ],
        )?;

        Ok(Contact {
            id: ContactId::new(conn.last_insert_rowid()),
            owner_id: owner,
            fields: fields.clone(),
        })
    }

    fn get(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let conn = self.conn()?;
        select_owned(&conn, id, owner)
    }

    fn find_first(
        &self,
        lookup: ContactLookup<'_>,
        owner: OwnerId,
    ) -> ContactResult<Option<Contact>> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS}
             FROM contacts
             WHERE {} = ?1
               AND owner_id = ?2
             ORDER BY id ASC
             LIMIT 1;",
            lookup.column()
        );

        let conn = self.conn()?;
        let contact = conn
            .query_row(&sql, params![lookup.value(), owner.get()], contact_from_row)
            .optional()?;
        Ok(contact)
    }

    fn list(&self, page: Page, owner: OwnerId) -> ContactResult<Vec<Contact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS}
             FROM contacts
             WHERE owner_id = ?1
             ORDER BY id ASC
             LIMIT ?2 OFFSET ?3;"
        ))?;

        let rows = stmt.query_map(
            params![owner.get(), i64::from(page.limit), i64::from(page.offset)],
            contact_from_row,
        )?;
        let contacts = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn list_by_birthday(
        &self,
        month_days: &[MonthDay],
        owner: OwnerId,
    ) -> ContactResult<Vec<Contact>> {
        if month_days.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (0..month_days.len())
            .map(|i| format!("?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        // Birthdays are stored as `[+-]YYYY..-MM-DD`; the last five characters are always the
        // month-day, whatever the width or sign of the year.
        let sql = format!(
            "SELECT {CONTACT_COLUMNS}
             FROM contacts
             WHERE owner_id = ?1
               AND substr(birthday, -5) IN ({placeholders})
             ORDER BY id ASC;"
        );

        let mut bind_values = Vec::with_capacity(month_days.len() + 1);
        bind_values.push(Value::Integer(owner.get()));
        bind_values.extend(month_days.iter().map(|md| Value::Text(md.to_string())));

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind_values), contact_from_row)?;
        let contacts = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn update(
        &self,
        id: ContactId,
        fields: &ContactFields,
        owner: OwnerId,
    ) -> ContactResult<Option<Contact>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE contacts
             SET
                first_name = ?3,
                last_name = ?4,
                email = ?5,
                phone = ?6,
                birthday = ?7,
                additional_info = ?8
             WHERE id = ?1
               AND owner_id = ?2;",
            params![
                id.get(),
                owner.get(),
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.birthday,
                fields.additional_info,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let updated = select_owned(&tx, id, owner)?;
        tx.commit()?;
        Ok(updated)
    }

    fn delete(&self, id: ContactId, owner: OwnerId) -> ContactResult<Option<Contact>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let Some(contact) = select_owned(&tx, id, owner)? else {
            return Ok(None);
        };
        tx.execute(
            "DELETE FROM contacts WHERE id = ?1 AND owner_id = ?2;",
            params![id.get(), owner.get()],
        )?;
        tx.commit()?;

        Ok(Some(contact))
    }
}

fn select_owned(
    conn: &Connection,
    id: ContactId,
    owner: OwnerId,
) -> ContactResult<Option<Contact>> {
    let contact = conn
        .query_row(
            &format!(
                "SELECT {CONTACT_COLUMNS}
                 FROM contacts
                 WHERE id = ?1
                   AND owner_id = ?2;"
            ),
            params![id.get(), owner.get()],
            contact_from_row,
        )
        .optional()?;
    Ok(contact)
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: ContactId::new(row.get("id")?),
        owner_id: OwnerId::new(row.get("owner_id")?),
        fields: ContactFields {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            birthday: row.get("birthday")?,
            additional_info: row.get("additional_info")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const ALICE: OwnerId = OwnerId::new(1);
    const BOB: OwnerId = OwnerId::new(2);

    fn fields(first: &str, last: &str, birthday: (i32, u32, u32)) -> ContactFields {
        ContactFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "+44 20 7946 0000".to_string(),
            birthday: NaiveDate::from_ymd_opt(birthday.0, birthday.1, birthday.2).unwrap(),
            additional_info: None,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids_across_owners() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let a = store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap();
        let b = store.insert(BOB, &fields("Ben", "Ray", (1990, 1, 1))).unwrap();

        assert!(b.id > a.id, "ids should be unique across owners");
        assert_eq!(a.owner_id, ALICE);
        assert_eq!(b.owner_id, BOB);
    }

    #[test]
    fn get_is_scoped_to_owner() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let created = store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap();

        assert_eq!(store.get(created.id, ALICE).unwrap(), Some(created.clone()));
        assert_eq!(store.get(created.id, BOB).unwrap(), None);
    }

    #[test]
    fn find_first_returns_earliest_match() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let first = store.insert(ALICE, &fields("Sam", "One", (1990, 1, 1))).unwrap();
        store.insert(ALICE, &fields("Sam", "Two", (1990, 1, 1))).unwrap();

        let found = store
            .find_first(ContactLookup::FirstName("Sam"), ALICE)
            .unwrap()
            .expect("should find Sam");
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn find_first_compares_values_verbatim() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        store.insert(ALICE, &fields("Sam", "Smith", (1990, 1, 1))).unwrap();

        assert!(store
            .find_first(ContactLookup::LastName(" Smith "), ALICE)
            .unwrap()
            .is_none());
        assert!(store
            .find_first(ContactLookup::Email("sam@example.com"), ALICE)
            .unwrap()
            .is_some());
    }

    #[test]
    fn list_pages_in_insertion_order() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let ids: Vec<_> = (0..5)
            .map(|i| {
                store
                    .insert(ALICE, &fields(&format!("P{i}"), "X", (1990, 1, 1)))
                    .unwrap()
                    .id
            })
            .collect();
        store.insert(BOB, &fields("Other", "X", (1990, 1, 1))).unwrap();

        let page = store.list(Page { offset: 1, limit: 2 }, ALICE).unwrap();
        assert_eq!(
            page.iter().map(|c| c.id).collect::<Vec<_>>(),
            ids[1..3].to_vec()
        );

        let past_end = store.list(Page { offset: 10, limit: 2 }, ALICE).unwrap();
        assert!(past_end.is_empty());
    }

    #[test]
    fn birthday_filter_ignores_year_digits() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        // 1229-03-15: the year reads like "12-29" but the month-day is 03-15.
        store.insert(ALICE, &fields("Old", "Timer", (1229, 3, 15))).unwrap();
        let hit = store.insert(ALICE, &fields("Eve", "Hit", (1985, 12, 29))).unwrap();

        let md: MonthDay = "12-29".parse().unwrap();
        let found = store.list_by_birthday(&[md], ALICE).unwrap();
        assert_eq!(found, vec![hit]);
    }

    #[test]
    fn birthday_filter_matches_years_outside_four_digits() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let far_future = store.insert(ALICE, &fields("Far", "Future", (10000, 12, 30))).unwrap();
        let year_zero = store.insert(ALICE, &fields("Year", "Zero", (0, 12, 30))).unwrap();
        let before_zero = store.insert(ALICE, &fields("Before", "Zero", (-1, 12, 30))).unwrap();
        store.insert(ALICE, &fields("Far", "Miss", (10000, 12, 31))).unwrap();

        let md: MonthDay = "12-30".parse().unwrap();
        let found = store.list_by_birthday(&[md], ALICE).unwrap();
        assert_eq!(found, vec![far_future.clone(), year_zero, before_zero]);
        assert_eq!(store.get(far_future.id, ALICE).unwrap(), Some(far_future));
    }

    #[test]
    fn birthday_filter_with_no_days_is_empty() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        store.insert(ALICE, &fields("Eve", "Hit", (1985, 12, 29))).unwrap();
        assert!(store.list_by_birthday(&[], ALICE).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let created = store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap();

        let mut replacement = fields("Anne", "Leigh", (1991, 2, 3));
        replacement.additional_info = Some("met at work".to_string());
        let updated = store
            .update(created.id, &replacement, ALICE)
            .unwrap()
            .expect("update should find the contact");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, ALICE);
        assert_eq!(updated.fields, replacement);
        assert_eq!(store.get(created.id, ALICE).unwrap(), Some(updated));
    }

    #[test]
    fn update_of_foreign_contact_changes_nothing() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let created = store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap();

        let result = store
            .update(created.id, &fields("Mallory", "X", (2000, 1, 1)), BOB)
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(store.get(created.id, ALICE).unwrap(), Some(created));
    }

    #[test]
    fn delete_returns_removed_contact_once() {
        let store = SqliteContactStore::open_in_memory().unwrap();
        let created = store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap();

        assert_eq!(store.delete(created.id, BOB).unwrap(), None);
        assert_eq!(store.delete(created.id, ALICE).unwrap(), Some(created.clone()));
        assert_eq!(store.delete(created.id, ALICE).unwrap(), None);
        assert_eq!(store.get(created.id, ALICE).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let location = DatabaseLocation::File(temp_dir.path().join("contacts.db"));

        let created = {
            let store = SqliteContactStore::open(&location).unwrap();
            store.insert(ALICE, &fields("Ann", "Lee", (1990, 1, 1))).unwrap()
        };

        let reopened = SqliteContactStore::open(&location).unwrap();
        assert_eq!(reopened.get(created.id, ALICE).unwrap(), Some(created));
    }
}
