//! Contact database operations
//!
//! Find-or-create support for contacts plus the assignment join table.

use anyhow::Result;
use rackmap_common::db::models::{Contact, ContactPriority, Site};
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

/// Lookup key derived from a site's legacy contact fields.
///
/// Optional fields participate in the lookup only when non-empty after
/// trimming. Unspecified fields are not constrained: a stored contact with
/// extra populated fields can still match a key that omits them. Tightening
/// the lookup to full-record equality would change deduplication behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactKey {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactKey {
    /// Derive the key from a site's legacy fields, trimming whitespace
    pub fn from_site(site: &Site) -> Self {
        let name = site.contact_name.trim().to_string();
        let phone = site.contact_phone.trim();
        let email = site.contact_email.trim();

        Self {
            name,
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
        }
    }

    /// Ordered (column, value) pairs participating in the lookup
    fn criteria(&self) -> Vec<(&'static str, &str)> {
        let mut criteria = vec![("name", self.name.as_str())];
        if let Some(phone) = &self.phone {
            criteria.push(("phone", phone.as_str()));
        }
        if let Some(email) = &self.email {
            criteria.push(("email", email.as_str()));
        }
        criteria
    }

    /// Build a new contact record from this key
    pub fn to_contact(&self) -> Contact {
        Contact {
            guid: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
        }
    }
}

/// Load a contact matching the key's specified fields, if any exists
pub async fn load_contact_by_key(
    conn: &mut SqliteConnection,
    key: &ContactKey,
) -> Result<Option<Contact>> {
    let criteria = key.criteria();
    let clauses: Vec<String> = criteria.iter().map(|(col, _)| format!("{} = ?", col)).collect();
    let sql = format!(
        "SELECT guid, name, phone, email FROM contacts WHERE {} LIMIT 1",
        clauses.join(" AND ")
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in &criteria {
        query = query.bind(*value);
    }

    let row = query.fetch_optional(&mut *conn).await?;

    Ok(row.map(|row| Contact {
        guid: row.get("guid"),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
    }))
}

/// Save a contact to the database
pub async fn save_contact(conn: &mut SqliteConnection, contact: &Contact) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO contacts (guid, name, phone, email, created_at, updated_at)
        VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(&contact.guid)
    .bind(&contact.name)
    .bind(&contact.phone)
    .bind(&contact.email)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Check whether any assignment already links this site to this contact
pub async fn assignment_exists(
    conn: &mut SqliteConnection,
    site_id: &str,
    contact_id: &str,
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        SELECT 1 FROM contact_assignments
        WHERE object_type = 'site' AND object_id = ? AND contact_id = ?
        LIMIT 1
        "#,
    )
    .bind(site_id)
    .bind(contact_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.is_some())
}

/// Assign a contact to a site with the given role and priority
pub async fn save_assignment(
    conn: &mut SqliteConnection,
    site_id: &str,
    contact_id: &str,
    role_id: &str,
    priority: Option<ContactPriority>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_assignments (
            guid, object_type, object_id, contact_id, role_id, priority,
            created_at, updated_at
        ) VALUES (?, 'site', ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(site_id)
    .bind(contact_id)
    .bind(role_id)
    .bind(priority.map(|p| p.as_str()))
    .execute(&mut *conn)
    .await?;

    Ok(())
}
