use async_trait::async_trait;
use models::contact::ContactFields;
use uuid::Uuid;

use super::domain::Contact;
use super::errors::ContactError;

/// Persistence for contacts. Fields arrive already validated.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, owner: Uuid) -> Result<Vec<Contact>, ContactError>;
    async fn find(&self, id: Uuid, owner: Uuid) -> Result<Option<Contact>, ContactError>;
    async fn insert(&self, owner: Uuid, fields: ContactFields) -> Result<Contact, ContactError>;
    /// `None` when no contact matches `(id, owner)`.
    async fn update(&self, id: Uuid, owner: Uuid, fields: ContactFields) -> Result<Option<Contact>, ContactError>;
    /// `false` when no contact matches `(id, owner)`.
    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, ContactError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockContactRepository {
        // insertion order doubles as creation order
        rows: Mutex<Vec<Contact>>,
    }

    impl MockContactRepository {
        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }
    }

    #[async_trait]
    impl ContactRepository for MockContactRepository {
        async fn list(&self, owner: Uuid) -> Result<Vec<Contact>, ContactError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().rev().filter(|c| c.user_id == owner).cloned().collect())
        }

        async fn find(&self, id: Uuid, owner: Uuid) -> Result<Option<Contact>, ContactError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().find(|c| c.id == id && c.user_id == owner).cloned())
        }

        async fn insert(&self, owner: Uuid, fields: ContactFields) -> Result<Contact, ContactError> {
            let now = Utc::now().into();
            let contact = Contact {
                id: Uuid::new_v4(),
                user_id: owner,
                nombre: fields.nombre,
                apellido: fields.apellido,
                telefono: fields.telefono,
                email: fields.email,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().await.push(contact.clone());
            Ok(contact)
        }

        async fn update(&self, id: Uuid, owner: Uuid, fields: ContactFields) -> Result<Option<Contact>, ContactError> {
            let mut rows = self.rows.lock().await;
            let Some(row) = rows.iter_mut().find(|c| c.id == id && c.user_id == owner) else {
                return Ok(None);
            };
            row.nombre = fields.nombre;
            row.apellido = fields.apellido;
            row.telefono = fields.telefono;
            row.email = fields.email;
            row.updated_at = Utc::now().into();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, ContactError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|c| !(c.id == id && c.user_id == owner));
            Ok(rows.len() < before)
        }
    }
}
