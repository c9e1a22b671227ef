use std::sync::Arc;

use common::metrics::record_contact_op;
use models::contact::{self, ContactFields};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{patch_id, Contact, ContactPatch};
use super::errors::ContactError;
use super::repository::ContactRepository;

/// Contact business service. `owner` is always the authenticated user.
pub struct ContactService<R: ContactRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ContactRepository + ?Sized> ContactService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Contact>, ContactError> {
        let res = self.repo.list(owner).await;
        record_contact_op("list", res.is_ok());
        res
    }

    #[instrument(skip(self))]
    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Contact, ContactError> {
        let res = self.repo.find(id, owner).await.and_then(|c| c.ok_or(ContactError::NotFound(id)));
        record_contact_op("get", res.is_ok());
        res
    }

    /// Validate and store a contact owned by `owner`.
    ///
    /// # Examples
    /// ```
    /// use service::contacts::{ContactService, repository::mock::MockContactRepository};
    /// use models::contact::ContactFields;
    /// use std::sync::Arc;
    /// let svc = ContactService::new(Arc::new(MockContactRepository::default()));
    /// let owner = uuid::Uuid::new_v4();
    /// let fields = ContactFields { nombre: " X ".into(), apellido: "Y".into(), telefono: "123".into(), email: None };
    /// let c = tokio_test::block_on(svc.create(owner, fields)).unwrap();
    /// assert_eq!(c.nombre, "X");
    /// assert_eq!(c.user_id, owner);
    /// ```
    #[instrument(skip(self, fields))]
    pub async fn create(&self, owner: Uuid, fields: ContactFields) -> Result<Contact, ContactError> {
        let res = match contact::validate(fields) {
            Ok(fields) => self.repo.insert(owner, fields).await,
            Err(errs) => Err(errs.into()),
        };
        record_contact_op("create", res.is_ok());
        let created = res?;
        info!(contact_id = %created.id, "contact_created");
        Ok(created)
    }

    /// Update from a raw request body and persist the merged record. The id
    /// is resolved against the caller's contacts before the remaining fields
    /// are type checked, so a foreign or unknown id is `NotFound` whatever
    /// else the body holds. When the merged record equals the stored one
    /// nothing is written.
    #[instrument(skip(self, body))]
    pub async fn update(&self, owner: Uuid, body: &Value) -> Result<Contact, ContactError> {
        let res = self.apply(owner, body).await;
        record_contact_op("update", res.is_ok());
        res
    }

    async fn apply(&self, owner: Uuid, body: &Value) -> Result<Contact, ContactError> {
        let id = patch_id(body)?;
        let current = self.owned(owner, id).await?;
        let patch = ContactPatch::from_json(body)?;
        self.merge_into(owner, current, &patch).await
    }

    async fn owned(&self, owner: Uuid, id: Uuid) -> Result<Contact, ContactError> {
        self.repo.find(id, owner).await?.ok_or(ContactError::NotFound(id))
    }

    async fn merge_into(&self, owner: Uuid, current: Contact, patch: &ContactPatch) -> Result<Contact, ContactError> {
        let id = current.id;
        let stored = ContactFields::from(&current);
        let merged = contact::validate(patch.apply(&stored))?;
        if merged == stored {
            debug!("update is a no-op");
            return Ok(current);
        }
        self.repo.update(id, owner, merged).await?.ok_or(ContactError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ContactError> {
        let res = match self.repo.delete(id, owner).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ContactError::NotFound(id)),
            Err(e) => Err(e),
        };
        record_contact_op("delete", res.is_ok());
        res?;
        info!(contact_id = %id, "contact_deleted");
        Ok(())
    }
}
