use models::contact::{self, ContactFields};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::contacts::domain::Contact;
use crate::contacts::errors::ContactError;
use crate::contacts::repository::ContactRepository;

pub struct SeaOrmContactRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn list(&self, owner: Uuid) -> Result<Vec<Contact>, ContactError> {
        Ok(contact::list_owned(&self.db, owner).await?)
    }

    async fn find(&self, id: Uuid, owner: Uuid) -> Result<Option<Contact>, ContactError> {
        Ok(contact::find_owned(&self.db, id, owner).await?)
    }

    async fn insert(&self, owner: Uuid, fields: ContactFields) -> Result<Contact, ContactError> {
        Ok(contact::create(&self.db, owner, fields).await?)
    }

    async fn update(&self, id: Uuid, owner: Uuid, fields: ContactFields) -> Result<Option<Contact>, ContactError> {
        Ok(contact::update_owned(&self.db, id, owner, fields).await?)
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, ContactError> {
        Ok(contact::delete_owned(&self.db, id, owner).await?)
    }
}
