//! Address-book entries. Every query here is scoped by `(id, user_id)` or by
//! `user_id` alone; there is deliberately no unscoped lookup.

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{map_db_err, ModelError, ValidationErrors};
use crate::user;

pub const NOMBRE_MAX: usize = 100;
pub const APELLIDO_MAX: usize = 100;
pub const TELEFONO_MAX: usize = 15;
pub const EMAIL_MAX: usize = 200;

const COLUMNS: &[&str] = &["nombre", "apellido", "telefono", "email"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// The user-editable part of a contact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub email: Option<String>,
}

impl From<&Model> for ContactFields {
    fn from(m: &Model) -> Self {
        Self {
            nombre: m.nombre.clone(),
            apellido: m.apellido.clone(),
            telefono: m.telefono.clone(),
            email: m.email.clone(),
        }
    }
}

/// Trim every field and check required/length/format rules.
///
/// Returns the normalised fields, or every failing field in declaration order.
/// A blank email normalises to `None`.
pub fn validate(fields: ContactFields) -> Result<ContactFields, ValidationErrors> {
    let mut errs = ValidationErrors::new();
    let nombre = fields.nombre.trim().to_string();
    let apellido = fields.apellido.trim().to_string();
    let telefono = fields.telefono.trim().to_string();
    let email = fields
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    check_required(&mut errs, "nombre", &nombre, NOMBRE_MAX);
    check_required(&mut errs, "apellido", &apellido, APELLIDO_MAX);
    check_required(&mut errs, "telefono", &telefono, TELEFONO_MAX);
    if let Some(e) = &email {
        if e.chars().count() > EMAIL_MAX {
            errs.push("email", format!("email cannot exceed {EMAIL_MAX} characters"));
        } else if !looks_like_email(e) {
            errs.push("email", "email is not a valid address");
        }
    }

    errs.into_result(ContactFields { nombre, apellido, telefono, email })
}

fn check_required(errs: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.is_empty() {
        errs.push(field, format!("{field} is required"));
    } else if value.chars().count() > max {
        errs.push(field, format!("{field} cannot exceed {max} characters"));
    }
}

/// `\S+@\S+\.\S+`: no whitespace, something before an `@`, and a dot with
/// at least one character on each side somewhere after it.
pub fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    // earliest '@' that has something before it leaves the most room after it
    let Some((at, _)) = s.char_indices().skip(1).find(|(_, c)| *c == '@') else {
        return false;
    };
    let rest = &s[at + 1..];
    rest.char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < rest.len())
}

pub async fn list_owned<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_owned<C: ConnectionTrait>(db: &C, id: Uuid, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid, fields: ContactFields) -> Result<Model, ModelError> {
    let fields = validate(fields)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        nombre: Set(fields.nombre),
        apellido: Set(fields.apellido),
        telefono: Set(fields.telefono),
        email: Set(fields.email),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| map_db_err(e, COLUMNS))
}

/// Overwrite the editable fields of an owned contact. `Ok(None)` when no row
/// matched `(id, user_id)`.
pub async fn update_owned<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    user_id: Uuid,
    fields: ContactFields,
) -> Result<Option<Model>, ModelError> {
    let fields = validate(fields)?;
    let am = ActiveModel {
        nombre: Set(fields.nombre),
        apellido: Set(fields.apellido),
        telefono: Set(fields.telefono),
        email: Set(fields.email),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    let res = Entity::update_many()
        .set(am)
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| map_db_err(e, COLUMNS))?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    find_owned(db, id, user_id).await
}

/// `true` when a row matching `(id, user_id)` was removed.
pub async fn delete_owned<C: ConnectionTrait>(db: &C, id: Uuid, user_id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
