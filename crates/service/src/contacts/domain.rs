use models::contact::ContactFields;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::ContactError;

pub use models::contact::Model as Contact;

/// Parse a contact id from the wire; anything but a UUID is a bad request.
pub fn parse_contact_id(raw: &str) -> Result<Uuid, ContactError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ContactError::BadRequest("invalid contact id".into()))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ContactError> {
    body.as_object()
        .ok_or_else(|| ContactError::BadRequest("request body must be a JSON object".into()))
}

/// `Some(string)` when present, `None` when absent, error for any other type
/// (including `null`).
fn optional_string(obj: &Map<String, Value>, field: &str) -> Result<Option<String>, ContactError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ContactError::BadRequest(format!("{field} must be a string"))),
    }
}

fn required_string(obj: &Map<String, Value>, field: &str) -> Result<String, ContactError> {
    match optional_string(obj, field)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ContactError::BadRequest(format!("{field} is required"))),
    }
}

/// Fields for a new contact taken from a create request body.
pub fn new_contact_from_json(body: &Value) -> Result<ContactFields, ContactError> {
    let obj = as_object(body)?;
    Ok(ContactFields {
        nombre: required_string(obj, "nombre")?,
        apellido: required_string(obj, "apellido")?,
        telefono: required_string(obj, "telefono")?,
        email: optional_string(obj, "email")?,
    })
}

/// A partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub id: Uuid,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
}

/// The target id of an update body, checked before anything else in it.
pub fn patch_id(body: &Value) -> Result<Uuid, ContactError> {
    match as_object(body)?.get("id") {
        Some(Value::String(s)) => parse_contact_id(s),
        Some(_) => Err(ContactError::BadRequest("id must be a string".into())),
        None => Err(ContactError::BadRequest("id is required".into())),
    }
}

impl ContactPatch {
    pub fn from_json(body: &Value) -> Result<Self, ContactError> {
        let id = patch_id(body)?;
        let obj = as_object(body)?;
        Ok(Self {
            id,
            nombre: optional_string(obj, "nombre")?,
            apellido: optional_string(obj, "apellido")?,
            telefono: optional_string(obj, "telefono")?,
            email: optional_string(obj, "email")?,
        })
    }

    /// Overlay the patch on the stored fields. An empty `email` clears it
    /// once the result is validated.
    pub fn apply(&self, current: &ContactFields) -> ContactFields {
        ContactFields {
            nombre: self.nombre.clone().unwrap_or_else(|| current.nombre.clone()),
            apellido: self.apellido.clone().unwrap_or_else(|| current.apellido.clone()),
            telefono: self.telefono.clone().unwrap_or_else(|| current.telefono.clone()),
            email: match &self.email {
                Some(e) => Some(e.clone()),
                None => current.email.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_requires_strings() {
        let ok = new_contact_from_json(&json!({"nombre": "X", "apellido": "Y", "telefono": "123"})).unwrap();
        assert_eq!(ok.email, None);

        let missing = new_contact_from_json(&json!({"nombre": "X", "apellido": "Y"})).unwrap_err();
        assert_eq!(missing.to_string(), "telefono is required");

        let empty = new_contact_from_json(&json!({"nombre": "", "apellido": "Y", "telefono": "1"})).unwrap_err();
        assert_eq!(empty.to_string(), "nombre is required");

        let number = new_contact_from_json(&json!({"nombre": "X", "apellido": "Y", "telefono": 123})).unwrap_err();
        assert_eq!(number.to_string(), "telefono must be a string");
    }

    #[test]
    fn null_email_is_not_a_string() {
        let body = json!({"nombre": "X", "apellido": "Y", "telefono": "1", "email": null});
        assert!(matches!(new_contact_from_json(&body), Err(ContactError::BadRequest(_))));
    }

    #[test]
    fn non_object_body_rejected() {
        assert!(new_contact_from_json(&json!([1, 2])).is_err());
        assert!(ContactPatch::from_json(&json!("x")).is_err());
    }

    #[test]
    fn patch_id_rules() {
        assert_eq!(ContactPatch::from_json(&json!({})).unwrap_err().to_string(), "id is required");
        assert_eq!(ContactPatch::from_json(&json!({"id": 7})).unwrap_err().to_string(), "id must be a string");
        assert_eq!(ContactPatch::from_json(&json!({"id": "abc"})).unwrap_err().to_string(), "invalid contact id");

        // the id alone is read; other fields are not looked at yet
        let id = Uuid::new_v4();
        assert_eq!(patch_id(&json!({"id": id.to_string(), "nombre": 5})).unwrap(), id);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let id = Uuid::new_v4();
        let patch = ContactPatch::from_json(&json!({"id": id.to_string(), "telefono": "999"})).unwrap();
        let current = ContactFields {
            nombre: "A".into(),
            apellido: "B".into(),
            telefono: "111".into(),
            email: Some("a@b.co".into()),
        };
        let merged = patch.apply(&current);
        assert_eq!(merged.telefono, "999");
        assert_eq!(merged.nombre, "A");
        assert_eq!(merged.email.as_deref(), Some("a@b.co"));

        let clear = ContactPatch { id, email: Some(String::new()), ..Default::default() };
        assert_eq!(clear.apply(&current).email.as_deref(), Some(""));
    }

    #[test]
    fn patch_field_types_checked() {
        let body = json!({"id": Uuid::new_v4().to_string(), "nombre": false});
        assert_eq!(ContactPatch::from_json(&body).unwrap_err().to_string(), "nombre must be a string");
    }
}
