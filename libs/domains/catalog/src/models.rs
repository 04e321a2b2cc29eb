use chrono::{DateTime, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::kinds::ReferenceKind;

/// One entry of a user's reference list.
///
/// Serialized with the kind's own field name, e.g. a brand is
/// `{ "_id": ..., "brand": "Acme", "userId": ..., "createdAt": ..., "updatedAt": ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry<K: ReferenceKind> {
    pub id: Uuid,
    pub value: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    kind: PhantomData<K>,
}

impl<K: ReferenceKind> ReferenceEntry<K> {
    pub fn new(user_id: Uuid, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            value: value.into(),
            user_id,
            created_at: now,
            updated_at: now,
            kind: PhantomData,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn set_value(&mut self, value: String) {
        self.value = value;
        self.updated_at = Utc::now();
    }
}

impl<K: ReferenceKind> Serialize for ReferenceEntry<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(K::SCHEMA_NAME, 5)?;
        state.serialize_field("_id", &self.id)?;
        state.serialize_field(K::FIELD, &self.value)?;
        state.serialize_field("userId", &self.user_id)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.end()
    }
}

impl<'de, K: ReferenceKind> Deserialize<'de> for ReferenceEntry<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor<K>(PhantomData<K>);

        impl<'de, K: ReferenceKind> Visitor<'de> for EntryVisitor<K> {
            type Value = ReferenceEntry<K>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a {} entry", K::LABEL)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut id = None;
                let mut value = None;
                let mut user_id = None;
                let mut created_at = None;
                let mut updated_at = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "_id" | "id" => id = Some(map.next_value()?),
                        "userId" => user_id = Some(map.next_value()?),
                        "createdAt" => created_at = Some(map.next_value()?),
                        "updatedAt" => updated_at = Some(map.next_value()?),
                        field if field == K::FIELD => value = Some(map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }

                Ok(ReferenceEntry {
                    id: id.ok_or_else(|| de::Error::missing_field("_id"))?,
                    value: value.ok_or_else(|| de::Error::missing_field(K::FIELD))?,
                    user_id: user_id.ok_or_else(|| de::Error::missing_field("userId"))?,
                    created_at: created_at.ok_or_else(|| de::Error::missing_field("createdAt"))?,
                    updated_at: updated_at.ok_or_else(|| de::Error::missing_field("updatedAt"))?,
                    kind: PhantomData,
                })
            }
        }

        deserializer.deserialize_map(EntryVisitor(PhantomData))
    }
}

/// Create/update payload: `{ "<field>": "value" }`.
///
/// The value is optional at the wire level so the service can answer a
/// missing field with `"<Label> is required"` instead of a parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceInput<K: ReferenceKind> {
    pub value: Option<String>,
    kind: PhantomData<K>,
}

impl<K: ReferenceKind> ReferenceInput<K> {
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }

    /// The submitted value, rejecting absent or blank input.
    pub fn require_value(self) -> CatalogResult<String> {
        self.value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CatalogError::Validation(format!("{} is required", K::LABEL)))
    }
}

impl<'de, K: ReferenceKind> Deserialize<'de> for ReferenceInput<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputVisitor<K>(PhantomData<K>);

        impl<'de, K: ReferenceKind> Visitor<'de> for InputVisitor<K> {
            type Value = ReferenceInput<K>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an object with a `{}` field", K::FIELD)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut value: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == K::FIELD {
                        value = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(ReferenceInput::new(value))
            }
        }

        deserializer.deserialize_map(InputVisitor(PhantomData))
    }
}

fn string_property(format: Option<KnownFormat>) -> ObjectBuilder {
    ObjectBuilder::new()
        .schema_type(Type::String)
        .format(format.map(SchemaFormat::KnownFormat))
}

impl<K: ReferenceKind> PartialSchema for ReferenceEntry<K> {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .property("_id", string_property(Some(KnownFormat::Uuid)))
            .property(K::FIELD, string_property(None))
            .property("userId", string_property(Some(KnownFormat::Uuid)))
            .property("createdAt", string_property(Some(KnownFormat::DateTime)))
            .property("updatedAt", string_property(Some(KnownFormat::DateTime)))
            .required("_id")
            .required(K::FIELD)
            .required("userId")
            .required("createdAt")
            .required("updatedAt")
            .into()
    }
}

impl<K: ReferenceKind> ToSchema for ReferenceEntry<K> {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed(K::SCHEMA_NAME)
    }
}

impl<K: ReferenceKind> PartialSchema for ReferenceInput<K> {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .property(K::FIELD, string_property(None))
            .required(K::FIELD)
            .into()
    }
}

impl<K: ReferenceKind> ToSchema for ReferenceInput<K> {
    fn name() -> Cow<'static, str> {
        Cow::Owned(format!("{}Input", K::SCHEMA_NAME))
    }
}
