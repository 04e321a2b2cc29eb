use mongodb::bson::{Binary, Bson, Document, doc, spec::BinarySubtype};
use uuid::Uuid;

/// The BSON value a `Uuid` field is stored as.
///
/// Documents written through a `Collection<T>` go through the raw serializer,
/// which encodes `Uuid` as generic binary. `bson::to_bson` would produce a
/// string instead and never match, so query filters must use this.
pub fn uuid_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

/// `{ "_id": <id> }`
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_bson(id) }
}

/// `{ "userId": <user_id> }`
pub fn owner_filter(user_id: Uuid) -> Document {
    doc! { "userId": uuid_bson(user_id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_raw_document_buf;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Owned {
        #[serde(rename = "_id")]
        id: Uuid,
        user_id: Uuid,
    }

    #[test]
    fn test_filters_match_stored_encoding() {
        let entity = Owned {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
        };
        let stored = to_raw_document_buf(&entity)
            .unwrap()
            .to_document()
            .unwrap();

        assert_eq!(stored.get("_id"), id_filter(entity.id).get("_id"));
        assert_eq!(stored.get("userId"), owner_filter(entity.user_id).get("userId"));
    }

    #[test]
    fn test_string_encoding_would_not_match() {
        let id = Uuid::now_v7();
        assert_ne!(uuid_bson(id), Bson::String(id.to_string()));
    }
}
