use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Multipart field that carries the uploaded file
pub const IMAGE_FIELD: &str = "imageFile";

/// Content type recorded when the client sends none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A stored image with its raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub id: Uuid,
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductImage {
    pub fn new(user_id: Uuid, upload: NewImage) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            file_name: upload.file_name,
            data: upload.data,
            content_type: upload.content_type,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// File taken from the `imageFile` multipart field, stored verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Image as returned to clients, with `data` base64-encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub file_name: String,
    /// Base64 (standard alphabet, padded)
    pub data: String,
    pub content_type: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductImage> for ImageResponse {
    fn from(image: ProductImage) -> Self {
        Self {
            id: image.id,
            file_name: image.file_name,
            data: BASE64.encode(&image.data),
            content_type: image.content_type,
            user_id: image.user_id,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

/// OpenAPI shape of the upload form
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageForm {
    #[schema(rename = "imageFile", value_type = String, format = Binary)]
    pub image_file: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_encodes_bytes_as_base64() {
        let image = ProductImage::new(
            Uuid::now_v7(),
            NewImage {
                file_name: "logo.png".to_string(),
                content_type: "image/png".to_string(),
                data: vec![0x89, b'P', b'N', b'G'],
            },
        );
        let response = ImageResponse::from(image.clone());
        assert_eq!(response.data, "iVBORw==");
        assert_eq!(response.file_name, "logo.png");
        assert_eq!(BASE64.decode(&response.data).unwrap(), image.data);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("_id").is_some());
        assert_eq!(value["contentType"], "image/png");
    }
}
