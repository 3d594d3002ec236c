//! Multipart form parsing shared by the submission endpoints.

use axum::body::Bytes;
use axum::extract::Multipart;
use std::collections::HashMap;

use crate::error::ApiError;

pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Bytes,
}

/// A fully-read multipart form: text fields by name, plus at most one file.
/// Browsers send an empty filename for an unset file input; those are
/// treated as absent.
pub struct FormData {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl FormData {
    pub async fn parse(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();
        let mut file = None;

        while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);

            match file_name {
                Some(original_name) => {
                    let bytes = field.bytes().await.map_err(invalid_multipart)?;
                    if !original_name.is_empty() && !bytes.is_empty() {
                        file = Some(UploadedFile {
                            original_name,
                            bytes,
                        });
                    }
                }
                None => {
                    let text = field.text().await.map_err(invalid_multipart)?;
                    fields.insert(name, text);
                }
            }
        }

        Ok(Self { fields, file })
    }

    /// A trimmed, non-empty text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::bad_request(format!("{} is required", name)))
    }

    /// Positive integer field
    pub fn require_quantity(&self, name: &str) -> Result<i32, ApiError> {
        let quantity: i32 = self
            .require(name)?
            .parse()
            .map_err(|_| ApiError::bad_request(format!("{} must be a positive number", name)))?;
        if quantity <= 0 {
            return Err(ApiError::bad_request(format!(
                "{} must be a positive number",
                name
            )));
        }
        Ok(quantity)
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }
}

fn invalid_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid multipart payload: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }

    #[test]
    fn text_trims_and_drops_empty_values() {
        let data = form(&[("name", "  Paracetamol "), ("blank", "   ")]);
        assert_eq!(data.text("name"), Some("Paracetamol"));
        assert_eq!(data.text("blank"), None);
        assert_eq!(data.text("missing"), None);
    }

    #[test]
    fn require_reports_the_field_name() {
        let data = form(&[]);
        let err = data.require("medicine_name").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("medicine_name"));
    }

    #[test]
    fn quantity_must_be_a_positive_integer() {
        assert_eq!(form(&[("quantity", "10")]).require_quantity("quantity").ok(), Some(10));
        assert!(form(&[("quantity", "0")]).require_quantity("quantity").is_err());
        assert!(form(&[("quantity", "-3")]).require_quantity("quantity").is_err());
        assert!(form(&[("quantity", "ten")]).require_quantity("quantity").is_err());
    }
}
