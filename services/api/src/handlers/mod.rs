pub mod auth;
pub mod case;
pub mod sighting;
pub mod user;

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use chrono::{DateTime, Utc};

use safereturn_auth_types::identity::Identity;
use safereturn_domain::user::UserRole;

use crate::error::ApiServiceError;

/// Admin capability check. Handlers call this before reaching for any
/// admin-only usecase; role comes from the validated token.
pub(crate) fn require_admin(identity: &Identity) -> Result<(), ApiServiceError> {
    match UserRole::from_u8(identity.user_role) {
        Some(role) if role.is_admin() => Ok(()),
        _ => Err(ApiServiceError::Forbidden),
    }
}

/// Text fields plus at most one file field, pulled out of a multipart body.
pub(crate) struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<(String, Vec<u8>)>,
}

/// Drain a multipart body. The field named `file_field` is read as bytes
/// (with its original file name); everything else is read as text.
pub(crate) async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<MultipartForm, ApiServiceError> {
    let mut fields = HashMap::new();
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiServiceError::MissingData)?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == file_field {
            let file_name = field
                .file_name()
                .map(str::to_owned)
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiServiceError::MissingData)?;
            file = Some((file_name, bytes.to_vec()));
        } else {
            let text = field
                .text()
                .await
                .map_err(|_| ApiServiceError::MissingData)?;
            fields.insert(name, text);
        }
    }
    Ok(MultipartForm { fields, file })
}

impl MultipartForm {
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
    }

    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, ApiServiceError> {
        self.text(key)
            .map(|s| s.parse::<T>().map_err(|_| ApiServiceError::MissingData))
            .transpose()
    }

    pub fn datetime(&self, key: &str) -> Result<Option<DateTime<Utc>>, ApiServiceError> {
        self.text(key)
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| ApiServiceError::MissingData)
            })
            .transpose()
    }
}
