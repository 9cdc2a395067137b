//! Participant profile models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Profile fields supplied with an upload (multipart `userInfo` JSON).
///
/// Accepts both camelCase and snake_case keys.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, alias = "dealership_name")]
    pub dealership_name: Option<String>,
    #[serde(default, alias = "sap_code")]
    pub sap_code: Option<String>,
    #[serde(default, alias = "mobile_number")]
    pub mobile_number: Option<String>,
}

/// Normalized profile ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub sap_code: String,
    pub dealership_name: Option<String>,
    pub mobile_number: Option<String>,
}

impl UserInfo {
    /// Trim fields and drop blanks. Returns `None` when no SAP code is present,
    /// meaning the upload stays anonymous.
    pub fn into_profile(self) -> AppResult<Option<UserProfile>> {
        let Some(sap_code) = clean(self.sap_code) else {
            return Ok(None);
        };

        if sap_code.len() > 64 {
            return Err(AppError::InvalidInput(
                "sapCode must be at most 64 characters".to_string(),
            ));
        }

        let mobile_number = clean(self.mobile_number);
        if let Some(ref mobile) = mobile_number {
            let valid = mobile.len() <= 32
                && mobile
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '));
            if !valid {
                return Err(AppError::InvalidInput(format!(
                    "Invalid mobile number '{}'",
                    mobile
                )));
            }
        }

        Ok(Some(UserProfile {
            sap_code,
            dealership_name: clean(self.dealership_name),
            mobile_number,
        }))
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
