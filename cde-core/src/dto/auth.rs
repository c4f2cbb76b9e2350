//! Token gateway DTOs

use serde::{Deserialize, Serialize};

/// Response of the gateway token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
