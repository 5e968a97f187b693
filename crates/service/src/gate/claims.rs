use serde::{Deserialize, Serialize};

/// Token claims the gate reads. Audience and issuer are checked during
/// decoding and not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: u64,
}
