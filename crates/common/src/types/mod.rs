use serde::Serialize;

/// Liveness probe payload.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Health {
    pub status: &'static str,
}
