pub mod drive;
pub mod plot;
pub mod provision;
pub mod sample;

use serde::Serialize;

/// Structured result every trigger entry point resolves to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationOutcome {
    pub status_code: u16,
    pub body: String,
}

impl InvocationOutcome {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }
}
