pub mod invitations;
pub mod jwt;
pub mod settings;
pub mod telemetry;

///
/// JSON body used for every error response.
///
/// Clients rely on the `detail` field to surface a human-readable
/// explanation of the failure.
///
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

///
/// Acknowledgement body returned by mutating operations that have no
/// entity to return (revoke, delete).
///
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
