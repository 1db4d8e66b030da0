//! Terminal QR rendering for share links
//!
//! The capability is optional at compile time: built without the `qrcode`
//! feature, [`AVAILABLE`] is false and the CLI downgrades to plain text
//! output. A failure while rendering with the capability compiled in is a
//! real error ([`crate::Error::Render`]).

use crate::error::Result;

/// Whether QR rendering was compiled in
pub const AVAILABLE: bool = cfg!(feature = "qrcode");

/// Render a URL as a multi-line Unicode QR code for the terminal
#[cfg(feature = "qrcode")]
pub fn render(url: &str) -> Result<String> {
    use qrcode::render::unicode;
    use qrcode::QrCode;

    let code = QrCode::new(url.as_bytes()).map_err(|e| crate::error::Error::Render(e.to_string()))?;
    Ok(code.render::<unicode::Dense1x2>().quiet_zone(true).build())
}

/// Stub kept so callers compile without the feature; guarded by [`AVAILABLE`]
#[cfg(not(feature = "qrcode"))]
pub fn render(_url: &str) -> Result<String> {
    Err(crate::error::Error::Render(
        "QR support not compiled in".to_string(),
    ))
}
