//! xraylink - Generate share links from Xray server configs
//!
//! # Pipeline
//!
//! ```text
//! Config (JSON)
//! → Locator (email discovery / client lookup)
//! → Link Encoder (vless / vmess / trojan)
//! → Output (plain URL or terminal QR)
//! ```
//!
//! ## Core Principles
//!
//! - The config is read once and never mutated
//! - Encoders are pure: client context + server address in, URL string out
//! - Parameter names and ordering follow each protocol's de facto link
//!   dialect, since downstream clients parse links byte-for-byte
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── config.rs   # Typed serde model of the inbounds tree
//! ├── locator.rs  # Email discovery and client lookup
//! ├── link/       # Per-protocol share link encoders
//! ├── qr.rs       # Optional terminal QR rendering
//! └── error.rs    # Error taxonomy
//! ```

pub mod config;
pub mod error;
pub mod link;
pub mod locator;
pub mod qr;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use link::{encoder_for, LinkEncoder};
pub use locator::{find_by_email, list_emails, ClientContext};
