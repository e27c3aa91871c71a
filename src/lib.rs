//! # afip-ws
//!
//! Client library for the SOAP web services of AFIP, the Argentine tax
//! authority: electronic invoicing ([WSFEv1](wsfe)) and the taxpayer
//! registry ([padrón a5](padron)).
//!
//! The crate owns parameter shaping, per-call authentication, and the
//! normalization of AFIP's inconsistently shaped responses into predictable
//! values, with authority-reported business errors surfaced as typed
//! failures. SOAP transport and WSAA ticket acquisition are pluggable
//! collaborators behind the [`SoapTransport`] and [`AuthDelegate`] traits.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use afip_ws::wsfe::WsfeClient;
//!
//! let transport: Arc<dyn afip_ws::SoapTransport> = Arc::new(my_transport);
//! let delegate: Arc<dyn afip_ws::AuthDelegate> = Arc::new(my_wsaa_delegate);
//!
//! let wsfe = WsfeClient::new(20111111112, transport, delegate);
//! let last = wsfe.last_voucher(1, 6, None).await?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `wsfe` (default) | Electronic invoicing client (CAE, CAEA, reference data) |
//! | `padron` (default) | Taxpayer registry client |

pub mod auth;
pub mod error;
pub mod response;
pub mod transport;

#[cfg(feature = "padron")]
pub mod padron;

#[cfg(feature = "wsfe")]
pub mod wsfe;

pub use crate::auth::{AuthDelegate, Credential};
pub use crate::error::AfipError;
pub use crate::transport::SoapTransport;

#[cfg(feature = "padron")]
pub use crate::padron::PadronClient;
#[cfg(feature = "wsfe")]
pub use crate::wsfe::WsfeClient;
