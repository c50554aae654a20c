//! Screenfull, one interface for a host's full-screen capability.
//!
//! Hosts have exposed full-screen under several naming conventions over the
//! years (standard, WebKit, legacy WebKit, Gecko, Trident). This crate probes
//! the host once, resolves a canonical mapping, and exposes request / exit /
//! toggle, live state, and change / error subscriptions through it.
//!
//! ```ignore
//! use std::rc::Rc;
//! use screenfull::{FullscreenApi, Listener};
//!
//! let api = FullscreenApi::new(Rc::new(my_document));
//! if let Some(fullscreen) = api.supported() {
//!     fullscreen.onchange(&Listener::new(|_| log::info!("full-screen changed")));
//!     fullscreen.request(None, None).await?;
//! }
//! ```

pub mod detect;
pub mod error;
pub mod events;
pub mod facade;
pub mod host;

pub use detect::{detect, CanonicalMapping, Capability, Detector, NamingVariant, Slot, NAMING_VARIANTS};
pub use error::{FullscreenError, HostError};
pub use events::{EventKind, Listener, WeakListener};
pub use facade::{Fullscreen, FullscreenApi, FullscreenState};
pub use host::{
    ElementRef, HostBehavior, HostCall, HostDocument, HostEvent, HostValue, NavigationUi,
    RecordedCall, RequestOptions, ScriptedDocument,
};
