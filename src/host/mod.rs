// Host abstraction layer.
//
// The facade and the detector only ever talk to `HostDocument`. A real
// embedding implements it over its document object; `ScriptedDocument` is
// the in-memory implementation used for tests.

pub mod scripted;
pub mod types;

pub use scripted::{HostBehavior, RecordedCall, ScriptedDocument};
pub use types::*;
