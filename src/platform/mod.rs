//! Platform abstraction layer
//!
//! Browser key events are folded into plain flag sets here, so the
//! simulation only ever sees an immutable per-frame snapshot.

pub mod input;

pub use input::{HeldKeys, HostKey};
