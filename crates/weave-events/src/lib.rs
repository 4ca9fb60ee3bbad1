//! Protocol-agnostic streaming events for the execution engine.
//!
//! The engine emits [`EngineEvent`]s on an [`EventBus`] as it runs; a
//! transport layer (HTTP/SSE, a CLI, a websocket) subscribes and renders
//! them however it likes. Nothing in this crate knows about HTTP, SSE, or
//! any wire framing — that mapping is deliberately kept out of this
//! workspace.
//!
//! ```
//! use weave_events::{EngineEvent, EventBus};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(EngineEvent::status("thinking"));
//!
//! let event = rx.recv().await.unwrap();
//! assert!(matches!(&*event, EngineEvent::Status { .. }));
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod bus;
mod event;

pub use bus::{EventBus, EventReceiver, RecvError};
pub use event::EngineEvent;
