// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for regulation engine notifications.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that any number of
//! subscribers can follow the regulation loop live. Events are not stored:
//! a subscriber only sees what is published after it subscribed.
//!
//! # Examples
//!
//! ```
//! use boiler_lib::event::{EngineEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(EngineEvent::LoopStarted);
//! assert!(matches!(rx.try_recv(), Ok(EngineEvent::LoopStarted)));
//! ```

mod engine_event;
mod event_bus;

pub use engine_event::EngineEvent;
pub use event_bus::EventBus;
