/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! An event-based actor runtime: actors communicate exclusively by asynchronous message
//! passing and may either block a thread in [`actor::ActorRef::receive`] or detach their
//! continuation with [`actor::ActorRef::react`] to be resumed later by the [`scheduler`].
//! Both modes share one mailbox discipline, so a program can mix heavyweight, blocking actors
//! with lightweight, detached ones freely.
//!
//! ```ignore
//! use reed_actor::prelude::*;
//!
//! let counter = ActorRef::spawn("counter", |me| {
//!     let mut total = 0i64;
//!     loop {
//!         let step = me.receive(receive! {
//!             n: i64 => { total += n; }
//!         });
//!         if step.is_err() {
//!             break;
//!         }
//!     }
//! });
//! counter.send(21i64);
//! ```

pub mod actor;
pub mod config;
pub mod entry;
pub mod errors;
pub mod handler;
pub mod mailbox;
pub mod message;
pub mod reply;
pub mod scheduler;
pub mod timer;

pub mod prelude;

#[macro_export]
macro_rules! trace {
    ( $( $id:ident = $e:expr ),* ) => { tracing::trace!( $( $id = $e ),* ) };
    ( $( $e:expr ),* ) => { tracing::trace!( $( $e ),* ) };
}

#[macro_export]
macro_rules! debug {
    ( $( $id:ident = $e:expr ),* ) => { tracing::debug!( $( $id = $e ),* ) };
    ( $( $e:expr ),* ) => { tracing::debug!( $( $e ),* ) };
}

#[macro_export]
macro_rules! info {
    ( $( $id:ident = $e:expr ),* ) => { tracing::info!( $( $id = $e ),* ) };
    ( $( $e:expr ),* ) => { tracing::info!( $( $e ),* ) };
}

#[macro_export]
macro_rules! warn {
    ( $( $id:ident = $e:expr ),* ) => { tracing::warn!( $( $id = $e ),* ) };
    ( $( $e:expr ),* ) => { tracing::warn!( $( $e ),* ) };
}

#[macro_export]
macro_rules! error {
    ( $( $id:ident = $e:expr ),* ) => { tracing::error!( $( $id = $e ),* ) };
    ( $( $e:expr ),* ) => { tracing::error!( $( $e ),* ) };
}
