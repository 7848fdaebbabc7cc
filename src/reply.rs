/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! reply channels - the destination a handler addresses with `reply(x)`/`sender()`, and the
//! mechanism behind synchronous request/response (`ask`/`timeout_ask`).

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::actor::ActorRef;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

fn fresh_session() -> u64 {
    NEXT_SESSION.fetch_add(1, Ordering::Relaxed)
}

/// bound to the actor that can be replied to. `session` is `None` for an ordinary async send
/// (no one is selectively waiting on it) and `Some(id)` for the fresh channel a synchronous
/// request allocates, so the awaiting side can tell its own answer apart from an unrelated one.
#[derive(Clone)]
pub struct ReplyChannel {
    pub(crate) target: ActorRef,
    pub(crate) session: Option<u64>,
}

impl ReplyChannel {
    pub(crate) fn plain(target: ActorRef) -> Self {
        ReplyChannel { target, session: None }
    }

    pub(crate) fn session(target: ActorRef) -> Self {
        ReplyChannel { target, session: Some(fresh_session()) }
    }

    pub fn target(&self) -> &ActorRef {
        &self.target
    }
}

impl Debug for ReplyChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReplyChannel({}, session: {:?})", self.target.name(), self.session)
    }
}

impl PartialEq for ReplyChannel {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.session == other.session
    }
}
