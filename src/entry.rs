/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! "who am I" for the thread currently running actor code. Every thread that ever calls `send`,
//! `reply`, or `ask` needs an answer, including threads this crate never spawned - a `main`
//! thread driving actors via `ask`, or a callback fired from an unrelated library. Such threads
//! get a lazily-materialized proxy actor the first time they ask, so sends and replies from
//! "outside" compose with the rest of the model instead of needing a special case.

use std::cell::RefCell;

use crate::actor::ActorRef;
use crate::reply::ReplyChannel;

thread_local! {
    static CURRENT: RefCell<Option<ActorRef>> = const { RefCell::new(None) };
}

/// the actor owning the calling thread, materializing a proxy actor on first use if this thread
/// was never bound to one.
pub fn current() -> ActorRef {
    if let Some(actor) = current_if_bound() {
        return actor;
    }
    let proxy = ActorRef::new_cell(format!("proxy-{:?}", std::thread::current().id()));
    bind_current(proxy.clone());
    proxy
}

pub(crate) fn current_if_bound() -> Option<ActorRef> {
    CURRENT.with(|c| c.borrow().clone())
}

pub(crate) fn current_top_session() -> Option<ReplyChannel> {
    current_if_bound().and_then(|a| a.top_session())
}

pub(crate) fn bind_current(actor: ActorRef) -> Option<ActorRef> {
    CURRENT.with(|c| c.replace(Some(actor)))
}

pub(crate) fn restore_current(prev: Option<ActorRef>) {
    CURRENT.with(|c| *c.borrow_mut() = prev);
}

/// runs `f` with `actor` bound as the calling thread's current actor, restoring whatever was
/// bound before on the way out - including across nested/reentrant `receive`/`react` calls.
pub(crate) fn with_current<R>(actor: &ActorRef, f: impl FnOnce() -> R) -> R {
    let prev = bind_current(actor.clone());
    let result = f();
    restore_current(prev);
    result
}
