/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the timer service behind `receive_within`/`react_within`: arrange for an actor to observe a
//! `Timeout` token after a delay unless a real message beats it to the punch. One Tokio task per
//! request, the same shape as a one-shot actor timer (sleep, then deliver) - cancellation is
//! `AbortHandle::abort()` plus a belt-and-suspenders id check on delivery, since an in-flight
//! sleep that has already fired cannot be aborted after the fact.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::actor::ActorRef;
use crate::scheduler::SCHEDULER;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct TimerId(pub u64);

pub(crate) struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    /// idempotent: aborting twice, or after the timer already fired, is a no-op.
    pub(crate) fn cancel(self) {
        self.abort.abort();
    }
}

/// arranges for `actor` to receive a TIMEOUT after `delay` unless cancelled first. Returns the
/// id the actor should compare against on delivery, and a handle to cancel the request.
pub(crate) fn request_timeout(actor: ActorRef, delay: Duration) -> (TimerId, TimerHandle) {
    let id = TimerId(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed));
    let abort = SCHEDULER.spawn_timer(async move {
        tokio::time::sleep(delay).await;
        actor.deliver_timeout(id);
    });
    (id, TimerHandle { abort })
}
