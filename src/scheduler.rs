/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the scheduler that drives detached actors. A *reaction* is a unit of actor work bound to a
//! message; we run it on Tokio's blocking thread pool, which grows on demand as detached actors
//! outstrip the number of idle workers - exactly the "worker pool whose size grows as detached
//! actors outstrip workers" minimum viable policy the core calls for. Blocking `receive()` calls
//! use the same pool so a long-blocked actor never starves a reaction: `spawn_blocking` adds
//! threads rather than queuing behind them.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tokio::runtime::{Builder, Runtime};

use crate::actor::ActorRef;
use crate::handler::Handler;
use crate::message::Envelope;
use crate::{debug, trace};

/// a scheduled unit of actor work: (actor, handler, message). Panics inside the handler are
/// caught by `Actor::dispatch` itself, which turns them into an abnormal `exit` - this wrapper
/// only owns the bookkeeping around that.
pub(crate) struct Reaction {
    pub actor: ActorRef,
    pub handler: Arc<dyn Handler>,
    pub envelope: Envelope,
}

impl Reaction {
    fn run(self) {
        trace!("reaction for '{}' starting", self.actor.name());
        self.actor.run_reaction(self.handler, self.envelope);
        SCHEDULER.done_reaction();
    }
}

pub struct Scheduler {
    rt: Runtime,
    pending: AtomicUsize,
    idle: Mutex<()>,
    idle_cvar: Condvar,
}

impl Scheduler {
    fn new() -> Self {
        let rt = Builder::new_multi_thread()
            .thread_name("actor-worker")
            .enable_time()
            .build()
            .expect("failed to start the actor runtime");
        Scheduler { rt, pending: AtomicUsize::new(0), idle: Mutex::new(()), idle_cvar: Condvar::new() }
    }

    /// runs `reaction` on some worker thread; ordering between distinct reactions is unspecified.
    pub(crate) fn execute(&self, reaction: Reaction) {
        self.rt.spawn_blocking(move || reaction.run());
    }

    /// bootstraps an actor: accounting plus [`Self::execute`].
    pub(crate) fn start(&self, reaction: Reaction) {
        self.pend_reaction();
        self.execute(reaction);
    }

    /// runs an arbitrary closure on the worker pool without the reaction bookkeeping - used for
    /// the initial actor body, which may itself block for a long time inside `receive()`.
    pub(crate) fn spawn_body(&self, body: impl FnOnce() + Send + 'static) {
        self.pend_reaction();
        self.rt.spawn_blocking(move || {
            let result = std::panic::catch_unwind(AssertUnwindSafe(body));
            if result.is_err() {
                debug!("actor body panicked");
            }
            SCHEDULER.done_reaction();
        });
    }

    pub(crate) fn pend_reaction(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn done_reaction(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _guard = self.idle.lock();
            self.idle_cvar.notify_all();
        }
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// spawns a future on the actor runtime, used by the timer service for delayed deliveries.
    pub(crate) fn spawn_timer<F>(&self, fut: F) -> tokio::task::AbortHandle
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.rt.spawn(fut).abort_handle()
    }

    /// optional fairness hook, invoked on every send/receive; this implementation is a no-op
    /// but gives a single place to add scheduling-fairness accounting later.
    pub(crate) fn tick(&self, _actor: &ActorRef) {}

    /// blocks the calling (non-actor) thread until no reactions are outstanding, i.e. the point
    /// at which a process driven entirely by detached actors can shut down.
    pub fn wait_until_idle(&self) {
        let mut guard = self.idle.lock();
        while self.pending_count() > 0 {
            self.idle_cvar.wait(&mut guard);
        }
    }
}

lazy_static::lazy_static! {
    pub(crate) static ref SCHEDULER: Scheduler = Scheduler::new();
}

/// blocks until every detached actor has finished and no reactions remain outstanding.
pub fn wait_until_idle() {
    SCHEDULER.wait_until_idle();
}
