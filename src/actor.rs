/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the actor core: a mailbox plus a mode that is either idle, blocked in a thread-owning
//! `receive`, or detached with a continuation waiting on the scheduler. `send`/`receive`/`react`
//! and friends all funnel through this one piece of shared state, guarded by a single mutex that
//! is never held across user handler code.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::entry;
use crate::errors::{ActorError, Result};
use crate::handler::{Handler, MessageHandler};
use crate::mailbox::MessageQueue;
use crate::message::{BoxMessage, Envelope, Exit, Message, Timeout};
use crate::reply::ReplyChannel;
use crate::scheduler::{Reaction, SCHEDULER};
use crate::timer::{self, TimerHandle, TimerId};
use crate::{debug, trace};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// executing a handler, or idle between steps with nothing outstanding.
    Running,
    /// a thread is parked in `receive`/`receive_within`, owning this actor for its duration.
    Blocked,
    /// no thread owns this actor; a continuation is registered and will run as a reaction.
    Detached,
    /// terminated; no further messages are handled.
    Exited,
}

struct Inner {
    mailbox: MessageQueue,
    mode: Mode,
    /// the predicate currently installed by a blocked `receive` or a detached `react`, tested
    /// by `send` against every newly arriving message before it is enqueued. Works at the
    /// envelope level (not just the payload) so a session-scoped `ask` reply can be picked out
    /// from an otherwise-matching flood of ordinary messages.
    waiting_for: Option<Arc<dyn Fn(&Envelope) -> bool + Send + Sync>>,
    /// set only in `Detached` mode: what to run when `waiting_for` is satisfied.
    continuation: Option<Arc<dyn Handler>>,
    /// handed to the blocked thread by `send`/`deliver_timeout` to wake it.
    delivered: Option<Envelope>,
    /// nested reply-channel stack; `sessions.last()` is who to reply to from inside the handler
    /// currently executing. Depth mirrors dispatch nesting, not actor lifetime.
    sessions: Vec<Option<ReplyChannel>>,
    /// the channel used for this actor's most recent outgoing `ask`/`timeout_ask`.
    outgoing: Option<ReplyChannel>,
    links: HashSet<WeakActorRef>,
    trap_exit: bool,
    should_exit: Option<String>,
    timeout_pending: bool,
    timer_id: Option<TimerId>,
    timer_handle: Option<TimerHandle>,
    /// run once, only on a `normal` exit - the continuation-passing hook a `loop`/`seq`-style
    /// sequencing layer would build on. Not exposed publicly; see [`ActorRef::on_normal_exit`].
    on_normal_exit: Option<Box<dyn FnOnce() + Send>>,
}

pub(crate) struct ActorCell {
    id: u64,
    name: String,
    inner: Mutex<Inner>,
    cvar: Condvar,
}

/// a cheap, cloneable handle to an actor. All actor operations are methods on this type.
#[derive(Clone)]
pub struct ActorRef(Arc<ActorCell>);

impl ActorRef {
    pub(crate) fn new_cell(name: String) -> ActorRef {
        let id = NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed);
        ActorRef(Arc::new(ActorCell {
            id,
            name,
            inner: Mutex::new(Inner {
                mailbox: MessageQueue::new(),
                mode: Mode::Running,
                waiting_for: None,
                continuation: None,
                delivered: None,
                sessions: Vec::new(),
                outgoing: None,
                links: HashSet::new(),
                trap_exit: false,
                should_exit: None,
                timeout_pending: false,
                timer_id: None,
                timer_handle: None,
                on_normal_exit: None,
            }),
            cvar: Condvar::new(),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    fn downgrade(&self) -> WeakActorRef {
        WeakActorRef { id: self.0.id, inner: Arc::downgrade(&self.0) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.0.inner.lock()
    }

    // ---- construction -----------------------------------------------------------------------

    /// creates and starts an actor: `body` runs once, on a worker thread, as this actor. Most
    /// bodies end in a loop of `receive`/`react` calls; `body` returning ends the actor with
    /// reason `"normal"` unless it already exited some other way.
    pub fn spawn(name: impl Into<String>, body: impl FnOnce(ActorRef) + Send + 'static) -> ActorRef {
        let actor = ActorRef::new_cell(name.into());
        actor.start_body(body);
        actor
    }

    /// like [`Self::spawn`], additionally linking the new actor to `parent` - atomically, before
    /// the child's body ever runs, so a child that exits immediately (e.g. a body whose first act
    /// is `exit()`) cannot finish and cascade before the link exists. Linking after an already-
    /// started child, by contrast, is a real race: the child could already be gone.
    pub fn spawn_linked(name: impl Into<String>, parent: &ActorRef, body: impl FnOnce(ActorRef) + Send + 'static) -> ActorRef {
        let child = ActorRef::new_cell(name.into());
        parent.link(&child);
        child.start_body(body);
        child
    }

    /// submits `body` to the scheduler as this (already constructed, already linked if needed)
    /// actor's initial unit of work.
    fn start_body(&self, body: impl FnOnce(ActorRef) + Send + 'static) {
        let started = self.clone();
        SCHEDULER.spawn_body(move || {
            entry::with_current(&started, || {
                body(started.clone());
            });
            // a body that ends by detaching (its last act was `react`/`eventloop`) is not done:
            // it keeps running as reactions resumed by the scheduler. Only a body that returns
            // with nothing outstanding is finished, and finishes with reason "normal". `Running`
            // here is reliable precisely because mode only becomes `Running` once a reaction is
            // actually executing (see `run_reaction`), never merely scheduled.
            let mode_after = started.lock().mode;
            if mode_after != Mode::Exited && mode_after != Mode::Detached {
                let _ = started.perform_exit("normal".to_string());
            }
        });
    }

    // ---- sending ------------------------------------------------------------------------------

    /// asynchronous, fire-and-forget send. The reply channel records the sending actor (or the
    /// calling thread's proxy) so the receiver's `sender()`/`reply()` can address a response.
    pub fn send<T: Message>(&self, msg: T) {
        let reply_to = Some(ReplyChannel::plain(entry::current()));
        self.deliver(Envelope::new(Box::new(msg), reply_to, None));
    }

    /// sends `msg` on the caller's behalf, preserving whatever reply channel is on top of the
    /// caller's own session stack rather than substituting the caller itself.
    pub fn forward<T: Message>(&self, msg: T) {
        let reply_to = entry::current_top_session();
        self.deliver(Envelope::new(Box::new(msg), reply_to, None));
    }

    pub(crate) fn deliver(&self, envelope: Envelope) {
        SCHEDULER.tick(self);
        let mut inner = self.lock();
        if inner.mode == Mode::Exited {
            trace!("dropping message for exited actor '{}'", self.name());
            return;
        }
        self.handoff_or_enqueue(&mut inner, envelope);
    }

    fn handoff_or_enqueue(&self, inner: &mut Inner, envelope: Envelope) {
        let matched = inner.waiting_for.as_ref().is_some_and(|p| p(&envelope));
        if !matched {
            inner.mailbox.append(envelope);
            return;
        }
        self.cancel_timeout(inner);
        inner.waiting_for = None;
        match inner.mode {
            Mode::Blocked => {
                inner.delivered = Some(envelope);
                self.0.cvar.notify_all();
            }
            Mode::Detached => {
                // mode stays `Detached` until the reaction actually starts (see `run_reaction`):
                // flipping it to `Running` here, before the scheduled reaction has even begun,
                // would make an actor between "just detached" and "reaction started" briefly
                // indistinguishable from truly idle.
                let handler = inner.continuation.take().expect("detached actor missing its continuation");
                SCHEDULER.execute(Reaction { actor: self.clone(), handler, envelope });
            }
            Mode::Running | Mode::Exited => unreachable!("waiting_for set outside Blocked/Detached"),
        }
    }

    fn cancel_timeout(&self, inner: &mut Inner) {
        if inner.timeout_pending {
            inner.timeout_pending = false;
            inner.timer_id = None;
            if let Some(handle) = inner.timer_handle.take() {
                handle.cancel();
            }
        }
    }

    pub(crate) fn deliver_timeout(&self, id: TimerId) {
        let mut inner = self.lock();
        if !inner.timeout_pending || inner.timer_id != Some(id) {
            return; // already resumed by a real message, or a stale/cancelled timer
        }
        inner.timeout_pending = false;
        inner.timer_id = None;
        inner.timer_handle = None;
        inner.waiting_for = None;
        let envelope = Envelope::new(Box::new(Timeout), None, None);
        match inner.mode {
            Mode::Blocked => {
                inner.delivered = Some(envelope);
                self.0.cvar.notify_all();
            }
            Mode::Detached => {
                let handler = inner.continuation.take().expect("detached actor missing its continuation");
                SCHEDULER.execute(Reaction { actor: self.clone(), handler, envelope });
            }
            Mode::Running | Mode::Exited => {}
        }
    }

    // ---- receive / react ----------------------------------------------------------------------

    fn assert_owner(&self, op: &str) -> Result<()> {
        match entry::current_if_bound() {
            Some(ref cur) if cur == self => Ok(()),
            _ => Err(ActorError::WrongThread(format!("{op} on '{}'", self.name()))),
        }
    }

    /// blocks the calling thread until a message matching `handler` arrives, then runs it on
    /// this thread. Must be called by the thread that owns this actor.
    pub fn receive(&self, handler: MessageHandler) -> Result<()> {
        self.assert_owner("receive")?;
        self.receive_dyn(Arc::new(handler), None, None)
    }

    pub fn receive_within(&self, millis: u64, handler: MessageHandler) -> Result<()> {
        self.assert_owner("receiveWithin")?;
        self.receive_dyn(Arc::new(handler), Some(Duration::from_millis(millis)), None)
    }

    fn receive_dyn(&self, handler: Arc<dyn Handler>, timeout: Option<Duration>, session: Option<u64>) -> Result<()> {
        if let Some(reason) = self.take_should_exit() {
            return self.perform_exit(reason);
        }

        let predicate: Arc<dyn Fn(&Envelope) -> bool + Send + Sync> = {
            let h = handler.clone();
            match session {
                None => Arc::new(move |e: &Envelope| h.is_defined_at(&e.msg)),
                Some(s) => Arc::new(move |e: &Envelope| e.session == Some(s) && h.is_defined_at(&e.msg)),
            }
        };

        let mut inner = self.lock();
        let envelope = if let Some(e) = inner.mailbox.extract_first(|e| predicate(e)) {
            e
        } else {
            inner.waiting_for = Some(predicate);
            inner.mode = Mode::Blocked;

            if let Some(dur) = timeout {
                inner.timeout_pending = true;
                let me = self.clone();
                let (id, handle) = MutexGuard::unlocked(&mut inner, || timer::request_timeout(me, dur));
                if inner.mode == Mode::Blocked && inner.timeout_pending {
                    inner.timer_id = Some(id);
                    inner.timer_handle = Some(handle);
                } else {
                    handle.cancel();
                }
            }

            while inner.delivered.is_none() {
                self.0.cvar.wait(&mut inner);
            }
            inner.mode = Mode::Running;
            inner.delivered.take().unwrap()
        };
        drop(inner);

        if let Some(reason) = self.take_should_exit() {
            return self.perform_exit(reason);
        }
        self.dispatch(&*handler, envelope)
    }

    /// detaches: installs `handler` as this actor's continuation and returns immediately. If a
    /// matching message is already queued, the continuation runs right away as a reaction
    /// instead of waiting for a fresh arrival.
    pub fn react(&self, handler: MessageHandler) -> Result<()> {
        self.assert_owner("react")?;
        self.react_dyn(Arc::new(handler), None)
    }

    pub fn react_within(&self, millis: u64, handler: MessageHandler) -> Result<()> {
        self.assert_owner("reactWithin")?;
        self.react_dyn(Arc::new(handler), Some(Duration::from_millis(millis)))
    }

    /// repeatedly detaches with the same handler: after each match runs, `handler` is
    /// reinstalled automatically, so the actor keeps reacting without ever blocking a thread.
    pub fn eventloop(&self, handler: MessageHandler) -> Result<()> {
        self.assert_owner("eventloop")?;
        let looping: Arc<dyn Handler> = Arc::new(Looping { actor: self.clone(), inner: Arc::new(handler) });
        self.react_dyn(looping, None)
    }

    fn react_dyn(&self, handler: Arc<dyn Handler>, timeout: Option<Duration>) -> Result<()> {
        if let Some(reason) = self.take_should_exit() {
            return self.perform_exit(reason);
        }

        SCHEDULER.pend_reaction();
        let mut inner = self.lock();
        if let Some(e) = inner.mailbox.extract_first(|e| handler.is_defined_at(&e.msg)) {
            inner.mode = Mode::Running;
            drop(inner);
            // Run this reaction in place rather than handing it to the scheduler: the caller may
            // itself be executing inside another reaction's `dispatch` for this same actor (e.g.
            // `eventloop`'s re-arm), and scheduling a second, concurrently-running task here would
            // let two reactions for the same actor run at once, corrupting the session stack.
            let _ = self.dispatch(&*handler, e);
            SCHEDULER.done_reaction();
            return Ok(());
        }

        inner.continuation = Some(handler.clone());
        let predicate_handler = handler;
        inner.waiting_for = Some(Arc::new(move |e: &Envelope| predicate_handler.is_defined_at(&e.msg)));
        inner.mode = Mode::Detached;

        if let Some(dur) = timeout {
            inner.timeout_pending = true;
            let me = self.clone();
            let (id, handle) = MutexGuard::unlocked(&mut inner, || timer::request_timeout(me, dur));
            if inner.mode == Mode::Detached && inner.timeout_pending {
                inner.timer_id = Some(id);
                inner.timer_handle = Some(handle);
            } else {
                handle.cancel();
            }
        }
        Ok(())
    }

    /// blocks until the next message of any shape arrives, consuming it unconditionally. The
    /// `?` operator from the mailbox-access surface.
    pub fn accept(&self) -> Result<BoxMessage> {
        self.assert_owner("?")?;
        let slot: Arc<Mutex<Option<BoxMessage>>> = Arc::new(Mutex::new(None));
        let sink = slot.clone();
        let handler = crate::handler::any(move |m| *sink.lock() = Some(m));
        self.receive_dyn(handler, None, None)?;
        Ok(slot.lock().take().expect("accept() matched without storing a message"))
    }

    /// entry point called by the scheduler for every reaction scheduled from a detached
    /// continuation (`handoff_or_enqueue`/`deliver_timeout`). `mode` only flips to `Running` here,
    /// at the point the reaction actually starts executing - not when it is merely scheduled -
    /// so a concurrent observer (e.g. `spawn`'s post-body check) can't mistake "scheduled but not
    /// yet running" for idle.
    pub(crate) fn run_reaction(&self, handler: Arc<dyn Handler>, envelope: Envelope) {
        if let Some(reason) = self.take_should_exit() {
            let _ = self.perform_exit(reason);
            return;
        }
        self.lock().mode = Mode::Running;
        let _ = self.dispatch(&*handler, envelope);
    }

    fn dispatch(&self, handler: &dyn Handler, envelope: Envelope) -> Result<()> {
        if envelope.msg.as_any().is::<Timeout>() && !handler.is_defined_at(&envelope.msg) {
            return Err(ActorError::UnhandledTimeout(self.name().to_string()));
        }

        self.lock().sessions.push(envelope.reply_to.clone());
        let outcome = entry::with_current(self, || {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.invoke(envelope.msg)))
        });
        self.lock().sessions.pop();

        match outcome {
            Ok(()) => Ok(()),
            Err(payload) => self.perform_exit(panic_message(&payload)),
        }
    }

    fn take_should_exit(&self) -> Option<String> {
        self.lock().should_exit.take()
    }

    // ---- replying -----------------------------------------------------------------------------

    /// the actor that sent the message currently being handled, if any.
    pub fn sender(&self) -> Option<ActorRef> {
        self.lock().sessions.last().cloned().flatten().map(|rc| rc.target().clone())
    }

    pub(crate) fn top_session(&self) -> Option<ReplyChannel> {
        self.lock().sessions.last().cloned().flatten()
    }

    /// replies to the sender of the message currently being handled, addressing the reply to
    /// the same session if the incoming message was part of a synchronous `ask`.
    pub fn reply<T: Message>(&self, msg: T) -> Result<()> {
        let channel = self.top_session();
        match channel {
            Some(rc) => {
                rc.target().deliver(Envelope::new(Box::new(msg), Some(ReplyChannel::plain(self.clone())), rc.session));
                Ok(())
            }
            None => Err(ActorError::NoPendingSession(self.name().to_string())),
        }
    }

    // ---- synchronous request/response -------------------------------------------------------

    /// sends `req` and blocks the caller until a matching `Resp` reply arrives, correlated by a
    /// fresh session so a concurrent unrelated reply to the same actor can't be mistaken for
    /// this one. Falls back to the process-wide [`crate::config::RuntimeConfig::install`]ed
    /// timeout when one has been configured; with none installed, blocks indefinitely on an
    /// actor that never replies. Callers that want their own timeout should use
    /// [`Self::timeout_ask`] instead.
    pub fn ask<Req: Message, Resp: Message>(&self, req: Req) -> Result<Resp> {
        let me = entry::current();
        let channel = ReplyChannel::session(me.clone());
        let session = channel.session.expect("session channel always carries a session id");
        me.lock().outgoing = Some(channel.clone());
        self.deliver(Envelope::new(Box::new(req), Some(channel), None));
        me.receive_session(session, crate::config::installed_default_ask_timeout())
    }

    /// like [`Self::ask`] but gives up after `timeout`, returning `Ok(None)` instead of blocking
    /// forever on an actor that never replies.
    pub fn timeout_ask<Req: Message, Resp: Message>(&self, req: Req, timeout: Duration) -> Result<Option<Resp>> {
        let me = entry::current();
        let channel = ReplyChannel::session(me.clone());
        let session = channel.session.expect("session channel always carries a session id");
        me.lock().outgoing = Some(channel.clone());
        self.deliver(Envelope::new(Box::new(req), Some(channel), None));
        match me.receive_session::<Resp>(session, Some(timeout)) {
            Ok(resp) => Ok(Some(resp)),
            Err(ActorError::UnhandledTimeout(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn receive_session<Resp: Message>(&self, session: u64, timeout: Option<Duration>) -> Result<Resp> {
        let slot: Arc<Mutex<Option<Resp>>> = Arc::new(Mutex::new(None));
        let sink = slot.clone();
        let handler = MessageHandler::new().on::<Resp>(move |r| *sink.lock() = Some(r)).build();
        self.receive_dyn(Arc::new(handler), timeout, Some(session))?;
        Ok(slot.lock().take().expect("matched session handler did not store a reply"))
    }

    // ---- links & supervision -----------------------------------------------------------------

    pub fn trap_exit(&self) -> bool {
        self.lock().trap_exit
    }

    pub fn set_trap_exit(&self, trap: bool) {
        self.lock().trap_exit = trap;
    }

    /// links two actors symmetrically: either one exiting abnormally terminates the other,
    /// unless the other traps exits. Locks both sides in id order to avoid deadlocking against
    /// a concurrent link/unlink of the same pair from the other direction.
    pub fn link(&self, peer: &ActorRef) {
        if self == peer {
            return;
        }
        let (first, second) = if self.id() < peer.id() { (self, peer) } else { (peer, self) };
        let mut a = first.lock();
        let mut b = second.lock();
        a.links.insert(second.downgrade());
        b.links.insert(first.downgrade());
    }

    pub fn unlink(&self, peer: &ActorRef) {
        if self == peer {
            return;
        }
        let (first, second) = if self.id() < peer.id() { (self, peer) } else { (peer, self) };
        let mut a = first.lock();
        let mut b = second.lock();
        a.links.remove(&second.downgrade());
        b.links.remove(&first.downgrade());
    }

    fn unlink_one(&self, other: &ActorRef) {
        self.lock().links.remove(&other.downgrade());
    }

    /// registers a callback to run exactly once, only when this actor exits with reason
    /// `"normal"`. Used by the `loop_`/`seq` sequencing sugar, not part of the public surface.
    pub(crate) fn on_normal_exit(&self, cleanup: impl FnOnce() + Send + 'static) {
        self.lock().on_normal_exit = Some(Box::new(cleanup));
    }

    /// terminates the calling actor with `reason`, cascading to linked peers per
    /// [`Self::link`]. Callers propagate the returned error with `?`; it is not a failure.
    pub fn exit(&self, reason: impl Into<String>) -> Result<()> {
        self.perform_exit(reason.into())
    }

    fn perform_exit(&self, reason: String) -> Result<()> {
        let mut inner = self.lock();
        if inner.mode == Mode::Exited {
            return Err(ActorError::Exited(reason));
        }
        debug!("actor '{}' exiting: {}", self.name(), reason);
        inner.mode = Mode::Exited;
        self.cancel_timeout(&mut inner);
        let cleanup = if reason == "normal" { inner.on_normal_exit.take() } else { None };
        let links: Vec<WeakActorRef> = inner.links.drain().collect();
        drop(inner);

        if let Some(cb) = cleanup {
            cb();
        }

        for weak in links {
            if let Some(peer) = weak.upgrade() {
                peer.unlink_one(self);
                peer.receive_exit(self.clone(), reason.clone());
            }
        }

        Err(ActorError::Exited(reason))
    }

    /// delivered to a linked peer when this actor exits. A trapping peer gets an ordinary
    /// [`Exit`] message through its mailbox; a non-trapping peer is itself terminated, unless
    /// it is already exiting (breaks cascades through cycles of links).
    fn receive_exit(&self, from: ActorRef, reason: String) {
        let mut inner = self.lock();
        if inner.mode == Mode::Exited {
            return;
        }
        if inner.trap_exit {
            drop(inner);
            self.deliver(Envelope::new(Box::new(Exit { from, reason }), None, None));
            return;
        }
        if reason == "normal" {
            return;
        }

        inner.should_exit = Some(reason);
        inner.waiting_for = None;
        match inner.mode {
            Mode::Blocked => {
                inner.delivered = Some(Envelope::new(Box::new(ExitSignal), None, None));
                self.0.cvar.notify_all();
            }
            Mode::Detached => {
                // left at `Detached`, not flipped to `Running`, until `run_reaction` actually
                // starts it - same reasoning as `handoff_or_enqueue`. The continuation itself is
                // never really invoked on this wakeup: `run_reaction` sees `should_exit` first and
                // performs the exit instead.
                let handler = inner.continuation.take();
                drop(inner);
                if let Some(handler) = handler {
                    SCHEDULER.execute(Reaction { actor: self.clone(), handler, envelope: Envelope::new(Box::new(ExitSignal), None, None) });
                }
            }
            Mode::Running | Mode::Exited => {
                // currently mid-step; the next receive/react call observes should_exit at entry.
            }
        }
    }
}

/// wakes a blocked/detached actor so it re-enters its step function and observes `should_exit`;
/// never matched by user handlers and never actually dispatched.
struct ExitSignal;

impl fmt::Debug for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExitSignal")
    }
}

struct Looping {
    actor: ActorRef,
    inner: Arc<dyn Handler>,
}

impl Handler for Looping {
    fn is_defined_at(&self, msg: &BoxMessage) -> bool {
        self.inner.is_defined_at(msg)
    }
    fn invoke(&self, msg: BoxMessage) {
        self.inner.invoke(msg);
        // re-arming is a direct (in-stack) call, not a handoff to another worker: `react_dyn`
        // runs any already-queued match synchronously on this same thread rather than scheduling
        // a second, concurrently-running reaction for this actor.
        let _ = self.actor.react_dyn(Arc::new(Looping { actor: self.actor.clone(), inner: self.inner.clone() }), None);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in actor handler".to_string()
    }
}

impl PartialEq for ActorRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for ActorRef {}

impl Hash for ActorRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorRef(\"{}\")", self.0.name)
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

/// a non-owning reference to an actor, used for the link set so a web of supervised actors
/// doesn't keep each other alive after termination.
#[derive(Clone)]
struct WeakActorRef {
    id: u64,
    inner: Weak<ActorCell>,
}

impl WeakActorRef {
    fn upgrade(&self) -> Option<ActorRef> {
        self.inner.upgrade().map(ActorRef)
    }
}

impl PartialEq for WeakActorRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for WeakActorRef {}

impl Hash for WeakActorRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_pong_via_send_and_receive() {
        let (tx, rx) = std::sync::mpsc::channel();
        let pong = ActorRef::spawn("pong", move |me| loop {
            let replier = me.clone();
            let step = me.receive(crate::receive! { s: String => { let _ = replier.reply(format!("pong: {s}")); } });
            if step.is_err() {
                break;
            }
        });

        let pong_for_ping = pong.clone();
        ActorRef::spawn("ping", move |me| {
            for s in &["hello", "world"] {
                if let Ok(reply) = pong_for_ping.ask::<String, String>(s.to_string()) {
                    let _ = tx.send(reply);
                }
            }
            let _ = me.exit("normal");
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "pong: hello");
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "pong: world");
        let _ = pong.exit("normal");
    }
}
