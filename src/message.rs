/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the message model - anything sendable is a `Message`, boxed and passed around as `BoxMessage`.
//! selective receive needs to test *and* later consume the concrete payload, hence the
//! [`Message::as_any`]/[`Message::into_any`] pair instead of a closed message enum.

use std::any::Any;
use std::fmt::Debug;

use crate::actor::ActorRef;
use crate::reply::ReplyChannel;

pub trait Message: Any + Debug + Send {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Debug + Send> Message for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

pub type BoxMessage = Box<dyn Message>;

#[inline]
pub fn type_matches<T: 'static>(msg: &BoxMessage) -> bool {
    msg.as_any().is::<T>()
}

/// consumes a message that has already been confirmed (via [`type_matches`]) to carry payload
/// `T`. Only called from the single-threaded handler dispatch path right after the match test,
/// so the downcast cannot fail in practice.
pub fn downcast<T: 'static>(msg: BoxMessage) -> Option<T> {
    msg.into_any().downcast::<T>().ok().map(|boxed| *boxed)
}

/// distinguished sentinel synthesized when a timed wait elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

/// delivered to linked peers with `trap_exit = true` instead of cascading termination
#[derive(Debug, Clone)]
pub struct Exit {
    pub from: ActorRef,
    pub reason: String,
}

/// a mailbox entry. `reply_to` is the channel a handler addresses via `reply(x)`/`sender()`;
/// `session` tags replies delivered through a synchronous request so the awaiting `ask()` can
/// pick its own answer out of the mailbox without being steered by an unrelated concurrent one.
pub struct Envelope {
    pub msg: BoxMessage,
    pub reply_to: Option<ReplyChannel>,
    pub session: Option<u64>,
}

impl Envelope {
    pub fn new(msg: BoxMessage, reply_to: Option<ReplyChannel>, session: Option<u64>) -> Self {
        Envelope { msg, reply_to, session }
    }
}

impl Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Envelope({:?}, session: {:?})", self.msg, self.session)
    }
}
