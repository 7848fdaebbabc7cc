/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! dynamic pattern handlers - the "is this shape handleable, and if so what do we do with it"
//! pair the core dispatches on. A [`Handler`] is built from a sequence of typed arms, tested
//! in registration order (first match wins, same as an ordinary `match`).

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::message::{downcast, type_matches, BoxMessage};

/// object-safe predicate-plus-continuation pair over a boxed message.
pub trait Handler: Send + Sync {
    fn is_defined_at(&self, msg: &BoxMessage) -> bool;
    fn invoke(&self, msg: BoxMessage);
}

trait Arm: Send + Sync {
    fn matches(&self, msg: &BoxMessage) -> bool;
    fn call(&self, msg: BoxMessage);
}

struct TypedArm<T, F> {
    guard: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
    action: F,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T, F> Arm for TypedArm<T, F>
where
    T: Any + Debug + Send,
    F: Fn(T) + Send + Sync,
{
    fn matches(&self, msg: &BoxMessage) -> bool {
        if !type_matches::<T>(msg) {
            return false;
        }
        match &self.guard {
            None => true,
            Some(g) => msg.as_any().downcast_ref::<T>().map(|t| g(t)).unwrap_or(false),
        }
    }

    fn call(&self, msg: BoxMessage) {
        let value = downcast::<T>(msg).expect("arm matched but downcast failed - mailbox was mutated out of band");
        (self.action)(value);
    }
}

/// a `MessageHandler` is a small ordered list of typed arms. Build one with [`MessageHandler::new`]
/// and chain [`MessageHandler::on`]/[`MessageHandler::on_if`] calls, then hand it to
/// `receive`/`react`/`receive_within`/`react_within`.
#[derive(Clone)]
pub struct MessageHandler {
    arms: Arc<Vec<Box<dyn Arm>>>,
}

impl MessageHandler {
    pub fn new() -> MessageHandlerBuilder {
        MessageHandlerBuilder { arms: Vec::new() }
    }
}

pub struct MessageHandlerBuilder {
    arms: Vec<Box<dyn Arm>>,
}

impl MessageHandlerBuilder {
    pub fn on<T>(mut self, action: impl Fn(T) + Send + Sync + 'static) -> Self
    where
        T: Any + Debug + Send,
    {
        self.arms.push(Box::new(TypedArm { guard: None, action, _marker: std::marker::PhantomData::<fn(T)> }));
        self
    }

    /// like [`Self::on`] but only matches when `guard` holds, allowing arms to discriminate
    /// within a single message type (e.g. a string tag).
    pub fn on_if<T>(mut self, guard: impl Fn(&T) -> bool + Send + Sync + 'static, action: impl Fn(T) + Send + Sync + 'static) -> Self
    where
        T: Any + Debug + Send,
    {
        self.arms.push(Box::new(TypedArm { guard: Some(Box::new(guard)), action, _marker: std::marker::PhantomData::<fn(T)> }));
        self
    }

    pub fn build(self) -> MessageHandler {
        MessageHandler { arms: Arc::new(self.arms) }
    }
}

/// the `?` operator's handler: matches any message unconditionally, used by `Actor::accept`.
struct AnyHandler<F> {
    action: F,
}

impl<F: Fn(BoxMessage) + Send + Sync> Handler for AnyHandler<F> {
    fn is_defined_at(&self, _msg: &BoxMessage) -> bool {
        true
    }
    fn invoke(&self, msg: BoxMessage) {
        (self.action)(msg)
    }
}

pub(crate) fn any(action: impl Fn(BoxMessage) + Send + Sync + 'static) -> Arc<dyn Handler> {
    Arc::new(AnyHandler { action })
}

impl Handler for MessageHandler {
    fn is_defined_at(&self, msg: &BoxMessage) -> bool {
        self.arms.iter().any(|a| a.matches(msg))
    }

    fn invoke(&self, msg: BoxMessage) {
        for arm in self.arms.iter() {
            if arm.matches(&msg) {
                arm.call(msg);
                return;
            }
        }
        unreachable!("invoke() called without a prior is_defined_at() match")
    }
}

/// sugar over [`MessageHandler`] that mirrors the case-block shape actors are usually written
/// with:
/// ```ignore
/// let h = receive!{
///     s: String => record(s),
///     n: i32 if n > 0 => record_positive(n),
/// };
/// ```
#[macro_export]
macro_rules! receive {
    ( $( $pat:ident : $ty:ty => $body:expr ),* $(,)? ) => {
        $crate::handler::MessageHandler::new()
            $( .on(move |$pat: $ty| { $body }) )*
            .build()
    };
}
