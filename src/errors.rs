/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActorError>;

#[derive(Error, Debug)]
pub enum ActorError {
    /// not a failure: the control-flow signal `exit()`/a should-exit cascade produces. A step
    /// function propagates this with `?` the same way it would any other error; the runtime
    /// treats it as ordinary termination rather than a crash.
    #[error("actor exited: {0}")]
    Exited(String),

    #[error("receiver closed")]
    ReceiverClosed,

    #[error("timeout error: {0:?}")]
    Timeout(Duration),

    #[error("unhandled timeout in '{0}'")]
    UnhandledTimeout(String),

    #[error("selective operation invoked from outside the owning actor '{0}'")]
    WrongThread(String),

    #[error("'{0}' is not currently awaiting a reply")]
    NoPendingSession(String),

    #[error("config parse error {0}")]
    ConfigParseError(String),

    #[error("poisoned lock error {0}")]
    PoisonedLockError(String),

    #[error("{op} failed for {failed} out of {all} items")]
    IterOpFailed { op: String, all: usize, failed: usize },

    #[error("operation failed {0}")]
    OpFailed(String),
}

pub fn poisoned_lock(op: impl ToString) -> ActorError {
    ActorError::PoisonedLockError(op.to_string())
}

pub fn op_failed(msg: impl ToString) -> ActorError {
    ActorError::OpFailed(msg.to_string())
}
