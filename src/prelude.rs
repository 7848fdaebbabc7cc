/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the surface most callers need in one `use`.

pub use crate::actor::ActorRef;
pub use crate::config::{init_tracing, RuntimeConfig};
pub use crate::entry::current as self_actor;
pub use crate::errors::{ActorError, Result};
pub use crate::handler::{Handler, MessageHandler};
pub use crate::message::{BoxMessage, Exit, Message, Timeout};
pub use crate::receive;
pub use crate::scheduler::wait_until_idle;

pub use crate::{debug, error, info, trace, warn};
