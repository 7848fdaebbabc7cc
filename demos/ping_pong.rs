/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the canonical dual-mode example: both actors detach via `react` rather than blocking a
//! thread, so the whole exchange runs without ever parking a worker in `receive`.

use reed_actor::prelude::*;

fn main() {
    init_tracing(&RuntimeConfig::default());

    let a = ActorRef::spawn("a", |me| {
        let replier = me.clone();
        let _ = me.react(receive! {
            s: String => {
                if s == "ping" {
                    if let Some(sender) = replier.sender() {
                        sender.send("pong".to_string());
                    }
                }
            }
        });
    });

    ActorRef::spawn("b", move |me| {
        a.send("ping".to_string());
        let _ = me.react(receive! {
            s: String => {
                if s == "pong" {
                    info!("b: received pong, done");
                }
            }
        });
    });

    wait_until_idle();
}
