/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! S2 from the testable-properties scenarios: send 1, "two", 3 (in that order) to an actor
//! that blocks in a selective `receive` for a `String`, then checks the mailbox order of
//! what's left behind.

use reed_actor::prelude::*;

fn main() {
    init_tracing(&RuntimeConfig::default());

    let collected = ActorRef::spawn("collector", |me| {
        let found = me.receive(receive! {
            s: String => { info!("collector: selected {s:?}"); }
        });
        if found.is_err() {
            error!("collector: selective receive failed");
            return;
        }

        // the two integers that didn't match the selective filter are still here, in order.
        let first = me.receive(receive! { n: i32 => { info!("collector: leftover {n}"); } });
        let second = me.receive(receive! { n: i32 => { info!("collector: leftover {n}"); } });
        debug_assert!(first.is_ok() && second.is_ok());
    });

    collected.send(1i32);
    collected.send("two".to_string());
    collected.send(3i32);

    wait_until_idle();
}
