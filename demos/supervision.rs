/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! S4 and S5: a trapping peer turns a linked actor's abnormal exit into an ordinary message,
//! while a non-trapping peer is terminated by the same event.

use std::time::Duration;

use reed_actor::prelude::*;

fn main() {
    init_tracing(&RuntimeConfig::default());

    let a = ActorRef::spawn("a", |me| {
        // block until told to blow up, then exit abnormally - this is what both B and C link to.
        let _ = me.receive(receive! {
            reason: String => { let _ = me.exit(reason); }
        });
    });

    let b = ActorRef::spawn_linked("b-trapping", &a, |me| {
        me.set_trap_exit(true);
        let outcome = me.receive(receive! {
            e: Exit => { info!("b: saw {:?} from {} - not terminated", e.reason, e.from); }
        });
        debug_assert!(outcome.is_ok());
    });

    let c = ActorRef::spawn_linked("c-non-trapping", &a, |me| {
        // never traps; the cascade will terminate this actor before any message of its own
        // arrives, so this receive either never runs or returns the cascade's exit signal.
        let _ = me.receive(receive! { _n: i32 => {} });
    });

    a.send("boom".to_string());

    // give the cascade time to land before checking anything from the demo's own thread.
    std::thread::sleep(Duration::from_millis(100));

    info!("b trap_exit={} c trap_exit={}", b.trap_exit(), c.trap_exit());
    c.send(1i32); // dropped: c has already exited and accepts no further messages

    wait_until_idle();
}
