/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! integration coverage for the testable-properties scenarios in the specification this crate
//! implements (S1-S6): ping-pong, selective receive, timeout, trap-exit, cascade, sync reply.

use std::sync::mpsc;
use std::time::Duration;

use reed_actor::prelude::*;

#[test]
fn s1_ping_pong_via_react() {
    let (tx, rx) = mpsc::channel();

    let a = ActorRef::spawn("s1-a", |me| {
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

    ActorRef::spawn("s1-b", move |me| {
        a.send("ping".to_string());
        let _ = me.react(receive! {
            s: String => { if s == "pong" { let _ = tx.send("ok"); } }
        });
    });

    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "ok");
    wait_until_idle();
}

#[test]
fn s2_selective_receive_preserves_mailbox_order() {
    let (tx, rx) = mpsc::channel();

    let collector = ActorRef::spawn("s2-collector", move |me| {
        let result = me.receive(receive! { s: String => { let _ = tx.send(s); } });
        assert!(result.is_ok());
    });

    collector.send(1i32);
    collector.send("two".to_string());
    collector.send(3i32);

    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "two");
    wait_until_idle();
}

#[test]
fn s3_timeout_fires_without_a_message() {
    let (tx, rx) = mpsc::channel();
    let start = std::time::Instant::now();

    ActorRef::spawn("s3-waiter", move |me| {
        let result = me.receive_within(
            50,
            receive! {
                t: Timeout => { let _ = tx.send(format!("{t:?}")); }
            },
        );
        assert!(result.is_ok());
    });

    assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    assert!(start.elapsed() >= Duration::from_millis(50));
    wait_until_idle();
}

#[test]
fn s4_trap_exit_delivers_exit_as_a_message() {
    let (tx, rx) = mpsc::channel();

    let a = ActorRef::spawn("s4-a", |me| {
        let _ = me.receive(receive! { reason: String => { let _ = me.exit(reason); } });
    });

    ActorRef::spawn_linked("s4-b-trapping", &a, move |me| {
        me.set_trap_exit(true);
        let result = me.receive(receive! {
            e: Exit => { let _ = tx.send(e.reason.clone()); }
        });
        assert!(result.is_ok(), "trapping peer must not be terminated by the cascade");
    });

    a.send("boom".to_string());
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "boom");
    wait_until_idle();
}

#[test]
fn s5_abnormal_exit_cascades_to_non_trapping_peer() {
    let (tx, rx) = mpsc::channel();

    let a = ActorRef::spawn("s5-a", |me| {
        let _ = me.receive(receive! { reason: String => { let _ = me.exit(reason); } });
    });

    let c = ActorRef::spawn_linked("s5-c", &a, move |me| {
        // never replies; the cascade terminates this actor before any normal message would.
        let outcome = me.receive(receive! { _n: i32 => { let _ = tx.send(()); } });
        assert!(outcome.is_err(), "cascade must terminate a non-trapping linked peer");
    });

    a.send("boom".to_string());
    std::thread::sleep(Duration::from_millis(100));
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err(), "c must not have handled a real message");
    drop(c);
    wait_until_idle();
}

#[test]
fn s6_sync_replies_do_not_cross_talk() {
    let echo = ActorRef::spawn("s6-echo", |me| loop {
        let replier = me.clone();
        let step = me.receive(receive! {
            s: String => { let _ = replier.reply(format!("{s}!")); }
        });
        if step.is_err() {
            break;
        }
    });

    let echo_for_thread = echo.clone();
    let handle = std::thread::spawn(move || echo_for_thread.ask::<String, String>("q2".to_string()).unwrap());

    let r: String = echo.ask("q".to_string()).unwrap();
    let r2 = handle.join().unwrap();

    assert_eq!(r, "q!");
    assert_eq!(r2, "q2!");
    let _ = echo.exit("normal");
    wait_until_idle();
}
