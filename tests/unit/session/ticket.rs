use std::time::Duration;

use super::*;

#[test]
fn ticket_tracks_the_counter() {
    let (tx, rx) = watch::channel(1);
    let ticket = RenderTicket::new(1, rx);
    assert!(ticket.is_current());
    tx.send_modify(|g| *g += 1);
    assert!(!ticket.is_current());
    assert_eq!(ticket.generation(), 1);
}

#[tokio::test]
async fn guard_completes_while_current() {
    let (_tx, rx) = watch::channel(3);
    let mut ticket = RenderTicket::new(3, rx);
    assert_eq!(ticket.guard(async { 7 }).await, Some(7));
}

#[tokio::test]
async fn guard_returns_none_for_a_stale_ticket() {
    let (tx, rx) = watch::channel(1);
    let mut ticket = RenderTicket::new(1, rx);
    tx.send_replace(2);
    assert_eq!(ticket.guard(async { 7 }).await, None);
}

#[tokio::test(start_paused = true)]
async fn bump_wakes_a_pending_wait() {
    let (tx, rx) = watch::channel(1);
    let mut ticket = RenderTicket::new(1, rx);
    let bump = async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        tx.send_modify(|g| *g += 1);
    };
    let (out, ()) = tokio::join!(ticket.guard(std::future::pending::<()>()), bump);
    assert_eq!(out, None);
}

#[tokio::test(start_paused = true)]
async fn detached_ticket_never_goes_stale() {
    let mut ticket = RenderTicket::detached();
    assert!(ticket.is_current());
    let out = ticket
        .guard(tokio::time::sleep(Duration::from_millis(50)))
        .await;
    assert_eq!(out, Some(()));
}
