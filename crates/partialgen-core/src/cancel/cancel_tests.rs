#![allow(non_snake_case)]

use super::*;

#[test]
fn CancellationToken___new___not_cancelled() {
    let token = CancellationToken::new();

    assert!(!token.is_cancelled());
    assert!(token.check().is_ok());
}

#[test]
fn CancellationToken___cancel___sets_cancelled() {
    let token = CancellationToken::new();

    token.cancel();

    assert!(token.is_cancelled());
}

#[test]
fn CancellationToken___cancel___idempotent() {
    let token = CancellationToken::new();

    token.cancel();
    token.cancel();

    assert!(token.is_cancelled());
}

#[test]
fn CancellationToken___clone___shares_flag() {
    let token = CancellationToken::new();
    let clone = token.clone();

    token.cancel();

    assert!(clone.is_cancelled());
}

#[test]
fn CancellationToken___check___returns_cancelled_error() {
    let token = CancellationToken::new();
    token.cancel();

    let result = token.check();

    assert!(matches!(result, Err(GenError::Cancelled)));
}

#[test]
fn CancellationToken___cancel_from_other_thread___is_observed() {
    let token = CancellationToken::new();
    let remote = token.clone();

    std::thread::spawn(move || remote.cancel()).join().unwrap();

    assert!(token.is_cancelled());
}
