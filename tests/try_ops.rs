use effects::{Panicked, Try};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("broken pipe")]
struct Unrelated;

#[test]
fn of_returns_success() {
    let value = Try::of(|| 5 * 5);
    assert!(value.is_success());
    assert!(!value.is_failure());
    assert_eq!(value.get(), 25);
}

#[test]
fn of_captures_a_panic_as_failure() {
    let failed = Try::<i32>::of(|| panic!("Failed"));
    assert!(failed.is_failure());
    let error = failed.error().unwrap();
    assert_eq!(error.to_string(), "Failed");
    assert!(error.downcast_ref::<Panicked>().is_some());
}

#[test]
fn recover_matches_the_error_type() {
    let failed = Try::<i32>::of(|| panic!("Failed"));
    let recovered = failed.recover::<Panicked, _>(|| 7);
    assert!(recovered.is_success());
    assert_eq!(recovered.get(), 7);
}

#[test]
fn recover_skips_other_error_types() {
    let failed = Try::<i32>::of(|| panic!("Failed"));
    assert!(failed.recover::<Unrelated, _>(|| 7).is_failure());

    // success passes through untouched
    assert_eq!(Try::success(1).recover::<Panicked, _>(|| 7).get(), 1);
}

#[test]
fn failure_wraps_a_concrete_error() {
    let failed = Try::<i32>::failure(Unrelated);
    assert!(failed.is_failure());
    assert!(failed.error().unwrap().downcast_ref::<Unrelated>().is_some());
}

#[test]
fn flat_map_applies_on_success() {
    let squared = Try::success(5).flat_map(|v| Try::of(move || v * v));
    assert_eq!(squared.get(), 25);
}

#[test]
fn flat_map_passes_failure_through() {
    let failed = Try::<i32>::of(|| panic!("Failed")).flat_map(|v| Try::success(v + v));
    assert!(failed.is_failure());
}

#[test]
fn map_captures_a_panicking_function() {
    // map re-enters through Try::of, so the panic lands in the container
    let failed = Try::success(2).map(|_| -> i32 { panic!("boom") });
    assert!(failed.is_failure());
    assert_eq!(failed.error().unwrap().to_string(), "boom");
}

#[test]
fn map_transforms_success() {
    assert_eq!(Try::success(4).map(|v| v + v).get(), 8);
}

#[test]
#[should_panic(expected = "get called on Failure Try")]
fn get_panics_on_failure() {
    Try::<i32>::failure(Unrelated).get();
}

#[test]
fn extraction_helpers() {
    assert_eq!(Try::success(3).get_or_else(0), 3);
    assert_eq!(Try::<i32>::failure(Unrelated).get_or_else(0), 0);

    assert_eq!(Try::success(3).or_else_supply(|| 0), 3);
    assert_eq!(Try::<i32>::failure(Unrelated).or_else_supply(|| 0), 0);

    assert_eq!(Try::success(3).or_else(Try::success(0)).get(), 3);
    assert_eq!(Try::<i32>::failure(Unrelated).or_else(Try::success(0)).get(), 0);
}

#[test]
fn panic_message_is_preserved_for_string_payloads() {
    let with_format = Try::<i32>::of(|| panic!("failed at {}", 3));
    let error = with_format.error().unwrap();
    assert_eq!(error.downcast_ref::<Panicked>().unwrap().message(), "failed at 3");
}
