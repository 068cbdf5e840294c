// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! End-to-end behavior of the free-function checkers.

use std::error::Error;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use insta::assert_snapshot;
use no_fault::{AssertionFailedError, Message, does_not_fail, does_not_fail_with, yields, yields_with};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq, Eq)]
struct Boom {
    id: u32,
}

impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boom #{}", self.id)
    }
}

impl Error for Boom {}

fn boom() -> Result<(), Boom> {
    Err(Boom { id: 7 })
}

fn boom_value() -> Result<u64, Boom> {
    Err(Boom { id: 8 })
}

fn panicking() {
    panic!("kaboom");
}

fn panicking_value() -> Result<u64, Boom> {
    panic!("kaboom {}", 2);
}

#[test]
fn void_success() {
    does_not_fail(|| {}).unwrap();
    does_not_fail(|| Ok::<(), Boom>(())).unwrap();
    does_not_fail_with(|| {}, "literal").unwrap();
    does_not_fail_with(|| {}, Message::deferred(String::new)).unwrap();
}

#[test]
fn value_success_returns_value_unchanged() {
    assert_eq!(yields(|| Ok::<_, Boom>(42)).unwrap(), 42);
    assert_eq!(yields_with(|| Ok::<_, Boom>("text"), "literal").unwrap(), "text");
    assert_eq!(
        yields_with(|| Ok::<_, Boom>(vec![1, 2]), Message::deferred(String::new)).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn void_error_without_message() {
    let failure = does_not_fail(boom).unwrap_err();

    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: checker::Boom");
    assert_eq!(failure.fault_type_name(), "checker::Boom");
    assert_eq!(failure.downcast_cause_ref::<Boom>(), Some(&Boom { id: 7 }));
}

#[test]
fn void_error_with_literal_message() {
    let failure = does_not_fail_with(boom, "custom message").unwrap_err();

    assert_snapshot!(failure.to_string(), @"custom message ==> Unexpected exception thrown: checker::Boom");
}

#[test]
fn void_error_with_deferred_message() {
    let failure = does_not_fail_with(boom, Message::deferred(|| "supplied".to_owned())).unwrap_err();

    assert_snapshot!(failure.to_string(), @"supplied ==> Unexpected exception thrown: checker::Boom");
}

#[test]
fn value_error_cause_is_the_original_fault() {
    let failure = yields_with(boom_value, "value").unwrap_err();

    assert_snapshot!(failure.to_string(), @"value ==> Unexpected exception thrown: checker::Boom");

    let source = failure.source().unwrap();
    assert_eq!(source.downcast_ref::<Boom>(), Some(&Boom { id: 8 }));
    assert_eq!(failure.downcast_cause::<Boom>().unwrap(), Boom { id: 8 });
}

#[test]
fn blank_messages_add_no_prefix() {
    let failure = does_not_fail_with(boom, "   ").unwrap_err();
    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: checker::Boom");

    let failure = yields_with(boom_value, Message::deferred(String::new)).unwrap_err();
    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: checker::Boom");

    let failure = yields_with(boom_value, None::<&str>).unwrap_err();
    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: checker::Boom");
}

#[test]
fn void_panic() {
    let failure = does_not_fail_with(panicking, "panicking").unwrap_err();

    assert_snapshot!(failure.to_string(), @"panicking ==> Unexpected exception thrown: &str");
    assert!(failure.is_panic());
    assert_eq!(failure.panic().unwrap().message(), Some("kaboom"));
}

#[test]
fn value_panic() {
    let failure = yields(panicking_value).unwrap_err();

    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: alloc::string::String");
    assert_eq!(failure.panic().unwrap().message(), Some("kaboom 2"));
    assert_eq!(failure.cause().to_string(), "panicked: kaboom 2");
}

#[test]
fn string_errors_report_their_own_type() {
    let failure = yields(|| Err::<u8, _>(String::from("plain"))).unwrap_err();

    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: alloc::string::String");
    assert_eq!(failure.cause().to_string(), "plain");
}

#[test]
fn deferred_message_is_not_evaluated_on_success() {
    let calls = AtomicUsize::new(0);
    let message = || {
        Message::deferred(|| {
            calls.fetch_add(1, Ordering::Relaxed);
            "expensive".to_owned()
        })
    };

    does_not_fail_with(|| {}, message()).unwrap();
    assert_eq!(yields_with(|| Ok::<_, Boom>(1), message()).unwrap(), 1);
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    let _ = does_not_fail_with(boom, message()).unwrap_err();
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn operation_runs_exactly_once() {
    let calls = AtomicUsize::new(0);

    let _ = yields(|| {
        calls.fetch_add(1, Ordering::Relaxed);
        boom_value()
    })
    .unwrap_err();

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn boxed_dyn_error_is_the_cause() {
    let error: Box<dyn Error> = "boom".into();
    let address = std::ptr::from_ref::<dyn Error>(&*error).cast::<()>();

    let failure = yields(move || -> Result<u8, Box<dyn Error>> { Err(error) }).unwrap_err();

    assert_eq!(std::ptr::from_ref::<dyn Error>(failure.cause()).cast::<()>(), address);
    assert_eq!(failure.cause().to_string(), "boom");
    assert!(failure.fault_type_name().starts_with("alloc::boxed::Box<dyn "), "{}", failure.fault_type_name());
}

#[test]
fn thread_bound_error_is_the_cause() {
    #[derive(Debug)]
    struct Counted(Rc<Cell<u32>>);

    impl fmt::Display for Counted {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "counted {}", self.0.get())
        }
    }

    impl Error for Counted {}

    let counter = Rc::new(Cell::new(3));
    let failure = does_not_fail(|| Err::<(), _>(Counted(Rc::clone(&counter)))).unwrap_err();

    assert_snapshot!(failure.to_string(), @"Unexpected exception thrown: checker::thread_bound_error_is_the_cause::Counted");

    let error = failure.downcast_cause::<Counted>().unwrap();
    assert!(Rc::ptr_eq(&error.0, &counter));
}

#[test]
fn send_sync_boxed_error_coerces() {
    let failure = yields(|| {
        let result: Result<u8, Box<dyn Error + Send + Sync>> = Err("shared boom".into());
        result.map_err(|error| -> Box<dyn Error> { error })
    })
    .unwrap_err();

    assert_eq!(failure.cause().to_string(), "shared boom");
}

#[test]
fn deferred_message_may_borrow_cell() {
    let hits = Cell::new(0);

    let failure = does_not_fail_with(
        boom,
        Message::deferred(|| {
            hits.set(hits.get() + 1);
            format!("attempt {}", hits.get())
        }),
    )
    .unwrap_err();

    assert_snapshot!(failure.to_string(), @"attempt 1 ==> Unexpected exception thrown: checker::Boom");
    assert_eq!(hits.get(), 1);
}

#[test]
fn composes_with_question_mark() -> Result<(), AssertionFailedError> {
    does_not_fail(|| Ok::<(), Boom>(()))?;
    let value = yields(|| Ok::<_, Boom>(5))?;

    assert_eq!(value, 5);
    Ok(())
}
