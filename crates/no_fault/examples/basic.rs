// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates the checker and what a failure looks like.

use std::error::Error;

use no_fault::{Assertion, Message, does_not_fail, yields_with};

fn main() {
    does_not_fail(|| println!("this operation works")).unwrap();

    let port: u16 = yields_with(|| "8080".parse::<u16>(), "parsing port").unwrap();
    println!("parsed port {port}");

    let input = "eighty";
    let failure = yields_with(|| input.parse::<u16>(), Message::deferred(|| format!("parsing {input:?}"))).unwrap_err();
    println!("failure: {failure}");
    println!("cause: {}", failure.source().map_or_else(String::new, ToString::to_string));

    let failure = Assertion::new()
        .message("checking invariants")
        .check(|| assert!(input.is_empty(), "input must be empty"))
        .unwrap_err();
    println!("{}", failure.report());
}
