//! Interactive console sessions driven from scripted input.

mod common;

use std::io::Cursor;

use common::TestHarness;
use meter_billing_service::Console;

fn session(harness: &TestHarness, script: &str) -> String {
    let mut console = Console::new(Cursor::new(script.to_owned()), Vec::new());
    console.run(&harness.state).expect("console session failed");
    String::from_utf8(console.into_output()).expect("console output is UTF-8")
}

#[test]
fn full_session_prints_bill() {
    let harness = TestHarness::new();
    let output = session(
        &harness,
        "1\nM001\nAsha\n12 Lane\na@x.com\n\
         2\nM001\n2024-01\n250\n\
         3\nM001\n2024-01\n\
         4\n",
    );

    assert!(output.contains("===== Electricity Bill Generator ====="));
    assert!(output.contains("Customer added successfully."));
    assert!(output.contains("Usage recorded."));
    assert!(output.contains("Electricity Bill\n"));
    assert!(output.contains("Name         : Asha"));
    assert!(output.contains("Base Amount  : ₹1550.00"));
    assert!(output.contains("Total Amount : ₹1677.50"));
    assert!(output.trim_end().ends_with("Exiting..."));
}

#[test]
fn invalid_option_keeps_session_alive() {
    let harness = TestHarness::new();
    let output = session(&harness, "9\n4\n");

    assert!(output.contains("Invalid option."));
    assert!(output.contains("Exiting..."));
}

#[test]
fn errors_are_reported_and_session_continues() {
    let harness = TestHarness::new();
    let output = session(
        &harness,
        "2\nM404\n2024-01\n10\n\
         2\nM404\n2024-01\nlots\n\
         3\nM404\n2024-01\n\
         4\n",
    );

    assert!(output.contains("Error: unknown customer: M404"));
    assert!(output.contains("Error: invalid input: units must be a whole number"));
    assert!(output.contains("No usage record found for given month."));
    assert!(output.contains("Exiting..."));
}

#[test]
fn duplicate_customer_is_reported() {
    let harness = TestHarness::new();
    harness.add_asha();

    let output = session(&harness, "1\nM001\nOther\nElsewhere\no@x.com\n4\n");
    assert!(output.contains("Error: duplicate key in customers: M001"));
}

#[test]
fn end_of_input_ends_session() {
    let harness = TestHarness::new();

    // Input stops in the middle of adding a customer
    let output = session(&harness, "1\nM001\nAsha\n");
    assert!(!output.contains("Customer added successfully."));
    assert!(harness
        .state
        .store
        .get_customer(&"M001".parse().unwrap())
        .unwrap()
        .is_none());
}

#[test]
fn windows_line_endings_are_accepted() {
    let harness = TestHarness::new();
    let output = session(&harness, "1\r\nM001\r\nAsha\r\n12 Lane\r\na@x.com\r\n4\r\n");

    assert!(output.contains("Customer added successfully."));
    let customer = harness
        .state
        .store
        .get_customer(&"M001".parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(customer.email, "a@x.com");
}
