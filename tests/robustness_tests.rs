mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::event_file;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_rows_are_skipped() {
    let file = event_file(&[
        "1, add, Mug, 10, ,",
        // Unknown action
        "1, remove, Mug, 10, ,",
        // Unknown coupon type
        "1, coupon, , 10, apply_twice,",
        // Price is not a number
        "1, add, Poster, cheap, ,",
        "1, add, Pen, 2, ,",
    ]);

    let mut cmd = Command::new(cargo_bin!("coupon-cart"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading cart event"))
        .stdout(predicate::str::contains("1,12,2,0"));
}

#[test]
fn test_incomplete_events_are_rejected() {
    let file = event_file(&[
        // Product without a price
        "1, add, Mug, , ,",
        // Coupon without a type
        "1, coupon, , 10, ,",
        "1, add, Pen, 2, ,",
    ]);

    let mut cmd = Command::new(cargo_bin!("coupon-cart"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing cart event"))
        .stdout(predicate::str::contains("1,2,1,0"));
}

#[test]
fn test_rows_may_omit_trailing_columns() {
    let file = event_file(&["1, coupon, , 50, apply_next", "1, add, Mug, 10"]);

    let mut cmd = Command::new(cargo_bin!("coupon-cart"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,5,1,0"));
}

#[test]
fn test_overflowing_total_skips_product_and_keeps_other_carts() {
    let file = event_file(&[
        "1, add, Mug, 50000000000000000000000000000, ,",
        "1, add, Mug, 50000000000000000000000000000, ,",
        "2, add, Pen, 2, ,",
    ]);

    let mut cmd = Command::new(cargo_bin!("coupon-cart"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing cart event"))
        .stdout(predicate::str::contains("1,50000000000000000000000000000,1,0"))
        .stdout(predicate::str::contains("2,2,1,0"));
}

#[test]
fn test_overflowing_discount_keeps_coupon_for_next_product() {
    let file = event_file(&[
        "1, coupon, , 10, apply_next,",
        "1, add, Yacht, 50000000000000000000000000000, ,",
        "1, add, Pen, 2, ,",
    ]);

    let mut cmd = Command::new(cargo_bin!("coupon-cart"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing cart event"))
        .stdout(predicate::str::contains("1,1.8,1,0"));
}
