// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use hello_world::{Edition, Uname};
use log::warn;

fn main() {
    if let Err(err) = hello_world::run(Edition::yocto(), Uname) {
        warn!("Failed to write the report: {err}");
    }
}
