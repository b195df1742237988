// Copyright 2020 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Embeds the recipe version (`major.minor` of the package version) and the build date and time
// in the resulting binaries. When `SOURCE_DATE_EPOCH` is set the build is reproducible and the
// timestamp is taken from it, in UTC.
fn main() {
    let recipe_version = format!(
        "{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR")
    );
    println!("cargo:rustc-env=HELLO_WORLD_VERSION={}", recipe_version);

    // Like `__DATE__`/`__TIME__`, the timestamp follows the last rebuild of the sources.
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let (secs, utc) = match std::env::var("SOURCE_DATE_EPOCH") {
        Ok(epoch) => (
            epoch
                .trim()
                .parse::<libc::time_t>()
                .expect("SOURCE_DATE_EPOCH must be an integer number of seconds."),
            true,
        ),
        Err(_) => {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System clock is set before the Unix epoch.");
            (
                libc::time_t::try_from(now.as_secs()).expect("Time conversion overflow."),
                false,
            )
        }
    };

    // SAFETY: `libc::tm` is plain data and is fully written by the conversion below.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    // SAFETY: Safe because the parameters are valid.
    let res = unsafe {
        if utc {
            libc::gmtime_r(&secs, &mut tm)
        } else {
            libc::localtime_r(&secs, &mut tm)
        }
    };
    assert!(!res.is_null(), "Cannot convert the build timestamp.");

    let month = MONTHS[usize::try_from(tm.tm_mon).expect("Invalid month.")];
    // Same layout as the C `__DATE__` and `__TIME__` macros.
    println!(
        "cargo:rustc-env=HELLO_WORLD_BUILD_DATE={} {:2} {}",
        month,
        tm.tm_mday,
        tm.tm_year + 1900
    );
    println!(
        "cargo:rustc-env=HELLO_WORLD_BUILD_TIME={:02}:{:02}:{:02}",
        tm.tm_hour, tm.tm_min, tm.tm_sec
    );
}
