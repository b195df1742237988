// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Hello World demo programs for the custom recipe lab.
//!
//! Both binaries print a banner, a snapshot of the host, the arguments they were given and a
//! short attribution footer. They differ only in their [`Edition`] and in the
//! [`HostInfoProvider`] queried for the snapshot.

pub mod edition;
pub mod host_info;
pub mod logger;
pub mod reporter;

use std::ffi::OsString;
use std::io;

use log::info;

pub use crate::edition::Edition;
pub use crate::host_info::{HostClock, HostInfoProvider, QueryError, SystemSnapshot, Uname};
pub use crate::reporter::Reporter;

/// Recipe version printed in the banner.
pub const VERSION: &str = env!("HELLO_WORLD_VERSION");
/// Date of the build, `Mmm dd yyyy`.
pub const BUILD_DATE: &str = env!("HELLO_WORLD_BUILD_DATE");
/// Time of the build, `hh:mm:ss`.
pub const BUILD_TIME: &str = env!("HELLO_WORLD_BUILD_TIME");

/// Sets up logging and writes the report for the current process to standard output.
///
/// Only a failed write to standard output is returned; host query failures are absorbed by the
/// report itself.
pub fn run<P: HostInfoProvider>(edition: Edition, provider: P) -> io::Result<()> {
    logger::init_from_env(edition.default_program_name);

    let mut args = std::env::args_os();
    let program = args
        .next()
        .unwrap_or_else(|| OsString::from(edition.default_program_name));
    let args: Vec<OsString> = args.collect();

    info!(
        "Running {} v{VERSION} with {} argument(s)",
        edition.default_program_name,
        args.len()
    );

    let reporter = Reporter::new(edition, provider);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    reporter.run(&mut out, &program, &args)
}
