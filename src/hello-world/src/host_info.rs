// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Host identity queries behind a small provider interface.
//!
//! Two providers ship with the crate: [`HostClock`] reads the host name and the local time,
//! [`Uname`] reads the full system identity with a single `uname(2)` call. Any closure returning
//! a [`SystemSnapshot`] is a provider as well, which lets callers substitute a canned or failing
//! query.
//!
//! Host fields are `OsString`s holding the bytes the kernel returned, UTF-8 or not.

use std::ffi::OsString;

use log::debug;
use utils::hostname::{HostnameError, hostname};
use utils::time::LocalTime;
use utils::uname::{UnameError, Utsname};

/// Errors raised while querying the host.
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum QueryError {
    /// Cannot read the host name: {0}
    Hostname(#[from] HostnameError),
    /// Cannot read the system identity: {0}
    Uname(#[from] UnameError),
}

/// Host information captured once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemSnapshot {
    /// Host name and local wall-clock time. Each is read on its own and is `None` if its query
    /// failed.
    Host {
        /// Network host name.
        hostname: Option<OsString>,
        /// Time of the query.
        time: Option<LocalTime>,
    },
    /// System identity as reported by `uname(2)`.
    Identity {
        /// Operating system name.
        os_name: OsString,
        /// Network node name.
        hostname: OsString,
        /// Kernel release.
        kernel_release: OsString,
        /// Machine architecture.
        machine: OsString,
    },
}

impl From<Utsname> for SystemSnapshot {
    fn from(name: Utsname) -> Self {
        SystemSnapshot::Identity {
            os_name: name.sysname,
            hostname: name.nodename,
            kernel_release: name.release,
            machine: name.machine,
        }
    }
}

/// Source of [`SystemSnapshot`]s.
pub trait HostInfoProvider {
    /// Queries the host.
    fn snapshot(&self) -> Result<SystemSnapshot, QueryError>;
}

impl<F> HostInfoProvider for F
where
    F: Fn() -> Result<SystemSnapshot, QueryError>,
{
    fn snapshot(&self) -> Result<SystemSnapshot, QueryError> {
        self()
    }
}

/// Reads the host name, then the local time. A failed host name query does not prevent reading
/// the time.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostClock;

impl HostInfoProvider for HostClock {
    fn snapshot(&self) -> Result<SystemSnapshot, QueryError> {
        Ok(host_snapshot(hostname(), LocalTime::now()))
    }
}

fn host_snapshot(
    hostname: Result<OsString, HostnameError>,
    time: Option<LocalTime>,
) -> SystemSnapshot {
    let hostname = match hostname {
        Ok(hostname) => Some(hostname),
        Err(err) => {
            debug!("Skipping the host name: {}", QueryError::from(err));
            None
        }
    };
    if time.is_none() {
        debug!("Skipping the current time: cannot convert the clock to local time");
    }
    SystemSnapshot::Host { hostname, time }
}

/// Reads the system identity with `uname(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uname;

impl HostInfoProvider for Uname {
    fn snapshot(&self) -> Result<SystemSnapshot, QueryError> {
        Ok(Utsname::get()?.into())
    }
}
