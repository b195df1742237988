// Copyright 2021 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

use libc::{c_char, uname, utsname};

/// Errors returned by [`Utsname::get`].
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum UnameError {
    /// uname failed: {0}
    Uname(std::io::Error),
}

/// Identity of the running system, as reported by `uname(2)`. The fields keep the kernel's bytes
/// and need not be UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utsname {
    /// Operating system name (e.g. `Linux`).
    pub sysname: OsString,
    /// Network node name.
    pub nodename: OsString,
    /// Kernel release (e.g. `5.15.148-tegra`).
    pub release: OsString,
    /// Hardware identifier (e.g. `aarch64`).
    pub machine: OsString,
}

impl Utsname {
    /// Queries the kernel for the system identity.
    pub fn get() -> Result<Self, UnameError> {
        // SAFETY: `utsname` only holds fixed size char arrays, for which all zeroes is valid.
        let mut name: utsname = unsafe { std::mem::zeroed() };
        // SAFETY: Safe because the parameter is a valid, writable `utsname`.
        let res = unsafe { uname(&mut name) };

        if res < 0 {
            return Err(UnameError::Uname(std::io::Error::last_os_error()));
        }

        Ok(Self {
            sysname: field_to_os_string(&name.sysname),
            nodename: field_to_os_string(&name.nodename),
            release: field_to_os_string(&name.release),
            machine: field_to_os_string(&name.machine),
        })
    }
}

// The fields are NUL terminated, but a full array without terminator is accepted as well.
#[allow(clippy::cast_sign_loss)]
fn field_to_os_string(raw: &[c_char]) -> OsString {
    let bytes = raw
        .iter()
        .take_while(|c| **c != 0)
        .map(|c| *c as u8)
        .collect();
    OsString::from_vec(bytes)
}
