// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Size of the buffer handed to `gethostname(2)`. POSIX caps host names at 255 bytes.
pub const HOSTNAME_BUF_LEN: usize = 256;

/// Errors returned by [`hostname`].
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum HostnameError {
    /// gethostname failed: {0}
    Gethostname(std::io::Error),
}

/// Returns the host name of the running system, bytes as the kernel reports them.
pub fn hostname() -> Result<OsString, HostnameError> {
    let mut buf = [0u8; HOSTNAME_BUF_LEN];
    // SAFETY: Safe because `buf` is valid for writes of `buf.len()` bytes.
    let res = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if res != 0 {
        return Err(HostnameError::Gethostname(std::io::Error::last_os_error()));
    }
    Ok(parse_hostname(&buf))
}

// A truncated name may come back without a NUL terminator, in which case the whole buffer is used.
fn parse_hostname(buf: &[u8]) -> OsString {
    let len = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    OsString::from_vec(buf[..len].to_vec())
}

#[cfg(test)]
mod tests {
    use std::os::unix::ffi::OsStrExt;

    use super::*;

    #[test]
    fn test_hostname() {
        let name = hostname().unwrap();
        assert!(name.len() < HOSTNAME_BUF_LEN);
        assert!(!name.as_bytes().contains(&0));
    }

    #[test]
    fn test_parse_hostname() {
        assert_eq!(parse_hostname(b"jetson-orin\0\0\0"), "jetson-orin");
        assert_eq!(parse_hostname(b"\0garbage"), "");
        assert_eq!(parse_hostname(b"no-terminator"), "no-terminator");
        // Not UTF-8, kept byte for byte.
        assert_eq!(
            parse_hostname(b"bad\xffhost\0").as_bytes(),
            b"bad\xffhost"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = HostnameError::Gethostname(std::io::Error::from_raw_os_error(libc::EFAULT));
        assert!(err.to_string().starts_with("gethostname failed: "));
    }
}
