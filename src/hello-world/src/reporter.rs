// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use log::debug;

use crate::VERSION;
use crate::edition::Edition;
use crate::host_info::{HostInfoProvider, SystemSnapshot};

/// Writes the demo report: banner, system information, argument echo and footer.
#[derive(Debug)]
pub struct Reporter<P> {
    edition: Edition,
    provider: P,
}

impl<P: HostInfoProvider> Reporter<P> {
    /// Creates a reporter for the given edition, querying the host through `provider`.
    pub fn new(edition: Edition, provider: P) -> Self {
        Reporter { edition, provider }
    }

    /// Writes the whole report to `out`.
    ///
    /// # Arguments
    ///
    /// * `program` - Invocation name, shown in the usage hint.
    /// * `args` - Arguments following the invocation name, echoed verbatim.
    pub fn run<W: Write>(&self, out: &mut W, program: &OsStr, args: &[OsString]) -> io::Result<()> {
        self.write_banner(out)?;
        self.write_system_info(out)?;
        self.write_arguments(out, program, args)?;
        self.write_footer(out)?;
        out.flush()
    }

    fn write_banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = self.edition.rule();
        writeln!(out, "{rule}")?;
        writeln!(out, "  {}", self.edition.title)?;
        writeln!(out, "  Version: {VERSION}")?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        if !self.edition.greeting.is_empty() {
            for line in &self.edition.greeting {
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_system_info<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = match self.provider.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!("Skipping system information: {err}");
                return Ok(());
            }
        };

        match snapshot {
            SystemSnapshot::Host { hostname, time } => {
                if let Some(hostname) = hostname {
                    write_raw_line(out, "Running on: ", &hostname)?;
                }
                if let Some(time) = time {
                    writeln!(out, "Current time: {}", time.ctime())?;
                }
            }
            SystemSnapshot::Identity {
                os_name,
                hostname,
                kernel_release,
                machine,
            } => {
                writeln!(out, "System Information:")?;
                write_raw_line(out, "  OS Name:    ", &os_name)?;
                write_raw_line(out, "  Hostname:   ", &hostname)?;
                write_raw_line(out, "  Kernel:     ", &kernel_release)?;
                write_raw_line(out, "  Arch:       ", &machine)?;
            }
        }
        Ok(())
    }

    fn write_arguments<W: Write>(
        &self,
        out: &mut W,
        program: &OsStr,
        args: &[OsString],
    ) -> io::Result<()> {
        writeln!(out)?;
        if args.is_empty() {
            out.write_all(b"Usage: ")?;
            out.write_all(program.as_bytes())?;
            out.write_all(b" [optional arguments...]\n")?;
            return Ok(());
        }

        writeln!(out, "Command-line arguments received:")?;
        for (i, arg) in args.iter().enumerate() {
            write_raw_line(out, &format!("  [{}]: ", i + 1), arg)?;
        }
        Ok(())
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        for line in &self.edition.footer {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

// OS strings are written byte for byte, without any UTF-8 conversion.
fn write_raw_line<W: Write>(out: &mut W, label: &str, value: &OsStr) -> io::Result<()> {
    out.write_all(label.as_bytes())?;
    out.write_all(value.as_bytes())?;
    out.write_all(b"\n")
}
