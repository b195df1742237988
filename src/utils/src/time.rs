// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Structure representing the date in local time with nanosecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTime {
    /// Seconds in current minute.
    sec: i32,
    /// Minutes in current hour.
    min: i32,
    /// Hours in current day, 24H format.
    hour: i32,
    /// Days in current month.
    mday: i32,
    /// Months in current year.
    mon: i32,
    /// Years passed since 1900.
    year: i32,
    /// Days since Sunday.
    wday: i32,
    /// Nanoseconds in current second.
    nsec: i64,
}

impl LocalTime {
    /// Returns the [LocalTime](struct.LocalTime.html) structure for the calling moment, or `None`
    /// if the clock cannot be converted to local time.
    pub fn now() -> Option<LocalTime> {
        let mut timespec = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: Safe because the parameters are valid.
        unsafe {
            libc::clock_gettime(libc::CLOCK_REALTIME, &mut timespec);
        }
        // `tv_nsec` is narrower than `i64` on 32-bit targets.
        #[allow(clippy::useless_conversion)]
        let nsec = i64::from(timespec.tv_nsec);
        Self::at(timespec.tv_sec, nsec)
    }

    /// Converts a point in time, given as seconds and nanoseconds since the Unix epoch, to the
    /// local time zone. Returns `None` when `localtime_r(3)` fails, e.g. on year overflow.
    pub fn at(secs: libc::time_t, nsec: i64) -> Option<LocalTime> {
        // SAFETY: `libc::tm` is plain data, the null `tm_zone` pointer is overwritten by
        // `localtime_r` and never dereferenced here.
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        // SAFETY: Safe because the parameters are valid.
        let res = unsafe { libc::localtime_r(&secs, &mut tm) };
        if res.is_null() {
            return None;
        }

        Some(LocalTime {
            sec: tm.tm_sec,
            min: tm.tm_min,
            hour: tm.tm_hour,
            mday: tm.tm_mday,
            mon: tm.tm_mon,
            year: tm.tm_year,
            wday: tm.tm_wday,
            nsec,
        })
    }

    /// Renders the time the way `ctime(3)` does, minus the trailing newline.
    ///
    /// ```
    /// # use utils::time::LocalTime;
    /// let rendered = LocalTime::now().unwrap().ctime();
    /// assert_eq!(rendered.len(), 24);
    /// ```
    pub fn ctime(&self) -> String {
        format!(
            "{} {} {:2} {:02}:{:02}:{:02} {}",
            name_at(&WEEKDAYS, self.wday),
            name_at(&MONTHS, self.mon),
            self.mday,
            self.hour,
            self.min,
            self.sec,
            self.year + 1900
        )
    }
}

fn name_at(names: &[&'static str], index: i32) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| names.get(i))
        .copied()
        .unwrap_or("???")
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            self.year + 1900,
            self.mon + 1,
            self.mday,
            self.hour,
            self.min,
            self.sec,
            self.nsec
        )
    }
}
