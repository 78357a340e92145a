// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Age and timestamp rendering.
//!
//! Records only keep their creation time in epoch milliseconds; every
//! human-readable form is derived here at render time.

use crate::infrastructure::constants::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Short age in the style of the AGE column: `0s`, `42m`, `5h`, `45d`.
pub fn format_age(created_ms: i64, now_ms: i64) -> String {
    let elapsed = (now_ms - created_ms).max(0);

    if elapsed < MILLIS_PER_MINUTE {
        format!("{}s", elapsed / MILLIS_PER_SECOND)
    } else if elapsed < MILLIS_PER_HOUR {
        format!("{}m", elapsed / MILLIS_PER_MINUTE)
    } else if elapsed < MILLIS_PER_DAY {
        format!("{}h", elapsed / MILLIS_PER_HOUR)
    } else {
        format!("{}d", elapsed / MILLIS_PER_DAY)
    }
}

fn to_datetime(epoch_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(epoch_ms).unwrap_or_default()
}

/// `2024-11-10T10:23:15Z`
pub fn rfc3339(epoch_ms: i64) -> String {
    to_datetime(epoch_ms).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `Sun, 10 Nov 2024 10:23:15 +0000`, as used by describe output.
pub fn describe_time(epoch_ms: i64) -> String {
    to_datetime(epoch_ms)
        .format("%a, %d %b %Y %H:%M:%S %z")
        .to_string()
}

/// `2024-11-10 10:23:15.234 +0000 UTC`, the UPDATED column of a release listing.
pub fn release_time(epoch_ms: i64) -> String {
    to_datetime(epoch_ms)
        .format("%Y-%m-%d %H:%M:%S%.3f +0000 UTC")
        .to_string()
}

/// `Sun Nov 10 10:23:15 2024`, as printed by LAST DEPLOYED.
pub fn deployed_time(epoch_ms: i64) -> String {
    to_datetime(epoch_ms).format("%a %b %e %H:%M:%S %Y").to_string()
}

/// `2024-11-10T10:23:15.234Z`, the prefix of a container log line.
pub fn log_time(epoch_ms: i64) -> String {
    to_datetime(epoch_ms)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_731_234_195_000; // 2024-11-10T10:23:15Z

    #[test]
    fn test_format_age_units() {
        assert_eq!(format_age(NOW, NOW), "0s");
        assert_eq!(format_age(NOW - 42 * MILLIS_PER_SECOND, NOW), "42s");
        assert_eq!(format_age(NOW - 5 * MILLIS_PER_MINUTE, NOW), "5m");
        assert_eq!(format_age(NOW - 3 * MILLIS_PER_HOUR, NOW), "3h");
        assert_eq!(format_age(NOW - 45 * MILLIS_PER_DAY, NOW), "45d");
    }

    #[test]
    fn test_format_age_clamps_future() {
        assert_eq!(format_age(NOW + MILLIS_PER_HOUR, NOW), "0s");
    }

    #[test]
    fn test_timestamp_renderings() {
        assert_eq!(rfc3339(NOW), "2024-11-10T10:23:15Z");
        assert_eq!(describe_time(NOW), "Sun, 10 Nov 2024 10:23:15 +0000");
        assert_eq!(release_time(NOW), "2024-11-10 10:23:15.000 +0000 UTC");
        assert_eq!(deployed_time(NOW), "Sun Nov 10 10:23:15 2024");
        assert_eq!(log_time(NOW + 234), "2024-11-10T10:23:15.234Z");
    }
}
