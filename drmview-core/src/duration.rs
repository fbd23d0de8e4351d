//! Compact duration tokens such as `PT1H30M15S`.
//!
//! Metadata sources report content length as digit runs closed by unit
//! markers. Only `H`, `M` and `S` are recognized; every other character is
//! skipped without disturbing the digits collected so far.

const SECONDS_PER_HOUR: u32 = 3600;
const SECONDS_PER_MINUTE: u32 = 60;

/// Converts a duration token into whole seconds.
///
/// Each marker closes the digit run accumulated since the previous marker and
/// adds `digits * unit` to the total. Digits left without a closing marker at
/// the end of the input do not contribute. A run too long to fit in 32 bits
/// contributes nothing.
///
/// # Examples
/// ```
/// use drmview_core::duration::parse_duration_seconds;
///
/// assert_eq!(parse_duration_seconds("PT1H30M15S"), 5415);
/// assert_eq!(parse_duration_seconds("10M30S"), 630);
/// assert_eq!(parse_duration_seconds(""), 0);
/// ```
pub fn parse_duration_seconds(token: &str) -> u32 {
    let mut total: u32 = 0;
    let mut run: Option<u32> = Some(0);

    for byte in token.bytes() {
        let unit = match byte {
            b'0'..=b'9' => {
                let digit = u32::from(byte - b'0');
                run = run
                    .and_then(|value| value.checked_mul(10))
                    .and_then(|value| value.checked_add(digit));
                continue;
            }
            b'H' => SECONDS_PER_HOUR,
            b'M' => SECONDS_PER_MINUTE,
            b'S' => 1,
            _ => continue,
        };

        if let Some(value) = run {
            total = total.saturating_add(value.saturating_mul(unit));
        }
        run = Some(0);
    }

    total
}

/// Formats seconds as `H:MM:SS`.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = seconds % SECONDS_PER_MINUTE;

    format!("{hours}:{minutes:02}:{seconds:02}")
}
