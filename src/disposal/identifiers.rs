//! Folio and verification-code generation.
//!
//! Both identifiers are pure functions of an explicit instant (and, for the
//! verification code, an explicit random source) so they can be replayed in
//! tests. Production wiring passes [`SystemClock`] and the thread RNG.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use rand::Rng;

pub const FOLIO_PREFIX: &str = "BAJA";
pub const VERIFICATION_PREFIX: &str = "ZIII";

const FRAGMENT_LEN: usize = 4;
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Identifiers minted for a single certificate. Never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdentifiers {
    pub folio: String,
    pub verification_code: String,
}

impl GeneratedIdentifiers {
    pub fn mint<Tz, R>(asset_tag: &str, serial_number: &str, now: &DateTime<Tz>, rng: &mut R) -> Self
    where
        Tz: TimeZone,
        R: Rng + ?Sized,
    {
        Self {
            folio: make_folio(now),
            verification_code: make_verification_code(asset_tag, serial_number, now, rng),
        }
    }
}

/// `BAJA-YYYYMMDD-HHMMSSmmm` from the UTC calendar fields of `now`.
///
/// Local fields would repeat an hour when a DST offset falls back, so the
/// folio is always rendered in UTC.
pub fn make_folio<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!(
        "{FOLIO_PREFIX}-{}",
        now.with_timezone(&Utc).format("%Y%m%d-%H%M%S%3f")
    )
}

/// `ZIII-{asset}-{serial}-{base36 ms}-{random}`, total over any input.
pub fn make_verification_code<Tz, R>(
    asset_tag: &str,
    serial_number: &str,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> String
where
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    format!(
        "{VERIFICATION_PREFIX}-{}-{}-{}-{}",
        asset_fragment(asset_tag),
        serial_fragment(serial_number),
        to_base36(now.timestamp_millis()),
        random_suffix(rng),
    )
}

fn normalize(value: &str) -> Vec<char> {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// First four normalized characters, right-padded with `X`.
fn asset_fragment(asset_tag: &str) -> String {
    let mut fragment: String = normalize(asset_tag).into_iter().take(FRAGMENT_LEN).collect();
    while fragment.len() < FRAGMENT_LEN {
        fragment.push('X');
    }
    fragment
}

/// Last four normalized characters, left-padded with `0`.
fn serial_fragment(serial_number: &str) -> String {
    let chars = normalize(serial_number);
    let start = chars.len().saturating_sub(FRAGMENT_LEN);
    let tail: String = chars[start..].iter().collect();
    format!("{tail:0>width$}", width = FRAGMENT_LEN)
}

fn to_base36(value: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut n = value.unsigned_abs();
    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..FRAGMENT_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}
