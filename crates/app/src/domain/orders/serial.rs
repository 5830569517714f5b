//! Order serial numbers.

use jiff::Timestamp;
use rand::Rng;

const SERIAL_PREFIX: &str = "ORD";

/// A human-facing order number, `ORD-<unix millis>-<4 random digits>`.
pub(crate) fn serial_number(now: Timestamp, rng: &mut impl Rng) -> String {
    format!(
        "{SERIAL_PREFIX}-{}-{}",
        now.as_millisecond(),
        rng.gen_range(1000..=9999)
    )
}

pub(crate) fn generate_serial_number() -> String {
    serial_number(Timestamp::now(), &mut rand::thread_rng())
}
