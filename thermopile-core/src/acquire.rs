//! Frame acquisition
//!
//! One acquisition is: command write, device measurement time, chunked
//! bulk read of the whole frame. Bus failures retry the *whole* frame;
//! retrying a single chunk risks a torn frame when our chunk boundary is
//! out of phase with the device's read pointer.
//!
//! Acquisition does not check the PEC. A frame that arrives intact at the
//! bus level is returned as-is and verified by the caller.

use thermopile_hal::Transport;

use crate::config::AcquisitionConfig;
use crate::error::Error;
use crate::log::{error, trace, warn};
use crate::model::SensorModel;

/// Read one raw frame from the device into `raw`
///
/// `raw` must be exactly `model.frame_len()` bytes. It is zeroed before
/// every attempt and left zeroed if all attempts fail, so stale data can
/// never pass for a fresh frame.
///
/// Returns the number of attempts used (1 on a clean read).
pub fn acquire_frame<T: Transport>(
    transport: &mut T,
    model: &SensorModel,
    raw: &mut [u8],
    config: &AcquisitionConfig,
) -> Result<u8, Error> {
    if raw.len() != model.frame_len() {
        return Err(Error::InvalidRequest);
    }

    let attempts = config.max_attempts.max(1);
    let ready_ms = config.ready_ms.unwrap_or(model.ready_ms);
    let chunk = config.chunk_len();

    for attempt in 1..=attempts {
        raw.fill(0);

        match transport.transact(model.command, ready_ms, raw, chunk) {
            Ok(()) => {
                trace!("{}: frame read on attempt {}", model.name, attempt);
                return Ok(attempt);
            }
            Err(_) => {
                warn!(
                    "{}: frame read failed (attempt {}/{})",
                    model.name, attempt, attempts
                );
                if attempt < attempts {
                    transport.delay_ms(config.backoff_ms);
                }
            }
        }
    }

    raw.fill(0);
    error!("{}: giving up after {} attempts", model.name, attempts);
    Err(Error::TransportExhausted)
}
