// src/session/poller.rs

use core::fmt::Debug;
use log::{debug, trace, warn};

use crate::common::{
    config::PollPolicy,
    error::Sps30Error,
    hal_traits::Sps30Timer,
    measurement::Measurement,
    timing,
};

/// Where the poller gets readiness and measurement data from.
pub(crate) trait MeasurementSource {
    type Error: Debug;

    /// Issues the data-ready query.
    fn query_data_ready(&mut self) -> Result<bool, Sps30Error<Self::Error>>;

    /// Reads and decodes one measurement.
    fn read_measured_values(&mut self) -> Result<Measurement, Sps30Error<Self::Error>>;
}

/// States of one measurement read.
#[derive(Debug, Copy, Clone, PartialEq)]
enum PollState {
    Polling { attempt: u32 },
    DataReady { attempt: u32 },
    Done(Measurement),
    Exhausted,
}

/// Waits for the data-ready flag, then reads one measurement.
///
/// A not-ready answer is the only thing retried. Transport errors and a
/// corrupted measurement end the read immediately, since the flag says
/// nothing about whether the next read would be intact.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ReadinessPoller {
    policy: PollPolicy,
}

impl ReadinessPoller {
    pub(crate) fn new(policy: PollPolicy) -> Self {
        Self { policy }
    }

    pub(crate) fn run<S, D>(&self, source: &mut S, timer: &mut D) -> Result<Measurement, Sps30Error<S::Error>>
    where
        S: MeasurementSource,
        D: Sps30Timer,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let backoff_ms = timing::as_delay_ms(self.policy.backoff);
        let mut state = PollState::Polling { attempt: 1 };

        loop {
            trace!("poll state {:?}", state);
            state = match state {
                PollState::Polling { attempt } if attempt > max_attempts => PollState::Exhausted,
                PollState::Polling { attempt } => {
                    if attempt > 1 {
                        timer.delay_ms(backoff_ms);
                    }
                    if source.query_data_ready()? {
                        PollState::DataReady { attempt }
                    } else {
                        PollState::Polling { attempt: attempt + 1 }
                    }
                }
                PollState::DataReady { attempt } => {
                    debug!("data ready after {} attempt(s)", attempt);
                    PollState::Done(source.read_measured_values()?)
                }
                PollState::Done(measurement) => return Ok(measurement),
                PollState::Exhausted => {
                    warn!("no data after {} attempts", max_attempts);
                    return Err(Sps30Error::NoDataAvailable);
                }
            };
        }
    }
}
