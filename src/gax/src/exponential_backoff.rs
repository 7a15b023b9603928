// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Exponential backoff for retries and long-running operation polls.
//!
//! The delay after `n` failures is `initial_delay * scaling^(n - 1)`, capped
//! at `maximum_delay`. Retries spread each delay by up to 20% in either
//! direction so clients throttled together do not retry together. Polls use
//! the delay as computed; the service paces them with `Retry-After`.

use std::time::{Duration, Instant};

/// The spread applied to retry delays, as a fraction of the delay.
const JITTER: f64 = 0.2;

/// Invalid [ExponentialBackoff] parameters.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("the scaling factor must be at least 1.0, got {0}")]
    Scaling(f64),
    #[error("the initial delay must be positive")]
    ZeroInitialDelay,
    #[error("the maximum delay ({maximum:?}) is shorter than the initial delay ({initial:?})")]
    MaximumBelowInitial { initial: Duration, maximum: Duration },
}

/// Configures an [ExponentialBackoff].
///
/// # Example
/// ```
/// # use cloud_network_gax::exponential_backoff::*;
/// use std::time::Duration;
/// let policy = ExponentialBackoff::builder()
///     .with_initial_delay(Duration::from_secs(2))
///     .with_scaling(1.5)
///     .without_jitter()
///     .build()?;
/// # Ok::<(), BuildError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder {
    policy: ExponentialBackoff,
}

impl ExponentialBackoffBuilder {
    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.policy.initial_delay = v.into();
        self
    }

    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.policy.maximum_delay = v.into();
        self
    }

    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.policy.scaling = v.into();
        self
    }

    /// Retries wait exactly the computed delay.
    pub fn without_jitter(mut self) -> Self {
        self.policy.jitter = false;
        self
    }

    pub fn build(self) -> Result<ExponentialBackoff, BuildError> {
        let p = self.policy;
        if p.scaling.is_nan() || p.scaling < 1.0 {
            return Err(BuildError::Scaling(p.scaling));
        }
        if p.initial_delay.is_zero() {
            return Err(BuildError::ZeroInitialDelay);
        }
        if p.maximum_delay < p.initial_delay {
            return Err(BuildError::MaximumBelowInitial {
                initial: p.initial_delay,
                maximum: p.maximum_delay,
            });
        }
        Ok(p)
    }
}

/// Exponential backoff with optional jitter.
///
/// The default starts at one second, doubles on each failure, and stops
/// growing at one minute.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
    jitter: bool,
}

impl ExponentialBackoff {
    /// Starts from the default parameters.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder {
            policy: Self::default(),
        }
    }

    /// The delay after `attempt_count` failures, before any jitter.
    pub(crate) fn delay(&self, attempt_count: u32) -> Duration {
        let exponent = i32::try_from(attempt_count.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.scaling.powi(exponent);
        // Compare factors first, `mul_f64` panics on overflow.
        if factor >= self.maximum_delay.div_duration_f64(self.initial_delay) {
            return self.maximum_delay;
        }
        self.initial_delay.mul_f64(factor)
    }

    fn jittered(&self, delay: Duration, rng: &mut impl rand::Rng) -> Duration {
        if !self.jitter {
            return delay;
        }
        let spread = rng.random_range(1.0 - JITTER..=1.0 + JITTER);
        Duration::try_from_secs_f64(delay.as_secs_f64() * spread)
            .map_or(self.maximum_delay, |d| d.min(self.maximum_delay))
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
            jitter: true,
        }
    }
}

impl crate::backoff_policy::BackoffPolicy for ExponentialBackoff {
    fn on_failure(&self, _loop_start: Instant, attempt_count: u32) -> Duration {
        self.jittered(self.delay(attempt_count), &mut rand::rng())
    }
}

impl crate::polling_policy::PollingBackoffPolicy for ExponentialBackoff {
    fn wait_period(&self, _loop_start: Instant, attempt_count: u32) -> Duration {
        self.delay(attempt_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff_policy::BackoffPolicy;
    use crate::polling_policy::PollingBackoffPolicy;
    use rand::SeedableRng;
    use test_case::test_case;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test_case(ExponentialBackoff::builder().with_scaling(0.5), BuildError::Scaling(0.5))]
    #[test_case(ExponentialBackoff::builder().with_initial_delay(Duration::ZERO), BuildError::ZeroInitialDelay)]
    #[test_case(
        ExponentialBackoff::builder().with_initial_delay(secs(10)).with_maximum_delay(secs(5)),
        BuildError::MaximumBelowInitial { initial: secs(10), maximum: secs(5) }
    )]
    fn invalid(builder: ExponentialBackoffBuilder, want: BuildError) {
        let got = builder.build();
        assert_eq!(got.as_ref().err(), Some(&want), "{got:?}");
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let policy = ExponentialBackoff::builder().build()?;
        assert_eq!(policy.delay(1), secs(1));
        assert_eq!(policy.delay(7), secs(60));
        assert!(policy.jitter);
        Ok(())
    }

    #[test_case(1, 3)]
    #[test_case(2, 6)]
    #[test_case(3, 12)]
    #[test_case(4, 20)]
    #[test_case(u32::MAX, 20)]
    fn polling_delays(attempt_count: u32, want: u64) -> anyhow::Result<()> {
        let policy = ExponentialBackoff::builder()
            .with_initial_delay(secs(3))
            .with_maximum_delay(secs(20))
            .build()?;
        assert_eq!(policy.wait_period(Instant::now(), attempt_count), secs(want));
        Ok(())
    }

    #[test]
    fn jitter_stays_near_delay() -> anyhow::Result<()> {
        let policy = ExponentialBackoff::builder()
            .with_initial_delay(secs(10))
            .with_maximum_delay(secs(100))
            .build()?;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let d = policy.jittered(secs(10), &mut rng);
            assert!(d >= secs(8) && d <= secs(12), "{d:?}");
        }
        // Jitter never exceeds the maximum.
        let d = policy.jittered(secs(100), &mut rng);
        assert!(d <= secs(100), "{d:?}");
        Ok(())
    }

    #[test]
    fn retries_without_jitter() -> anyhow::Result<()> {
        let policy = ExponentialBackoff::builder()
            .with_initial_delay(secs(2))
            .without_jitter()
            .build()?;
        assert_eq!(policy.on_failure(Instant::now(), 1), secs(2));
        assert_eq!(policy.on_failure(Instant::now(), 2), secs(4));
        Ok(())
    }
}
