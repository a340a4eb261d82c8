//! Test fixtures shared across suites

use std::time::Duration;
use telegraph::core::PollTiming;

pub struct TestFixtures;

impl TestFixtures {
    pub const URL: &'static str = "ws://morse.autodidacts.io:8000/channel/lobby";

    /// A key press stamped the way the client stamps it
    pub const REMOTE_PRESS: &'static str = "11700000000000000v2";
    pub const REMOTE_RELEASE: &'static str = "01700000000092000v2";

    /// Production cadence: keep-alive only on the very first tick of a short test
    pub fn production_timing() -> PollTiming {
        PollTiming::default()
    }

    /// Keep-alive every third tick
    pub fn short_keepalive_timing() -> PollTiming {
        PollTiming::new(Duration::from_millis(10), Duration::from_millis(30))
    }
}
