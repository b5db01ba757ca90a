//! Ephemeral state of a simulated connection.
//!
//! A [`Session`] is created when the connection reaches `Connected` and
//! dropped when it leaves. It owns the elapsed-time counter, the rate sampler,
//! the generated address, and the browser simulation, so none of them can
//! outlive the connection.

use crate::browse::Browser;
use crate::catalog::ServerLocation;
use crate::constants::{
    DOWNLOAD_RANGE, ELAPSED_TICK, HOST_OCTET_RANGE, RATE_SAMPLE_PERIOD, UPLOAD_RANGE,
};
use crate::timer::Interval;
use rand::Rng;
use std::time::{Duration, Instant};

/// Whole seconds spent connected.
#[derive(Clone, Debug)]
pub struct ElapsedCounter {
    seconds: u64,
    ticker: Interval,
}

impl ElapsedCounter {
    /// Starts counting from zero at `at`.
    pub fn start(at: Instant) -> Self {
        Self {
            seconds: 0,
            ticker: Interval::starting_at(at, ELAPSED_TICK),
        }
    }

    /// Adds one second per elapsed tick.
    pub fn advance(&mut self, now: Instant) {
        self.seconds += self.ticker.poll(now);
    }

    /// Whole seconds counted so far.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// `HH:MM:SS` rendering of the counter.
    pub fn display(&self) -> String {
        crate::utils::format_elapsed(Duration::from_secs(self.seconds()))
    }
}

/// One synthetic throughput reading in Mbps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateSample {
    /// Download rate.
    pub download: f64,
    /// Upload rate.
    pub upload: f64,
}

impl RateSample {
    /// Draws an independent uniform download/upload pair within the configured bounds.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            download: rng.gen_range(DOWNLOAD_RANGE.0..=DOWNLOAD_RANGE.1),
            upload: rng.gen_range(UPLOAD_RANGE.0..=UPLOAD_RANGE.1),
        }
    }
}

/// Periodically replaces the displayed rates with fresh random values.
#[derive(Clone, Debug)]
pub struct RateSampler {
    current: RateSample,
    ticker: Interval,
}

impl RateSampler {
    /// Starts sampling at `at`; rates read zero until the first period elapses.
    pub fn start(at: Instant) -> Self {
        Self {
            current: RateSample::default(),
            ticker: Interval::starting_at(at, RATE_SAMPLE_PERIOD),
        }
    }

    /// Draws a new sample if at least one period elapsed. Returns `true` if it did.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if self.ticker.poll(now) == 0 {
            return false;
        }
        self.current = RateSample::draw(rng);
        true
    }

    /// The latest sample.
    pub fn current(&self) -> RateSample {
        self.current
    }
}

/// Live state of a connected session.
#[derive(Clone, Debug)]
pub struct Session {
    server: &'static ServerLocation,
    address: String,
    elapsed: ElapsedCounter,
    rates: RateSampler,
    browser: Browser,
}

impl Session {
    /// Opens a session on `server` starting at `at`.
    pub fn open<R: Rng + ?Sized>(server: &'static ServerLocation, at: Instant, rng: &mut R) -> Self {
        Self {
            server,
            address: generate_address(server.ip_prefix, rng),
            elapsed: ElapsedCounter::start(at),
            rates: RateSampler::start(at),
            browser: Browser::default(),
        }
    }

    /// Advances the periodic counters. Returns a browse confirmation if one completed.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Option<String> {
        self.elapsed.advance(now);
        self.rates.advance(now, rng);
        self.browser.advance(now, self.server.country)
    }

    /// Server this session exits through.
    pub fn server(&self) -> &'static ServerLocation {
        self.server
    }

    /// Generated address, fixed for the session's lifetime.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Elapsed-time counter.
    pub fn elapsed(&self) -> &ElapsedCounter {
        &self.elapsed
    }

    /// Latest simulated rates.
    pub fn rates(&self) -> RateSample {
        self.rates.current()
    }

    /// Browser simulation.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Mutable browser simulation, used to submit destinations.
    pub fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }
}

/// Builds `<prefix>.<host>` with a random host octet.
pub fn generate_address<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let host = rng.gen_range(HOST_OCTET_RANGE.0..=HOST_OCTET_RANGE.1);
    format!("{prefix}.{host}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_elapsed_counts_whole_seconds() {
        let t0 = Instant::now();
        let mut c = ElapsedCounter::start(t0);
        assert_eq!(c.display(), "00:00:00");

        c.advance(t0 + Duration::from_millis(999));
        assert_eq!(c.seconds(), 0);

        c.advance(t0 + Duration::from_secs(61));
        assert_eq!(c.seconds(), 61);
        assert_eq!(c.display(), "00:01:01");

        c.advance(t0 + Duration::from_secs(3725));
        assert_eq!(c.display(), "01:02:05");
    }

    #[test]
    fn test_rate_sampler_zero_until_first_period() {
        let t0 = Instant::now();
        let mut r = rng();
        let mut s = RateSampler::start(t0);
        assert!(!s.advance(t0 + Duration::from_millis(1199), &mut r));
        assert_eq!(s.current(), RateSample::default());

        assert!(s.advance(t0 + RATE_SAMPLE_PERIOD, &mut r));
        assert_ne!(s.current(), RateSample::default());
    }

    #[test]
    fn test_rate_samples_stay_within_bounds() {
        let mut r = rng();
        for _ in 0..10_000 {
            let sample = RateSample::draw(&mut r);
            assert!((20.0..=95.0).contains(&sample.download));
            assert!((5.0..=25.0).contains(&sample.upload));

            for (rate, low, high) in [(sample.download, 20.0, 95.0), (sample.upload, 5.0, 25.0)] {
                let text = crate::utils::format_rate(rate);
                let value = text.trim_end_matches(" Mbps");
                assert_eq!(value.split('.').nth(1).map(str::len), Some(2));
                let parsed: f64 = value.parse().unwrap();
                assert!((low..=high).contains(&parsed));
            }
        }
    }

    #[test]
    fn test_generated_address_uses_prefix_and_valid_host() {
        let mut r = rng();
        for _ in 0..1_000 {
            let addr = generate_address("193.176.86", &mut r);
            let host = addr.strip_prefix("193.176.86.").unwrap();
            let host: u16 = host.parse().unwrap();
            assert!((1..=253).contains(&host));
        }
    }

    #[test]
    fn test_session_address_fixed_for_lifetime() {
        let t0 = Instant::now();
        let mut r = rng();
        let server = catalog::find_by_country("Japan").unwrap();
        let mut s = Session::open(server, t0, &mut r);
        let addr = s.address().to_string();
        assert!(addr.starts_with("138.199.21."));

        s.advance(t0 + Duration::from_secs(30), &mut r);
        assert_eq!(s.address(), addr);
        assert_eq!(s.elapsed().seconds(), 30);
    }

    #[test]
    fn test_session_reports_browse_completion() {
        let t0 = Instant::now();
        let mut r = rng();
        let server = catalog::find_by_country("Germany").unwrap();
        let mut s = Session::open(server, t0, &mut r);
        s.browser_mut().request("example.com", t0).unwrap();

        assert_eq!(s.advance(t0 + Duration::from_secs(1), &mut r), None);
        let msg = s.advance(t0 + Duration::from_secs(2), &mut r).unwrap();
        assert!(msg.ends_with("via Germany."));
    }
}
