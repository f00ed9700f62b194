// src/services/quote_feed.rs
//
// Simulated live makam board. `initialize`, `tick` and `clear_flashes` are the
// pure steps; `QuoteFeed` drives them from tokio timers inside one task that
// owns the records and publishes snapshots over a watch channel.
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::models::{BankQuote, QuoteCategory, QuoteRecord, Trend};

pub const MIN_RATE: f64 = 0.1;
pub const MIN_VOLUME: f64 = 10_000_000.0;
pub const INITIAL_VOLUME_MIN: u64 = 50_000_000;
pub const INITIAL_VOLUME_MAX: u64 = 550_000_000;
/// Max move of a rate per tick, in percent of the current rate.
pub const RATE_JITTER_PERCENT: f64 = 0.05;
/// Max move of a volume per tick, as a fraction of the current volume.
pub const VOLUME_JITTER: f64 = 0.10;
pub const TREND_THRESHOLD: f64 = 0.001;
pub const FLASH_THRESHOLD: f64 = 0.002;
pub const FLASH_DURATION: Duration = Duration::from_millis(500);
pub const TICK_PERIOD_MIN_MS: u64 = 2_000;
pub const TICK_PERIOD_MAX_MS: u64 = 5_000;

impl Trend {
    pub fn classify(change: f64) -> Self {
        if change > TREND_THRESHOLD {
            Trend::Up
        } else if change < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

pub fn initialize<R: Rng + ?Sized>(seeds: &[BankQuote], rng: &mut R, now: DateTime<Utc>) -> Vec<QuoteRecord> {
    seeds
        .iter()
        .map(|seed| QuoteRecord {
            id: seed.id.clone(),
            bank_name: seed.bank_name.clone(),
            category: QuoteCategory::from_quote_type(&seed.quote_type),
            base_rate: seed.rate,
            current_rate: seed.rate,
            previous_rate: seed.rate,
            change: 0.0,
            change_percent: 0.0,
            trend: Trend::Neutral,
            flashing: false,
            volume: rng.gen_range(INITIAL_VOLUME_MIN..INITIAL_VOLUME_MAX) as f64,
            amount_min: seed.amount_min,
            amount_max: seed.amount_max,
            duration_days: seed.duration_days,
            valid_until: seed.valid_until,
            notes: seed.notes.clone(),
            last_update: now,
        })
        .collect()
}

/// Advances every record by one random step.
///
/// `change` is measured against the record's `previous_rate`, which lags one
/// tick behind `current_rate`, so the reported move spans the last two ticks.
pub fn tick<R: Rng + ?Sized>(records: &mut [QuoteRecord], rng: &mut R, now: DateTime<Utc>) {
    for record in records.iter_mut() {
        let rate_delta: f64 = rng.gen_range(-RATE_JITTER_PERCENT..=RATE_JITTER_PERCENT);
        let new_rate = (record.current_rate * (1.0 + rate_delta / 100.0)).max(MIN_RATE);
        let change = new_rate - record.previous_rate;
        let change_percent = if record.previous_rate == 0.0 {
            0.0
        } else {
            change / record.previous_rate * 100.0
        };

        let volume_delta: f64 = rng.gen_range(-VOLUME_JITTER..=VOLUME_JITTER);
        let new_volume = (record.volume * (1.0 + volume_delta)).max(MIN_VOLUME);

        record.change = change;
        record.change_percent = change_percent;
        record.trend = Trend::classify(change);
        record.flashing = change.abs() > FLASH_THRESHOLD;
        record.volume = new_volume;
        record.previous_rate = record.current_rate;
        record.current_rate = new_rate;
        record.last_update = now;
    }
}

pub fn clear_flashes(records: &mut [QuoteRecord]) {
    for record in records.iter_mut() {
        record.flashing = false;
    }
}

/// Wait before the next tick, uniform over [2s, 5s).
pub fn next_tick_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(TICK_PERIOD_MIN_MS..TICK_PERIOD_MAX_MS))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub rising: usize,
    pub falling: usize,
    pub average_rate: Option<f64>,
    pub total_volume: f64,
}

pub fn summarize(records: &[QuoteRecord]) -> MarketSummary {
    let average_rate = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.current_rate).sum::<f64>() / records.len() as f64)
    };
    MarketSummary {
        rising: records.iter().filter(|r| r.trend == Trend::Up).count(),
        falling: records.iter().filter(|r| r.trend == Trend::Down).count(),
        average_rate,
        total_volume: records.iter().map(|r| r.volume).sum(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub records: Vec<QuoteRecord>,
    pub live: bool,
    pub ticks: u64,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy)]
enum FeedCommand {
    SetLive(bool),
}

/// Handle to a running feed task. Dropping it cancels both timers.
pub struct QuoteFeed {
    commands: mpsc::UnboundedSender<FeedCommand>,
    snapshots: watch::Receiver<Arc<FeedSnapshot>>,
    task: JoinHandle<()>,
}

impl QuoteFeed {
    /// Must be called from within a tokio runtime.
    pub fn spawn(seeds: &[BankQuote], mut rng: StdRng, live: bool) -> Self {
        let records = initialize(seeds, &mut rng, Utc::now());
        info!("Starting quote feed with {} records (live: {})", records.len(), live);

        let (publisher, snapshots) = watch::channel(Arc::new(FeedSnapshot {
            records: records.clone(),
            live,
            ticks: 0,
            last_update: None,
        }));
        let (commands, inbox) = mpsc::unbounded_channel();
        let runner = FeedRunner::new(records, rng, live, publisher);
        let task = tokio::spawn(runner.run(inbox));

        QuoteFeed { commands, snapshots, task }
    }

    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<FeedSnapshot>> {
        self.snapshots.clone()
    }

    pub fn is_live(&self) -> bool {
        self.snapshots.borrow().live
    }

    pub fn set_live(&self, live: bool) {
        if let Err(e) = self.commands.send(FeedCommand::SetLive(live)) {
            warn!("Quote feed is not running, dropped command: {:?}", e.0);
        }
    }
}

impl Drop for QuoteFeed {
    fn drop(&mut self) {
        debug!("Quote feed handle dropped, stopping timers");
        self.task.abort();
    }
}

struct FeedRunner {
    records: Vec<QuoteRecord>,
    rng: StdRng,
    live: bool,
    ticks: u64,
    last_update: Option<DateTime<Utc>>,
    next_tick: Option<Instant>,
    flash_clear: Option<Instant>,
    publisher: watch::Sender<Arc<FeedSnapshot>>,
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl FeedRunner {
    fn new(records: Vec<QuoteRecord>, mut rng: StdRng, live: bool, publisher: watch::Sender<Arc<FeedSnapshot>>) -> Self {
        let next_tick = live.then(|| Instant::now() + next_tick_delay(&mut rng));
        FeedRunner {
            records,
            rng,
            live,
            ticks: 0,
            last_update: None,
            next_tick,
            flash_clear: None,
            publisher,
        }
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<FeedCommand>) {
        loop {
            tokio::select! {
                _ = wait_for(self.next_tick) => self.on_tick(),
                _ = wait_for(self.flash_clear) => self.on_flash_clear(),
                command = inbox.recv() => match command {
                    Some(FeedCommand::SetLive(live)) => self.on_set_live(live),
                    None => break,
                },
            }
        }
        debug!("Quote feed stopped after {} ticks", self.ticks);
    }

    fn on_tick(&mut self) {
        let now = Utc::now();
        tick(&mut self.records, &mut self.rng, now);
        self.ticks += 1;
        self.last_update = Some(now);

        let fired_at = Instant::now();
        // Re-armed on every update, so the latest tick owns the highlight.
        self.flash_clear = Some(fired_at + FLASH_DURATION);
        self.next_tick = Some(fired_at + next_tick_delay(&mut self.rng));

        debug!(
            "Feed tick {}: {} flashing, next in {:?}",
            self.ticks,
            self.records.iter().filter(|r| r.flashing).count(),
            self.next_tick.map(|at| at - fired_at)
        );
        self.publish();
    }

    fn on_flash_clear(&mut self) {
        clear_flashes(&mut self.records);
        self.flash_clear = None;
        self.publish();
    }

    fn on_set_live(&mut self, live: bool) {
        if live == self.live {
            return;
        }
        info!("Quote feed {}", if live { "resumed" } else { "paused" });
        self.live = live;
        self.next_tick = if live {
            Some(Instant::now() + next_tick_delay(&mut self.rng))
        } else {
            None
        };
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(Arc::new(FeedSnapshot {
            records: self.records.clone(),
            live: self.live,
            ticks: self.ticks,
            last_update: self.last_update,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reference_data::bank_quotes;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn initialize_copies_seed_rates() {
        let seeds = bank_quotes();
        let records = initialize(&seeds, &mut seeded(1), Utc::now());
        assert_eq!(records.len(), seeds.len());
        for (record, seed) in records.iter().zip(&seeds) {
            assert_eq!(record.current_rate, seed.rate);
            assert_eq!(record.previous_rate, seed.rate);
            assert_eq!(record.change, 0.0);
            assert_eq!(record.trend, Trend::Neutral);
            assert!(!record.flashing);
            assert!(record.volume >= 50_000_000.0 && record.volume < 550_000_000.0);
        }
    }

    #[test]
    fn initialize_empty_seed_list() {
        assert!(initialize(&[], &mut seeded(1), Utc::now()).is_empty());
    }

    #[test]
    fn categories_follow_quote_type() {
        let records = initialize(&bank_quotes(), &mut seeded(3), Utc::now());
        assert_eq!(records[0].category, QuoteCategory::Short);
        assert_eq!(records[2].category, QuoteCategory::Medium);
        assert_eq!(records[4].category, QuoteCategory::Long);
        assert_eq!(records[5].category, QuoteCategory::Standard);
    }

    #[test]
    fn clamps_hold_over_many_ticks() {
        let mut seeds = bank_quotes();
        seeds[0].rate = 0.1;
        let mut rng = seeded(7);
        let mut records = initialize(&seeds, &mut rng, Utc::now());
        records[1].volume = MIN_VOLUME;
        for _ in 0..2_000 {
            tick(&mut records, &mut rng, Utc::now());
            for record in &records {
                assert!(record.current_rate >= MIN_RATE);
                assert!(record.volume >= MIN_VOLUME);
                assert!(record.change_percent.is_finite());
            }
        }
    }

    #[test]
    fn trend_and_flash_agree_with_change() {
        let mut rng = seeded(11);
        let mut records = initialize(&bank_quotes(), &mut rng, Utc::now());
        for _ in 0..500 {
            tick(&mut records, &mut rng, Utc::now());
            for record in &records {
                let expected = if record.change > 0.001 {
                    Trend::Up
                } else if record.change < -0.001 {
                    Trend::Down
                } else {
                    Trend::Neutral
                };
                assert_eq!(record.trend, expected);
                assert_eq!(record.flashing, record.change.abs() > 0.002);
            }
        }
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(Trend::classify(0.001), Trend::Neutral);
        assert_eq!(Trend::classify(-0.001), Trend::Neutral);
        assert_eq!(Trend::classify(0.0011), Trend::Up);
        assert_eq!(Trend::classify(-0.0011), Trend::Down);
    }

    #[test]
    fn change_spans_two_ticks() {
        let mut rng = seeded(5);
        let mut records = initialize(&bank_quotes(), &mut rng, Utc::now());
        tick(&mut records, &mut rng, Utc::now());
        let before = records[0].clone();
        tick(&mut records, &mut rng, Utc::now());
        let after = &records[0];
        assert_eq!(after.previous_rate, before.current_rate);
        assert_eq!(after.change, after.current_rate - before.previous_rate);
        assert_eq!(
            after.change_percent,
            (after.current_rate - before.previous_rate) / before.previous_rate * 100.0
        );
    }

    #[test]
    fn rate_moves_stay_within_jitter() {
        let mut rng = seeded(9);
        let mut records = initialize(&bank_quotes(), &mut rng, Utc::now());
        for _ in 0..200 {
            let before: Vec<(f64, f64)> = records.iter().map(|r| (r.current_rate, r.volume)).collect();
            tick(&mut records, &mut rng, Utc::now());
            for (record, (rate, volume)) in records.iter().zip(before) {
                assert!((record.current_rate / rate - 1.0).abs() <= 0.0005 + 1e-12);
                assert!((record.volume / volume - 1.0).abs() <= 0.10 + 1e-12);
            }
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let now = Utc::now();
        let run = |seed| {
            let mut rng = seeded(seed);
            let mut records = initialize(&bank_quotes(), &mut rng, now);
            for _ in 0..25 {
                tick(&mut records, &mut rng, now);
            }
            records
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn tick_delay_range() {
        let mut rng = seeded(2);
        for _ in 0..1_000 {
            let delay = next_tick_delay(&mut rng);
            assert!(delay >= Duration::from_millis(2_000));
            assert!(delay < Duration::from_millis(5_000));
        }
    }

    #[test]
    fn summary_counts_trends() {
        let mut records = initialize(&bank_quotes(), &mut seeded(4), Utc::now());
        records[0].trend = Trend::Up;
        records[1].trend = Trend::Up;
        records[2].trend = Trend::Down;
        let summary = summarize(&records);
        assert_eq!(summary.rising, 2);
        assert_eq!(summary.falling, 1);
        let mean = records.iter().map(|r| r.current_rate).sum::<f64>() / records.len() as f64;
        assert_eq!(summary.average_rate, Some(mean));

        let empty = summarize(&[]);
        assert_eq!(empty.average_rate, None);
        assert_eq!(empty.total_volume, 0.0);
    }

    // At 100% a single tick moves a rate by up to 0.05, far over the flash threshold.
    fn volatile_quotes() -> Vec<BankQuote> {
        bank_quotes()
            .into_iter()
            .map(|mut quote| {
                quote.rate = 100.0;
                quote
            })
            .collect()
    }

    fn runner(seeds: &[BankQuote], seed: u64) -> (FeedRunner, watch::Receiver<Arc<FeedSnapshot>>) {
        let mut rng = seeded(seed);
        let records = initialize(seeds, &mut rng, Utc::now());
        let (publisher, updates) = watch::channel(Arc::new(FeedSnapshot {
            records: records.clone(),
            live: true,
            ticks: 0,
            last_update: None,
        }));
        (FeedRunner::new(records, rng, true, publisher), updates)
    }

    #[tokio::test(start_paused = true)]
    async fn feed_ticks_then_clears_flashes() {
        let started = Instant::now();
        let feed = QuoteFeed::spawn(&volatile_quotes(), seeded(21), true);
        let mut updates = feed.subscribe();
        updates.borrow_and_update();

        updates.changed().await.expect("feed running");
        let ticked_at = Instant::now();
        let elapsed = ticked_at - started;
        assert!(elapsed >= Duration::from_millis(2_000) && elapsed <= Duration::from_millis(5_001));
        let ticked = updates.borrow_and_update().clone();
        assert_eq!(ticked.ticks, 1);
        assert!(ticked.records.iter().any(|r| r.flashing));

        tokio::time::sleep(FLASH_DURATION - Duration::from_millis(10)).await;
        assert!(feed.snapshot().records.iter().any(|r| r.flashing));

        updates.changed().await.expect("feed running");
        let cleared = updates.borrow_and_update().clone();
        let flash_elapsed = Instant::now() - ticked_at;
        assert!(flash_elapsed >= FLASH_DURATION && flash_elapsed <= FLASH_DURATION + Duration::from_millis(1));
        assert_eq!(cleared.ticks, 1);
        assert!(cleared.records.iter().all(|r| !r.flashing));
        // Clearing leaves the market values alone.
        let rates = |s: &FeedSnapshot| s.records.iter().map(|r| r.current_rate).collect::<Vec<_>>();
        assert_eq!(rates(&ticked), rates(&cleared));
    }

    #[tokio::test(start_paused = true)]
    async fn later_update_rearms_flash_clear() {
        let (mut runner, updates) = runner(&volatile_quotes(), 13);
        assert!(runner.flash_clear.is_none());

        runner.on_tick();
        let first = runner.flash_clear.expect("armed by tick");
        assert_eq!(first, Instant::now() + FLASH_DURATION);
        assert!(updates.borrow().records.iter().any(|r| r.flashing));

        tokio::time::advance(Duration::from_millis(300)).await;
        runner.on_tick();
        let second = runner.flash_clear.expect("armed by tick");
        assert_eq!(second, Instant::now() + FLASH_DURATION);
        assert_eq!(second - first, Duration::from_millis(300));
        let flashing: Vec<bool> = runner.records.iter().map(|r| r.flashing).collect();

        // The first deadline has passed, but only the second one clears.
        tokio::time::advance(Duration::from_millis(250)).await;
        assert!(Instant::now() > first && Instant::now() < second);
        assert_eq!(runner.records.iter().map(|r| r.flashing).collect::<Vec<_>>(), flashing);

        runner.on_flash_clear();
        assert!(runner.flash_clear.is_none());
        assert!(runner.records.iter().all(|r| !r.flashing));
        assert!(updates.borrow().records.iter().all(|r| !r.flashing));
        assert_eq!(updates.borrow().ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn set_live_after_feed_stopped_is_harmless() {
        let feed = QuoteFeed::spawn(&bank_quotes(), seeded(8), true);
        feed.task.abort();
        tokio::task::yield_now().await;
        feed.set_live(false);
        assert!(feed.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn paused_feed_keeps_values() {
        let feed = QuoteFeed::spawn(&bank_quotes(), seeded(8), true);
        let mut updates = feed.subscribe();
        updates.borrow_and_update();
        updates.changed().await.expect("feed running");

        feed.set_live(false);
        tokio::time::sleep(Duration::from_secs(30)).await;
        let paused = feed.snapshot();
        assert!(!paused.live);
        assert_eq!(paused.ticks, 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        let later = feed.snapshot();
        assert_eq!(later.ticks, 1);
        let rates = |s: &FeedSnapshot| s.records.iter().map(|r| r.current_rate).collect::<Vec<_>>();
        assert_eq!(rates(&paused), rates(&later));

        feed.set_live(true);
        tokio::time::sleep(Duration::from_millis(5_001)).await;
        assert!(feed.snapshot().ticks >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_paused_never_ticks() {
        let feed = QuoteFeed::spawn(&bank_quotes(), seeded(8), false);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(feed.snapshot().ticks, 0);
        assert!(!feed.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_task() {
        let feed = QuoteFeed::spawn(&bank_quotes(), seeded(8), true);
        let mut updates = feed.subscribe();
        drop(feed);
        tokio::task::yield_now().await;
        // The sender lives in the aborted task; once it is dropped the
        // receiver reports the channel closed.
        assert!(updates.changed().await.is_err());
    }
}
