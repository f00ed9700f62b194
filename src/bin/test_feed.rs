use lqdt_dashboard::services::format::{format_rate, format_signed, format_volume};
use lqdt_dashboard::services::quote_feed::{initialize, next_tick_delay, summarize, tick};
use lqdt_dashboard::services::reference_data::bank_quotes;
use log::info;
use env_logger;
use dotenv::dotenv;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

// Steps the feed offline, without timers, to eyeball a seeded sequence.
fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let seed = env::var("FEED_SEED").ok().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    info!("Stepping quote feed {} times with seed {}", ticks, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut now = Utc::now();
    let mut records = initialize(&bank_quotes(), &mut rng, now);

    for n in 1..=ticks {
        let delay = next_tick_delay(&mut rng);
        now = now + Duration::milliseconds(delay.as_millis() as i64);
        tick(&mut records, &mut rng, now);

        info!("Tick {} (+{:?})", n, delay);
        for record in &records {
            info!(
                "  {:<16} {:>8} {:>7} {:?}{} vol {}",
                record.bank_name,
                format_rate(record.current_rate),
                format_signed(record.change, 3),
                record.trend,
                if record.flashing { " *" } else { "" },
                format_volume(record.volume)
            );
        }
        let summary = summarize(&records);
        info!("  up {} / down {} / avg {:?}", summary.rising, summary.falling, summary.average_rate);
    }

    Ok(())
}
