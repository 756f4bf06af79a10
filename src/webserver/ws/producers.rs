/// Metrics producer - the periodic sampling loop
///
/// The sampler is the only publisher: every tick it asks the metrics source
/// for each category, publishes every section that succeeded, then publishes
/// one timestamp marker. A failing category is logged and skipped for that
/// tick only; the loop keeps its fixed period until shutdown.
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::task::{spawn_blocking, JoinHandle};
use tokio::time::{interval, MissedTickBehavior};

use crate::collectors::{Category, MetricsSource};
use crate::logger::{self, LogTag};
use crate::shutdown::ShutdownSignal;

use super::hub::WsHub;
use super::message::Payload;

/// Result of one sampling tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Categories that produced a section (in publish order)
    pub published: Vec<Category>,
    /// Categories skipped because the collector failed
    pub failed: Vec<Category>,
}

/// Spawn the sampling loop
pub fn start_producers<S>(
    hub: Arc<WsHub>,
    source: S,
    period: Duration,
    shutdown: ShutdownSignal,
) -> JoinHandle<()>
where
    S: MetricsSource + 'static,
{
    logger::info(
        LogTag::Sampler,
        &format!("Sampler started (interval={}s)", period.as_secs_f64()),
    );
    tokio::spawn(run_sampler(hub, source, period, shutdown))
}

/// Sample on a fixed period until shutdown; the first tick fires immediately
///
/// sysinfo refreshes block, so each tick runs on the blocking pool and hands
/// the source back when it is done.
pub async fn run_sampler<S: MetricsSource + 'static>(
    hub: Arc<WsHub>,
    mut source: S,
    period: Duration,
    shutdown: ShutdownSignal,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.wait() => break,
            _ = ticker.tick() => {}
        }

        tick += 1;
        let tick_hub = Arc::clone(&hub);
        let outcome = spawn_blocking(move || {
            let report = sample_once(&tick_hub, &mut source);
            (source, report)
        })
        .await;

        let report = match outcome {
            Ok((returned, report)) => {
                source = returned;
                report
            }
            Err(e) => {
                logger::error(
                    LogTag::Sampler,
                    &format!("Tick {} collection task failed, sampler stopping: {}", tick, e),
                );
                break;
            }
        };

        logger::debug(
            LogTag::Sampler,
            &format!(
                "Tick {}: published={:?} failed={:?} subscribers={}",
                tick,
                report.published,
                report.failed,
                hub.active_subscribers()
            ),
        );
    }

    logger::info(
        LogTag::Sampler,
        &format!("Sampler stopped after {} ticks", tick),
    );
}

/// Run one tick: every category, then the timestamp marker
pub fn sample_once<S: MetricsSource + ?Sized>(hub: &WsHub, source: &mut S) -> TickReport {
    let mut report = TickReport::default();

    for category in Category::ALL {
        match source.collect(category) {
            Ok(section) => {
                hub.publish(Payload::from(section));
                report.published.push(category);
            }
            Err(e) => {
                logger::warning(
                    LogTag::Sampler,
                    &format!("Skipping {} section this tick: {}", category, e),
                );
                report.failed.push(category);
            }
        }
    }

    hub.publish(Payload::timestamp_marker(&Local::now()));
    report
}
