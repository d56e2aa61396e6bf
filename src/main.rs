use std::sync::Arc;

use fxsignal::config::Config;
use fxsignal::services::{NotificationLog, SignalRunner, StreamProcessor};
use fxsignal::sources::{ExchangeRateClient, LiveFeed, SyntheticFeed};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fxsignal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }
    info!(
        "Starting fxsignal for {} ({}, {:?} mode)",
        config.instrument,
        config.timeframe.label(),
        config.indicator_mode
    );

    let instrument = config.instrument;
    let bar_millis = config.timeframe.bar_millis();

    // Build the feed; offline mode never touches the network
    let mut feed = if config.offline {
        LiveFeed::offline(SyntheticFeed::new(instrument, instrument.base_rate(), bar_millis))
    } else {
        let client = ExchangeRateClient::new(config.rates_url.clone(), config.feed_timeout())?;
        LiveFeed::new(
            client,
            SyntheticFeed::new(instrument, instrument.base_rate(), bar_millis),
        )
    };

    // Anchor seed history on the live rate when available
    let start_price = match feed.live_rate().await {
        Some(rate) => rate,
        None => feed.synthetic_mut().jittered_base_rate(),
    };
    let history = {
        let synthetic = feed.synthetic_mut();
        synthetic.anchor(start_price);
        synthetic.history(config.window_capacity, chrono::Utc::now().timestamp_millis())
    };

    let processor = StreamProcessor::new(instrument, config.analysis_settings());
    let runner = SignalRunner::new(processor, feed, config.tick_interval());

    if let Some(analysis) = runner.seed(history).await {
        info!(
            "{} {} @ {} (strength {}, confidence {:.0}%)",
            instrument,
            analysis.signal.signal_type.label(),
            analysis.current_price,
            analysis.signal.strength,
            analysis.signal.confidence
        );
    }

    // Notification observer
    let mut events_rx = runner.subscribe_events();
    let log_capacity = config.notification_log_capacity;
    let observer = tokio::spawn(async move {
        let mut log = NotificationLog::new(log_capacity);
        loop {
            match events_rx.recv().await {
                Ok(event) => {
                    info!("[{}] {}", event.level.as_str(), event.message);
                    log.push(event);
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    error!("Notification observer lagged, {} events dropped", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let run_handle = tokio::spawn(Arc::clone(&runner).run());

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    runner.shutdown();
    run_handle.await?;
    observer.abort();

    Ok(())
}
