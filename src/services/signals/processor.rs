//! Streaming update discipline: append, recompute, diff, notify.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::AppError;
use crate::services::signals::Analyzer;
use crate::services::BarWindow;
use crate::types::{Analysis, AnalysisSettings, Bar, Instrument, NotificationEvent, Signal};

/// Result of one processing cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleOutcome {
    /// `None` while the window holds too little history.
    pub analysis: Option<Arc<Analysis>>,
    /// At most one event of each kind.
    pub events: Vec<NotificationEvent>,
}

/// Owns the bar window and the last computed signal.
///
/// Every mutation happens inside [`StreamProcessor::on_bar`] or
/// [`StreamProcessor::seed`]; readers only ever get owned snapshots.
pub struct StreamProcessor {
    instrument: Instrument,
    window: BarWindow,
    analyzer: Analyzer,
    previous: Option<Signal>,
}

impl StreamProcessor {
    /// Prices and predictions are rounded to the instrument's precision
    /// regardless of `settings.price_decimals`.
    pub fn new(instrument: Instrument, settings: AnalysisSettings) -> Self {
        let settings = AnalysisSettings {
            price_decimals: instrument.decimals(),
            ..settings
        };
        Self {
            instrument,
            window: BarWindow::new(settings.window_capacity),
            analyzer: Analyzer::new(settings),
            previous: None,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Signal from the most recent successful analysis.
    pub fn previous_signal(&self) -> Option<&Signal> {
        self.previous.as_ref()
    }

    /// Owned copy of the current window.
    pub fn window_snapshot(&self) -> Vec<Bar> {
        self.window.snapshot()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Load initial history without emitting events.
    pub fn seed(&mut self, bars: impl IntoIterator<Item = Bar>) -> Option<Arc<Analysis>> {
        for bar in bars {
            self.window.append(bar);
        }
        let analysis = self.recompute()?;
        self.previous = Some(analysis.signal.clone());
        Some(analysis)
    }

    /// Process one new bar.
    pub fn on_bar(&mut self, bar: Bar) -> CycleOutcome {
        self.window.append(bar);

        let Some(analysis) = self.recompute() else {
            return CycleOutcome::default();
        };

        let mut events = Vec::with_capacity(2);
        let code = self.instrument.code();
        let now = chrono::Utc::now().timestamp_millis();
        let current = &analysis.signal;

        if let Some(previous) = &self.previous {
            if previous.signal_type != current.signal_type {
                info!(
                    "Signal changed on {}: {} -> {} ({:.0}% confidence)",
                    code,
                    previous.signal_type.label(),
                    current.signal_type.label(),
                    current.confidence
                );
                events.push(NotificationEvent::signal_changed(
                    code,
                    previous.signal_type,
                    current.signal_type,
                    current.confidence,
                    now,
                ));
            }
        }

        if analysis.price_change_percent.abs() > self.analyzer.settings().large_move_pct {
            info!(
                "Large move on {}: {:+.2}%",
                code, analysis.price_change_percent
            );
            events.push(NotificationEvent::large_move(
                code,
                analysis.current_price,
                analysis.price_change_percent,
                now,
            ));
        }

        self.previous = Some(current.clone());

        CycleOutcome {
            analysis: Some(analysis),
            events,
        }
    }

    fn recompute(&self) -> Option<Arc<Analysis>> {
        let bars = self.window.snapshot();
        match self.analyzer.analyze(&bars) {
            Ok(analysis) => {
                debug!(
                    "Analyzed {} over {} bars: {} strength {} confidence {:.1}",
                    self.instrument,
                    bars.len(),
                    analysis.signal.signal_type.label(),
                    analysis.signal.strength,
                    analysis.signal.confidence
                );
                Some(Arc::new(analysis))
            }
            Err(AppError::InsufficientHistory { have, need }) => {
                debug!(
                    "Analysis unavailable for {}: {} of {} bars",
                    self.instrument, have, need
                );
                None
            }
            Err(e) => {
                debug!("Analysis unavailable for {}: {}", self.instrument, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotificationKind;

    fn flat_bars(count: usize, price: f64) -> Vec<Bar> {
        (0..count)
            .map(|i| Bar::new(i as i64 * 1000, price, price + 0.001, price - 0.001, price, 1000.0))
            .collect()
    }

    #[test]
    fn test_no_analysis_before_min_history() {
        let mut processor = StreamProcessor::new(Instrument::EurUsd, AnalysisSettings::default());
        assert!(processor.seed(flat_bars(48, 1.1)).is_none());
        let outcome = processor.on_bar(Bar::flat(48_000, 1.1, 1000.0));
        assert!(outcome.analysis.is_none());
        assert!(outcome.events.is_empty());
        assert!(processor.previous_signal().is_none());

        let outcome = processor.on_bar(Bar::flat(49_000, 1.1, 1000.0));
        assert!(outcome.analysis.is_some());
        assert!(processor.previous_signal().is_some());
    }

    #[test]
    fn test_large_move_event() {
        let mut processor = StreamProcessor::new(Instrument::EurUsd, AnalysisSettings::default());
        processor.seed(flat_bars(60, 1.0));
        let outcome = processor.on_bar(Bar::new(60_000, 1.0, 1.011, 1.0, 1.01, 1000.0));
        let large_moves: Vec<_> = outcome
            .events
            .iter()
            .filter(|e| e.kind == NotificationKind::LargeMove)
            .collect();
        assert_eq!(large_moves.len(), 1);
        assert!(large_moves[0].message.contains("+1.00%"));
    }

    #[test]
    fn test_window_stays_bounded() {
        let mut processor = StreamProcessor::new(Instrument::UsdJpy, AnalysisSettings::default());
        processor.seed(flat_bars(150, 150.0));
        assert_eq!(processor.window_len(), 100);
        assert_eq!(processor.instrument(), Instrument::UsdJpy);
    }
}
