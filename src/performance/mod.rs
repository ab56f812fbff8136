//! # Performance Metrics
//!
//! Frame timing for the overlay: FPS, average/min/max frame time over a
//! sliding window, and what the renderer submitted.
//!
//! ```rust
//! use planetarium::performance::PerformanceMonitor;
//! use std::time::Duration;
//!
//! let mut monitor = PerformanceMonitor::new();
//! monitor.record_frame(Duration::from_millis(16));
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Metrics shown in the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    pub planet_count: u32,
    /// Planet triangles submitted in the last frame
    pub triangle_count: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            planet_count: 0,
            triangle_count: 0,
        }
    }
}

/// Performance monitoring system
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    current_metrics: PerformanceMetrics,
    last_update: Instant,
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        // ~2 seconds at 60fps
        Self::with_samples(120)
    }

    pub fn with_samples(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: PerformanceMetrics::default(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(250),
        }
    }

    /// Records the time between two presented frames.
    ///
    /// Metrics are recomputed at most four times per second so the overlay
    /// stays readable.
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        if self.last_update.elapsed() >= self.update_interval {
            self.update_metrics();
            self.last_update = Instant::now();
        }
    }

    /// Recomputes the averaged metrics from the sample window.
    pub fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms =
            total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn update_render_stats(&mut self, planet_count: u32, triangle_count: u32) {
        self.current_metrics.planet_count = planet_count;
        self.current_metrics.triangle_count = triangle_count;
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame time history in milliseconds, oldest first
    pub fn frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.last_update = Instant::now();
    }

    /// Compact overlay in the top-right corner
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let display_size = ui.io().display_size;
        let metrics = &self.current_metrics;

        ui.window("Performance")
            .size([190.0, 0.0], imgui::Condition::Always)
            .position([display_size[0] - 200.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.3)
            .build(|| {
                ui.text(format!("FPS: {:.0}", metrics.fps));
                ui.text(format!(
                    "{:.1}ms ({:.1}-{:.1})",
                    metrics.frame_time_ms, metrics.min_frame_time_ms, metrics.max_frame_time_ms
                ));
                ui.text(format!(
                    "{} planets, {} tris",
                    metrics.planet_count, metrics.triangle_count
                ));

                let history = self.frame_time_history();
                if !history.is_empty() {
                    ui.plot_lines("##frame_times", &history)
                        .graph_size([170.0, 30.0])
                        .scale_min(0.0)
                        .scale_max(50.0)
                        .build();
                }
            });
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages_over_window() {
        let mut monitor = PerformanceMonitor::with_samples(4);
        for ms in [10, 20, 30, 40] {
            monitor.record_frame(Duration::from_millis(ms));
        }
        monitor.update_metrics();

        let metrics = monitor.metrics();
        assert!((metrics.frame_time_ms - 25.0).abs() < 1e-3);
        assert!((metrics.fps - 40.0).abs() < 1e-2);
        assert!((metrics.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((metrics.max_frame_time_ms - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_window_drops_oldest_sample() {
        let mut monitor = PerformanceMonitor::with_samples(2);
        monitor.record_frame(Duration::from_millis(100));
        monitor.record_frame(Duration::from_millis(10));
        monitor.record_frame(Duration::from_millis(10));
        monitor.update_metrics();

        assert_eq!(monitor.frame_time_history().len(), 2);
        assert!((monitor.metrics().max_frame_time_ms - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(16));
        monitor.update_render_stats(10, 5120);
        monitor.reset();

        assert!(monitor.frame_time_history().is_empty());
        assert_eq!(monitor.metrics(), &PerformanceMetrics::default());
    }
}
