// Selection window - maps a horizontal drag over the track to a time range

use crate::domain::errors::DomainError;
use crate::domain::model::TrimRange;
use crate::utils::time::round_to_hundredths;

/// Final range reported when a drag settles, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRange {
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl SelectionRange {
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Receives the settled range at the end of every drag
pub type SelectionObserver = Box<dyn FnMut(SelectionRange) + Send>;

/// Fixed-length window that the user slides along a track to choose what to keep.
///
/// Positions live in pixel space: `0 <= start_pixel <= end_pixel <= track_width`,
/// and `end_pixel - start_pixel` always equals `window_pixel_length()`.
/// Invalid inputs are clamped, never rejected.
pub struct SelectionWindow {
    track_width: f64,
    video_duration: f64,
    max_window_seconds: f64,
    window_pixel_length: f64,
    start_pixel: f64,
    end_pixel: f64,
    drag_origin: Option<f64>,
    observer: Option<SelectionObserver>,
}

impl SelectionWindow {
    /// Create a window over a track of `track_width` pixels.
    ///
    /// `video_duration` may be 0 while the duration is still unknown; the
    /// window is then zero-length until [`set_video_duration`](Self::set_video_duration)
    /// supplies a real value.
    pub fn new(track_width: f64, video_duration: f64, max_window_seconds: f64) -> Self {
        let mut window = Self {
            track_width: non_negative(track_width),
            video_duration: non_negative(video_duration),
            max_window_seconds: non_negative(max_window_seconds),
            window_pixel_length: 0.0,
            start_pixel: 0.0,
            end_pixel: 0.0,
            drag_origin: None,
            observer: None,
        };
        window.recompute_length();
        window
    }

    /// Register the observer notified by [`end_drag`](Self::end_drag)
    pub fn with_observer(mut self, observer: SelectionObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: SelectionObserver) {
        self.observer = Some(observer);
    }

    pub fn set_video_duration(&mut self, video_duration: f64) {
        self.video_duration = non_negative(video_duration);
        self.recompute_length();
    }

    pub fn set_max_window_seconds(&mut self, max_window_seconds: f64) {
        self.max_window_seconds = non_negative(max_window_seconds);
        self.recompute_length();
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn video_duration(&self) -> f64 {
        self.video_duration
    }

    pub fn max_window_seconds(&self) -> f64 {
        self.max_window_seconds
    }

    pub fn window_pixel_length(&self) -> f64 {
        self.window_pixel_length
    }

    pub fn start_pixel(&self) -> f64 {
        self.start_pixel
    }

    pub fn end_pixel(&self) -> f64 {
        self.end_pixel
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Capture the current position as the reference for subsequent deltas
    pub fn begin_drag(&mut self) {
        self.drag_origin = Some(self.start_pixel);
    }

    /// Move the window to `origin + delta_pixels`, clamped to the track.
    ///
    /// The left edge wins when both edges would overflow.
    pub fn update_drag(&mut self, delta_pixels: f64) {
        if delta_pixels.is_nan() {
            return;
        }
        let origin = self.drag_origin.unwrap_or(self.start_pixel);
        self.place(origin + delta_pixels);
    }

    /// Settle the window and report the chosen range to the observer
    pub fn end_drag(&mut self) -> SelectionRange {
        self.drag_origin = None;
        let range = SelectionRange {
            start_seconds: self.pixel_to_seconds(self.start_pixel),
            end_seconds: self.pixel_to_seconds(self.end_pixel),
        };
        if let Some(observer) = self.observer.as_mut() {
            observer(range);
        }
        range
    }

    /// Start of the window in seconds, rounded to hundredths
    pub fn start_seconds(&self) -> f64 {
        round_to_hundredths(self.pixel_to_seconds(self.start_pixel))
    }

    /// End of the window in seconds, rounded to hundredths
    pub fn end_seconds(&self) -> f64 {
        round_to_hundredths(self.pixel_to_seconds(self.end_pixel))
    }

    /// Where playback should jump to when it has left the window, if anywhere
    pub fn playback_correction(&self, position_seconds: f64) -> Option<f64> {
        let start = self.start_seconds();
        if position_seconds < start || position_seconds > self.end_seconds() {
            Some(start)
        } else {
            None
        }
    }

    /// The current selection as a trim request range
    pub fn trim_range(&self) -> Result<TrimRange, DomainError> {
        TrimRange::new(self.start_seconds(), self.end_seconds())
    }

    fn pixel_to_seconds(&self, pixel: f64) -> f64 {
        if self.track_width <= 0.0 {
            return 0.0;
        }
        pixel / self.track_width * self.video_duration
    }

    fn recompute_length(&mut self) {
        self.window_pixel_length = if self.video_duration > 0.0 {
            (self.max_window_seconds / self.video_duration * self.track_width).min(self.track_width)
        } else {
            0.0
        };
        let start = self.start_pixel;
        self.place(start);
    }

    fn place(&mut self, candidate_start: f64) {
        let length = self.window_pixel_length;
        let mut start = candidate_start;
        let mut end = start + length;

        if start < 0.0 {
            start = 0.0;
            end = length;
        } else if end > self.track_width {
            end = self.track_width;
            start = self.track_width - length;
        }

        self.start_pixel = start;
        self.end_pixel = end;
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
