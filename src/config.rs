use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Sampling period for the frame sampler while capture is active.
    pub tick_rate: Duration,
    /// How long a copied hex value stays flagged in the UI.
    pub copied_flash: Duration,
    /// How long a notification toast stays visible.
    pub notification_lifetime: Duration,
    pub capture_width: u32,
    pub capture_height: u32,
    pub capture_frame_rate: u32,
    pub prefer_rear_camera: bool,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            copied_flash: Duration::from_secs(2),
            notification_lifetime: Duration::from_secs(4),
            capture_width: 1280,
            capture_height: 720,
            capture_frame_rate: 30,
            prefer_rear_camera: true,
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
