use crate::device_camera::interface::Frame;
use std::error::Error;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerId {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// User input reported by the display. Pointer positions are raw percentages
/// relative to the video rect and may fall outside [0, 100]; clamping is the
/// core's job.
#[derive(Debug, Clone)]
pub enum DeviceDisplayEvent {
    StartPressed,
    StopPressed,
    MarkerGrabbed(MarkerId),
    PointerMoved { x_percent: f32, y_percent: f32 },
    PointerReleased,
    CopyPressed(MarkerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureView {
    #[default]
    Inactive,
    Starting,
    Active,
}

#[derive(Debug, Clone)]
pub struct SwatchView {
    pub hex: String,
    pub rgb: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub just_copied: bool,
}

#[derive(Debug, Clone)]
pub struct MarkerView {
    pub id: MarkerId,
    pub x_percent: f32,
    pub y_percent: f32,
    pub swatch: Option<SwatchView>,
}

#[derive(Debug, Clone)]
pub struct NotificationView {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub capture: CaptureView,
    pub frame: Option<Arc<Frame>>,
    pub markers: Vec<MarkerView>,
    pub notifications: Vec<NotificationView>,
}

pub trait DeviceDisplay: Send + Sync {
    /// Bring up the display surface.
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace the displayed view wholesale.
    fn render(&mut self, view: &ViewModel) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// User input events. May be taken once; the channel stays open for the
    /// life of the device.
    fn events(&self) -> Receiver<DeviceDisplayEvent>;
}
