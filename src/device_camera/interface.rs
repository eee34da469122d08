/// A captured camera frame in 8-bit RGB at the stream's native resolution.
pub type Frame = image::RgbImage;

#[derive(Debug, Clone)]
pub enum DeviceCameraEvent {
    Connected,
    Disconnected,
}

pub trait DeviceCamera: Send + Sync {
    /// Acquire the camera stream. Any previously held stream is released
    /// first, so a start can never stack a second live stream.
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Halt the stream and release the capture session.
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Grab the most recent frame. Fails while no stream is held.
    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>>;

    /// Connection events. May be taken once; the channel stays open for the
    /// life of the device.
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceCameraEvent>;
}
