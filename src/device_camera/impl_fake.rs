use crate::config::Config;
use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Synthesizes a color gradient with a little sensor noise so the whole
/// application can run without any camera hardware.
pub struct DeviceCameraFake {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    active: Mutex<bool>,
    events_tx: Sender<DeviceCameraEvent>,
    events_rx: Mutex<Option<Receiver<DeviceCameraEvent>>>,
}

impl DeviceCameraFake {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("fake"),
            active: Mutex::new(false),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        std::thread::sleep(std::time::Duration::from_millis(200));
        *self.active.lock().unwrap() = true;
        let _ = self.events_tx.send(DeviceCameraEvent::Connected);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self.active.lock().unwrap() = false;
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        if !*self.active.lock().unwrap() {
            return Err("capture is not active".into());
        }

        let width = self.config.capture_width;
        let height = self.config.capture_height;
        let mut rng = rand::rng();

        let frame = Frame::from_fn(width, height, |x, y| {
            let red = (x * 255 / width.max(1)) as u8;
            let green = (y * 255 / height.max(1)) as u8;
            let blue = 120u8.saturating_add(rng.random_range(0..16));
            image::Rgb([red, green, blue])
        });

        Ok(frame)
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        self.events_rx
            .lock()
            .unwrap()
            .take()
            .expect("camera events already subscribed")
    }
}
