use crate::config::Config;
use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::logger::interface::Logger;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

pub struct DeviceCameraNokhwa {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    camera: Mutex<Option<Camera>>,
    events_tx: Sender<DeviceCameraEvent>,
    events_rx: Mutex<Option<Receiver<DeviceCameraEvent>>>,
}

impl DeviceCameraNokhwa {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("nokhwa"),
            camera: Mutex::new(None),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    /// Pick a device index, preferring one whose name marks it rear-facing.
    fn pick_device(&self) -> Result<CameraIndex, Box<dyn std::error::Error + Send + Sync>> {
        let devices =
            nokhwa::query(ApiBackend::Auto).map_err(|e| format!("query cameras: {}", e))?;

        if devices.is_empty() {
            return Err("no camera devices found".into());
        }

        if self.config.prefer_rear_camera {
            if let Some(info) = devices.iter().find(|d| {
                let name = d.human_name().to_lowercase();
                name.contains("back") || name.contains("rear")
            }) {
                self.logger
                    .info(&format!("Using rear-facing camera: {}", info.human_name()))?;
                return Ok(info.index().clone());
            }
        }

        self.logger
            .info(&format!("Using camera: {}", devices[0].human_name()))?;
        Ok(devices[0].index().clone())
    }
}

impl DeviceCamera for DeviceCameraNokhwa {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.camera.lock().unwrap();

        if let Some(mut previous) = guard.take() {
            self.logger.info("Releasing previous stream")?;
            let _ = previous.stop_stream();
        }

        let index = self.pick_device()?;

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(self.config.capture_width, self.config.capture_height),
                FrameFormat::YUYV,
                self.config.capture_frame_rate,
            ),
        ));

        let mut camera =
            Camera::new(index, requested).map_err(|e| format!("open camera: {}", e))?;

        camera
            .open_stream()
            .map_err(|e| format!("open stream: {}", e))?;

        let actual = camera.resolution();
        self.logger.info(&format!(
            "Stream open at {}x{}",
            actual.width(),
            actual.height()
        ))?;

        *guard = Some(camera);
        let _ = self.events_tx.send(DeviceCameraEvent::Connected);
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.camera.lock().unwrap();
        match guard.take() {
            Some(mut camera) => {
                camera
                    .stop_stream()
                    .map_err(|e| format!("stop stream: {}", e))?;
                self.logger.info("Stream released")?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.camera.lock().unwrap();
        let camera = guard.as_mut().ok_or("capture is not active")?;

        let buffer = match camera.frame() {
            Ok(buffer) => buffer,
            Err(e) => {
                // A live stream only fails to deliver when the device is gone.
                let _ = self.logger.error(&format!("Frame grab failed: {}", e));
                let _ = self.events_tx.send(DeviceCameraEvent::Disconnected);
                return Err(format!("grab frame: {}", e).into());
            }
        };

        let frame = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| format!("decode frame: {}", e))?;

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
