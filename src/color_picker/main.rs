use crate::color_picker::core::{init, Event, Model};
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_clipboard::interface::DeviceClipboard;
use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ColorPicker {
    pub model: Arc<Mutex<Model>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_clipboard: Arc<dyn DeviceClipboard + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl ColorPicker {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_clipboard: Arc<dyn DeviceClipboard + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let initial = init();

        Self {
            config,
            logger,
            device_camera,
            device_clipboard,
            device_display,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            model: Arc::new(Mutex::new(initial.0)),
        }
    }
}
