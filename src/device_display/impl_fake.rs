use crate::device_display::interface::{DeviceDisplay, DeviceDisplayEvent, ViewModel};
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Records rendered views and lets tests inject user input.
pub struct DeviceDisplayFake {
    pub rendered: Arc<Mutex<Vec<ViewModel>>>,
    events_tx: Sender<DeviceDisplayEvent>,
    events_rx: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            rendered: Arc::new(Mutex::new(Vec::new())),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    /// Simulate user input arriving from the display.
    #[allow(dead_code)]
    pub fn emit(&self, event: DeviceDisplayEvent) {
        let _ = self.events_tx.send(event);
    }

    #[allow(dead_code)]
    pub fn last_rendered(&self) -> Option<ViewModel> {
        self.rendered.lock().unwrap().last().cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn render(&mut self, view: &ViewModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.rendered.lock().unwrap().push(view.clone());
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceDisplayEvent> {
        self.events_rx
            .lock()
            .unwrap()
            .take()
            .expect("display events already subscribed")
    }
}
