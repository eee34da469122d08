use crate::device_display::interface::{
    DeviceDisplay, DeviceDisplayEvent, MarkerId, ViewModel,
};
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Headless display: prints a one-line summary whenever it changes.
/// It never produces user input.
pub struct DeviceDisplayConsole {
    logger: Arc<dyn Logger + Send + Sync>,
    last_line: Mutex<String>,
    // Held so the receiver side stays open even though no events are sent.
    _events_tx: Sender<DeviceDisplayEvent>,
    events_rx: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
}

impl DeviceDisplayConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            logger: logger.with_namespace("display").with_namespace("console"),
            last_line: Mutex::new(String::new()),
            _events_tx: events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }
}

fn summarize(view: &ViewModel) -> String {
    let mut parts = vec![format!("capture: {:?}", view.capture)];

    for marker in &view.markers {
        let name = match marker.id {
            MarkerId::Top => "top",
            MarkerId::Bottom => "bottom",
        };
        match &marker.swatch {
            Some(swatch) => parts.push(format!("{}: {}", name, swatch.hex)),
            None => parts.push(format!("{}: -", name)),
        }
    }

    for notification in &view.notifications {
        parts.push(format!("[{:?}] {}", notification.severity, notification.title));
    }

    parts.join(" | ")
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn render(&mut self, view: &ViewModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        let line = summarize(view);
        let mut last = self.last_line.lock().unwrap();
        if *last != line {
            self.logger.info(&line)?;
            *last = line;
        }
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
