use crate::device_clipboard::interface::DeviceClipboard;
use std::sync::{Arc, Mutex};

/// Records writes; can be told to fail.
pub struct DeviceClipboardFake {
    pub writes: Arc<Mutex<Vec<String>>>,
    fail: Mutex<bool>,
}

impl DeviceClipboardFake {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            fail: Mutex::new(false),
        }
    }

    #[allow(dead_code)]
    pub fn fail_next_writes(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl DeviceClipboard for DeviceClipboardFake {
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if *self.fail.lock().unwrap() {
            return Err("clipboard unavailable".into());
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
