use crate::device_clipboard::interface::DeviceClipboard;
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::sync::{Arc, Mutex};

/// Routes clipboard writes through the egui platform output; eframe flushes
/// `copied_text` to the OS clipboard at the end of the next frame.
pub struct DeviceClipboardGui {
    egui_ctx: Arc<Mutex<Option<egui::Context>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceClipboardGui {
    pub fn new(
        egui_ctx: Arc<Mutex<Option<egui::Context>>>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            egui_ctx,
            logger: logger.with_namespace("clipboard").with_namespace("gui"),
        }
    }
}

impl DeviceClipboard for DeviceClipboardGui {
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.egui_ctx.lock().unwrap().as_ref() {
            Some(ctx) => {
                ctx.output_mut(|output| output.copied_text = text.to_string());
                ctx.request_repaint();
                self.logger.info(&format!("Wrote {:?}", text))?;
                Ok(())
            }
            None => Err("display window is not ready".into()),
        }
    }
}
