use super::main::ColorPicker;
use crate::color_picker::color::sample_pixel;
use crate::color_picker::core::{Effect, Event, FrameHandle};
use std::sync::Arc;
use std::time::Instant;

impl ColorPicker {
    pub(crate) fn interpret_effect(&self, effect: Effect) {
        if !matches!(effect, Effect::SampleFrame { .. }) {
            let _ = self.logger.info(&format!("Running effect: {:?}", effect));
        }

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Event::CameraEvent(event)).is_err() {
                        return;
                    }
                }
            }

            Effect::SubscribeToDisplayEvents => {
                let events = self.device_display.lock().unwrap().events();
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Event::DisplayEvent(event)).is_err() {
                        return;
                    }
                }
            }

            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick(Instant::now())).is_err() {
                    return;
                }
            },

            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }

            Effect::StopCamera => {
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.error(&format!("Camera stop failed: {}", e));
                }
            }

            Effect::SampleFrame { top, bottom } => {
                let frame = match self.device_camera.capture_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        let _ = self.logger.error(&format!("Frame capture failed: {}", e));
                        return;
                    }
                };

                // Stream still negotiating its dimensions; skip this tick.
                if frame.width() == 0 || frame.height() == 0 {
                    return;
                }

                let top_sample = sample_pixel(&frame, &top);
                let bottom_sample = sample_pixel(&frame, &bottom);
                let _ = self.event_sender.send(Event::SampleDone {
                    frame: FrameHandle(Arc::new(frame)),
                    top: top_sample,
                    bottom: bottom_sample,
                });
            }

            Effect::WriteClipboard { hex } => {
                let result = self.device_clipboard.write_text(&hex);
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Clipboard write failed: {}", e));
                }
                let _ = self
                    .event_sender
                    .send(Event::ClipboardWriteDone { hex, result });
            }
        }
    }
}
