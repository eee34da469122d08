use color_picker::main::ColorPicker;
use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_nokhwa::DeviceCameraNokhwa;
use device_camera::interface::DeviceCamera;
use device_clipboard::impl_gui::DeviceClipboardGui;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use eframe::egui;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod color_picker;
mod config;
mod device_camera;
mod device_clipboard;
mod device_display;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let fake_camera = std::env::args().any(|arg| arg == "--fake-camera");
    let headless = std::env::args().any(|arg| arg == "--headless");

    // The GUI fills this in once the window is up; the clipboard device
    // writes through it.
    let egui_ctx: Arc<Mutex<Option<egui::Context>>> = Arc::new(Mutex::new(None));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = if fake_camera {
        Arc::new(DeviceCameraFake::new(config.clone(), logger.clone()))
    } else {
        Arc::new(DeviceCameraNokhwa::new(config.clone(), logger.clone()))
    };

    let device_clipboard = Arc::new(DeviceClipboardGui::new(egui_ctx.clone(), logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = if headless {
        Arc::new(Mutex::new(DeviceDisplayConsole::new(logger.clone())))
    } else {
        Arc::new(Mutex::new(DeviceDisplayGui::new(egui_ctx, logger.clone())))
    };

    device_display.lock().unwrap().init()?;

    let color_picker = ColorPicker::new(
        config,
        logger,
        device_camera,
        device_clipboard,
        device_display,
    );

    // The console display has no start button; begin capture right away.
    if headless {
        let _ = color_picker.event_sender.send(
            color_picker::core::Event::DisplayEvent(
                device_display::interface::DeviceDisplayEvent::StartPressed,
            ),
        );
    }

    color_picker.run()?;

    Ok(())
}
