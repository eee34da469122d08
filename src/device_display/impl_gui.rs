use crate::device_camera::interface::Frame;
use crate::device_display::interface::{
    CaptureView, DeviceDisplay, DeviceDisplayEvent, MarkerId, MarkerView, Severity, ViewModel,
};
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const MARKER_RADIUS: f32 = 10.0;
const MARKER_HIT_RADIUS: f32 = 14.0;

pub struct DeviceDisplayGui {
    view: Arc<Mutex<ViewModel>>,
    egui_ctx: Arc<Mutex<Option<egui::Context>>>,
    events_tx: Sender<DeviceDisplayEvent>,
    events_rx: Mutex<Option<Receiver<DeviceDisplayEvent>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceDisplayGui {
    pub fn new(
        egui_ctx: Arc<Mutex<Option<egui::Context>>>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            view: Arc::new(Mutex::new(ViewModel::default())),
            egui_ctx,
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            logger: logger.with_namespace("display").with_namespace("gui"),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let view = self.view.clone();
        let events = self.events_tx.clone();
        let ctx_slot = self.egui_ctx.clone();

        self.logger.info("Opening window")?;

        // Spawn the window in a separate thread
        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([960.0, 600.0])
                    .with_min_inner_size([640.0, 420.0]),
                ..Default::default()
            };

            let _ = eframe::run_native(
                "Camera Color Picker",
                options,
                Box::new(move |cc| {
                    *ctx_slot.lock().unwrap() = Some(cc.egui_ctx.clone());
                    Box::new(PickerWindow::new(view, events))
                }),
            );
        });

        Ok(())
    }

    fn render(&mut self, view: &ViewModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.view.lock().unwrap() = view.clone();
        if let Some(ctx) = self.egui_ctx.lock().unwrap().as_ref() {
            ctx.request_repaint();
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

struct PickerWindow {
    view: Arc<Mutex<ViewModel>>,
    events: Sender<DeviceDisplayEvent>,
    texture: Option<egui::TextureHandle>,
    uploaded_frame: Option<Arc<Frame>>,
}

impl PickerWindow {
    fn new(view: Arc<Mutex<ViewModel>>, events: Sender<DeviceDisplayEvent>) -> Self {
        Self {
            view,
            events,
            texture: None,
            uploaded_frame: None,
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context, view: &ViewModel) {
        let Some(frame) = &view.frame else {
            return;
        };
        if let Some(previous) = &self.uploaded_frame {
            if Arc::ptr_eq(previous, frame) {
                return;
            }
        }

        let size = [frame.width() as usize, frame.height() as usize];
        let pixels = frame
            .as_raw()
            .chunks_exact(3)
            .map(|p| egui::Color32::from_rgb(p[0], p[1], p[2]))
            .collect();
        let image = egui::ColorImage { size, pixels };

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    "camera-frame",
                    image,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
        self.uploaded_frame = Some(frame.clone());
    }

    fn video_area(&self, ui: &mut egui::Ui, view: &ViewModel) {
        let avail = ui.available_rect_before_wrap();
        let video_rect = match &view.frame {
            Some(frame) => fit_rect(avail, frame.width() as f32 / frame.height() as f32),
            None => avail,
        };

        let response = ui.allocate_rect(video_rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(avail);

        painter.rect_filled(avail, 0.0, egui::Color32::from_rgb(18, 18, 18));

        match (&self.texture, &view.frame) {
            (Some(texture), Some(_)) => {
                // Dim the last frame once capture stops; readouts stay as-is.
                let tint = if view.capture == CaptureView::Active {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::from_gray(110)
                };
                painter.image(
                    texture.id(),
                    video_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    tint,
                );
            }
            _ => {
                painter.text(
                    avail.center(),
                    egui::Align2::CENTER_CENTER,
                    "Camera off",
                    egui::FontId::proportional(18.0),
                    egui::Color32::from_gray(120),
                );
            }
        }

        for marker in &view.markers {
            let center = marker_pos(video_rect, marker);
            let fill = marker
                .swatch
                .as_ref()
                .map(|s| egui::Color32::from_rgb(s.red, s.green, s.blue))
                .unwrap_or(egui::Color32::from_gray(60));
            painter.circle_filled(center, MARKER_RADIUS, fill);
            painter.circle_stroke(center, MARKER_RADIUS, egui::Stroke::new(2.0, egui::Color32::WHITE));
            painter.circle_stroke(
                center,
                MARKER_RADIUS + 1.5,
                egui::Stroke::new(1.0, egui::Color32::BLACK),
            );
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(id) = hit_marker(video_rect, &view.markers, pos) {
                    let _ = self.events.send(DeviceDisplayEvent::MarkerGrabbed(id));
                }
            }
        }
        // Drag tracking is whole-window: the pointer may leave the video rect
        // and the percentages go out of range, which the core clamps.
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x_percent = (pos.x - video_rect.left()) / video_rect.width() * 100.0;
                let y_percent = (pos.y - video_rect.top()) / video_rect.height() * 100.0;
                let _ = self
                    .events
                    .send(DeviceDisplayEvent::PointerMoved { x_percent, y_percent });
            }
        }
        if response.drag_released() {
            let _ = self.events.send(DeviceDisplayEvent::PointerReleased);
        }
    }

    fn swatch_panel(&self, ui: &mut egui::Ui, view: &ViewModel) {
        ui.add_space(8.0);

        match view.capture {
            CaptureView::Inactive => {
                if ui.button("Start camera").clicked() {
                    let _ = self.events.send(DeviceDisplayEvent::StartPressed);
                }
            }
            CaptureView::Starting => {
                ui.add_enabled(false, egui::Button::new("Starting..."));
            }
            CaptureView::Active => {
                if ui.button("Stop camera").clicked() {
                    let _ = self.events.send(DeviceDisplayEvent::StopPressed);
                }
            }
        }

        ui.separator();

        for marker in &view.markers {
            let name = match marker.id {
                MarkerId::Top => "Top point",
                MarkerId::Bottom => "Bottom point",
            };
            ui.label(egui::RichText::new(name).strong());

            match &marker.swatch {
                Some(swatch) => {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), 36.0),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(
                        rect,
                        4.0,
                        egui::Color32::from_rgb(swatch.red, swatch.green, swatch.blue),
                    );
                    ui.painter()
                        .rect_stroke(rect, 4.0, egui::Stroke::new(1.0, egui::Color32::from_gray(90)));

                    ui.monospace(swatch.hex.as_str());
                    ui.monospace(swatch.rgb.as_str());

                    let label = if swatch.just_copied { "Copied" } else { "Copy hex" };
                    if ui.button(label).clicked() {
                        let _ = self.events.send(DeviceDisplayEvent::CopyPressed(marker.id));
                    }
                }
                None => {
                    ui.label(egui::RichText::new("No sample yet").weak());
                }
            }
            ui.add_space(12.0);
        }
    }

    fn toasts(&self, ctx: &egui::Context, view: &ViewModel) {
        if view.notifications.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .show(ctx, |ui| {
                for notification in &view.notifications {
                    let accent = match notification.severity {
                        Severity::Error => egui::Color32::from_rgb(205, 92, 92),
                        Severity::Info => egui::Color32::from_rgb(110, 170, 110),
                    };
                    egui::Frame::none()
                        .fill(egui::Color32::from_rgb(32, 32, 32))
                        .stroke(egui::Stroke::new(1.0, accent))
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(notification.title.as_str())
                                    .color(accent)
                                    .strong(),
                            );
                            if !notification.description.is_empty() {
                                ui.label(
                                    egui::RichText::new(notification.description.as_str())
                                        .size(12.0),
                                );
                            }
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for PickerWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.view.lock().unwrap().clone();

        self.upload_frame(ctx, &view);

        egui::SidePanel::right("swatches")
            .resizable(false)
            .default_width(230.0)
            .show(ctx, |ui| self.swatch_panel(ui, &view));

        egui::CentralPanel::default().show(ctx, |ui| self.video_area(ui, &view));

        self.toasts(ctx, &view);

        ctx.request_repaint_after(Duration::from_millis(50));
    }
}

fn fit_rect(avail: egui::Rect, aspect: f32) -> egui::Rect {
    let avail_aspect = avail.width() / avail.height();
    let size = if avail_aspect > aspect {
        egui::vec2(avail.height() * aspect, avail.height())
    } else {
        egui::vec2(avail.width(), avail.width() / aspect)
    };
    egui::Rect::from_center_size(avail.center(), size)
}

fn marker_pos(video_rect: egui::Rect, marker: &MarkerView) -> egui::Pos2 {
    egui::pos2(
        video_rect.left() + video_rect.width() * marker.x_percent / 100.0,
        video_rect.top() + video_rect.height() * marker.y_percent / 100.0,
    )
}

fn hit_marker(video_rect: egui::Rect, markers: &[MarkerView], pos: egui::Pos2) -> Option<MarkerId> {
    markers
        .iter()
        .map(|m| (m.id, marker_pos(video_rect, m).distance(pos)))
        .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(id, _)| id)
}
