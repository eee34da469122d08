use crate::color_picker::color::ColorSample;
use crate::config::Config;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::device_display::interface::{DeviceDisplayEvent, MarkerId, Severity};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x_percent: f32,
    pub y_percent: f32,
}

impl SamplePoint {
    pub fn clamped(x_percent: f32, y_percent: f32) -> Self {
        Self {
            x_percent: x_percent.clamp(0.0, 100.0),
            y_percent: y_percent.clamp(0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPair {
    pub top: SamplePoint,
    pub bottom: SamplePoint,
}

impl Default for PointPair {
    fn default() -> Self {
        Self {
            top: SamplePoint {
                x_percent: 50.0,
                y_percent: 20.0,
            },
            bottom: SamplePoint {
                x_percent: 50.0,
                y_percent: 80.0,
            },
        }
    }
}

impl PointPair {
    pub fn get(&self, id: MarkerId) -> SamplePoint {
        match id {
            MarkerId::Top => self.top,
            MarkerId::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, id: MarkerId, point: SamplePoint) {
        match id {
            MarkerId::Top => self.top = point,
            MarkerId::Bottom => self.bottom = point,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplePair {
    pub top: Option<ColorSample>,
    pub bottom: Option<ColorSample>,
}

impl SamplePair {
    pub fn get(&self, id: MarkerId) -> Option<&ColorSample> {
        match id {
            MarkerId::Top => self.top.as_ref(),
            MarkerId::Bottom => self.bottom.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Inactive,
    Starting,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(MarkerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopiedFlag {
    pub hex: String,
    pub at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub posted_at: Instant,
}

impl Notification {
    fn info(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            severity: Severity::Info,
            posted_at: Instant::now(),
        }
    }

    fn error(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            severity: Severity::Error,
            posted_at: Instant::now(),
        }
    }
}

/// Cheap-to-clone handle to a captured frame; Debug stays short because the
/// run loop logs models wholesale.
#[derive(Clone)]
pub struct FrameHandle(pub Arc<Frame>);

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}x{})", self.0.width(), self.0.height())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub capture: CaptureState,
    pub drag: DragState,
    pub points: PointPair,
    pub samples: SamplePair,
    pub frame: Option<FrameHandle>,
    pub copied: Option<CopiedFlag>,
    pub notifications: Vec<Notification>,
}

#[derive(Debug)]
pub enum Event {
    Tick(Instant),
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    DisplayEvent(DeviceDisplayEvent),
    SampleDone {
        frame: FrameHandle,
        top: ColorSample,
        bottom: ColorSample,
    },
    ClipboardWriteDone {
        hex: String,
        result: Result<(), Box<dyn std::error::Error + Send + Sync>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToCameraEvents,
    SubscribeToDisplayEvents,
    SubscribeTick,
    StartCamera,
    StopCamera,
    SampleFrame {
        top: SamplePoint,
        bottom: SamplePoint,
    },
    WriteClipboard {
        hex: String,
    },
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![
            Effect::SubscribeToDisplayEvents,
            Effect::SubscribeToCameraEvents,
            Effect::SubscribeTick,
        ],
    )
}

pub fn transition(config: &Config, mut model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::DisplayEvent(DeviceDisplayEvent::StartPressed) => match model.capture {
            CaptureState::Inactive => {
                model.capture = CaptureState::Starting;
                (model, vec![Effect::StartCamera])
            }
            // A stream is live or being acquired; refuse the second start.
            CaptureState::Starting | CaptureState::Active => (model, vec![]),
        },

        Event::CameraStartDone(Ok(())) => match model.capture {
            CaptureState::Starting => {
                model.capture = CaptureState::Active;
                (model, vec![])
            }
            // The user pressed stop while the start was in flight; the stream
            // that just came up must not stay live unowned.
            CaptureState::Inactive => (model, vec![Effect::StopCamera]),
            CaptureState::Active => (model, vec![]),
        },

        Event::CameraStartDone(Err(e)) => {
            if model.capture == CaptureState::Starting {
                model.capture = CaptureState::Inactive;
            }
            model
                .notifications
                .push(Notification::error("Camera unavailable", e.to_string()));
            (model, vec![])
        }

        Event::DisplayEvent(DeviceDisplayEvent::StopPressed) => match model.capture {
            CaptureState::Inactive => (model, vec![]),
            CaptureState::Starting | CaptureState::Active => {
                // Samples and the last frame are intentionally left in place.
                model.capture = CaptureState::Inactive;
                (model, vec![Effect::StopCamera])
            }
        },

        Event::CameraEvent(DeviceCameraEvent::Disconnected) => match model.capture {
            CaptureState::Inactive => (model, vec![]),
            CaptureState::Starting | CaptureState::Active => {
                model.capture = CaptureState::Inactive;
                model.notifications.push(Notification::error(
                    "Camera disconnected",
                    "The capture stream was lost".to_string(),
                ));
                (model, vec![Effect::StopCamera])
            }
        },

        Event::CameraEvent(DeviceCameraEvent::Connected) => (model, vec![]),

        Event::Tick(now) => {
            let copied_expired = model
                .copied
                .as_ref()
                .is_some_and(|copied| now.duration_since(copied.at) >= config.copied_flash);
            if copied_expired {
                model.copied = None;
            }
            model
                .notifications
                .retain(|n| now.duration_since(n.posted_at) < config.notification_lifetime);

            let effects = match model.capture {
                CaptureState::Active => vec![Effect::SampleFrame {
                    top: model.points.top,
                    bottom: model.points.bottom,
                }],
                _ => vec![],
            };
            (model, effects)
        }

        Event::SampleDone { frame, top, bottom } => match model.capture {
            CaptureState::Active => {
                // Both swatches move together, one model update per tick.
                model.frame = Some(frame);
                model.samples = SamplePair {
                    top: Some(top),
                    bottom: Some(bottom),
                };
                (model, vec![])
            }
            // A tick that was in flight when capture stopped.
            CaptureState::Inactive | CaptureState::Starting => (model, vec![]),
        },

        Event::DisplayEvent(DeviceDisplayEvent::MarkerGrabbed(id)) => {
            if model.drag == DragState::Idle {
                model.drag = DragState::Dragging(id);
            }
            (model, vec![])
        }

        Event::DisplayEvent(DeviceDisplayEvent::PointerMoved {
            x_percent,
            y_percent,
        }) => {
            if let DragState::Dragging(id) = model.drag {
                model
                    .points
                    .set(id, SamplePoint::clamped(x_percent, y_percent));
            }
            (model, vec![])
        }

        Event::DisplayEvent(DeviceDisplayEvent::PointerReleased) => {
            model.drag = DragState::Idle;
            (model, vec![])
        }

        Event::DisplayEvent(DeviceDisplayEvent::CopyPressed(id)) => {
            let hex = model.samples.get(id).map(|sample| sample.display_hex());
            match hex {
                Some(hex) => (model, vec![Effect::WriteClipboard { hex }]),
                None => (model, vec![]),
            }
        }

        Event::ClipboardWriteDone {
            hex,
            result: Ok(()),
        } => {
            model.copied = Some(CopiedFlag {
                hex: hex.clone(),
                at: Instant::now(),
            });
            model.notifications.push(Notification::info(
                "Copied to clipboard",
                hex,
            ));
            (model, vec![])
        }

        // Write failures are logged by the effect interpreter; the model is
        // untouched and the user sees no confirmation.
        Event::ClipboardWriteDone { result: Err(_), .. } => (model, vec![]),
    }
}
