use crate::color_picker::color::ColorSample;
use crate::color_picker::core::{
    init, transition, CaptureState, CopiedFlag, DragState, Effect, Event, Model, Notification,
    SamplePair, SamplePoint,
};
use crate::config::Config;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::device_display::interface::{DeviceDisplayEvent, MarkerId, Severity};
use std::sync::Arc;
use std::time::Instant;

fn frame_handle() -> crate::color_picker::core::FrameHandle {
    crate::color_picker::core::FrameHandle(Arc::new(Frame::from_pixel(
        8,
        8,
        image::Rgb([10, 20, 30]),
    )))
}

fn sample_done() -> Event {
    Event::SampleDone {
        frame: frame_handle(),
        top: ColorSample::from_rgb(10, 20, 30),
        bottom: ColorSample::from_rgb(40, 50, 60),
    }
}

#[test]
fn test_init() {
    let (model, effects) = init();

    assert_eq!(model.capture, CaptureState::Inactive);
    assert_eq!(model.drag, DragState::Idle);
    assert!(model.samples.top.is_none());
    assert!(model.samples.bottom.is_none());
    assert_eq!(effects.len(), 3);
    assert!(effects.contains(&Effect::SubscribeToDisplayEvents));
    assert!(effects.contains(&Effect::SubscribeToCameraEvents));
    assert!(effects.contains(&Effect::SubscribeTick));
}

#[test]
fn test_default_points() {
    let (model, _) = init();

    assert_eq!(model.points.top, SamplePoint { x_percent: 50.0, y_percent: 20.0 });
    assert_eq!(model.points.bottom, SamplePoint { x_percent: 50.0, y_percent: 80.0 });
}

#[test]
fn test_start_flow() {
    let config = Config::default();
    let (model, _) = init();

    let (model, effects) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::StartPressed),
    );
    assert_eq!(model.capture, CaptureState::Starting);
    assert_eq!(effects, vec![Effect::StartCamera]);

    let (model, effects) = transition(&config, model, Event::CameraStartDone(Ok(())));
    assert_eq!(model.capture, CaptureState::Active);
    assert!(effects.is_empty());
}

#[test]
fn test_start_failure_notifies_and_stays_inactive() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Starting,
        ..Model::default()
    };

    let (model, effects) = transition(
        &config,
        model,
        Event::CameraStartDone(Err("permission denied".into())),
    );

    assert_eq!(model.capture, CaptureState::Inactive);
    assert!(effects.is_empty());
    assert_eq!(model.notifications.len(), 1);
    assert_eq!(model.notifications[0].severity, Severity::Error);
    assert_eq!(model.notifications[0].description, "permission denied");
}

#[test]
fn test_double_start_refused() {
    let config = Config::default();

    for capture in [CaptureState::Starting, CaptureState::Active] {
        let model = Model {
            capture,
            ..Model::default()
        };
        let (model, effects) = transition(
            &config,
            model,
            Event::DisplayEvent(DeviceDisplayEvent::StartPressed),
        );
        assert_eq!(model.capture, capture);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_stop_releases_stream_and_keeps_samples() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Active,
        samples: SamplePair {
            top: Some(ColorSample::from_rgb(1, 2, 3)),
            bottom: Some(ColorSample::from_rgb(4, 5, 6)),
        },
        ..Model::default()
    };

    let (model, effects) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::StopPressed),
    );

    assert_eq!(model.capture, CaptureState::Inactive);
    assert_eq!(effects, vec![Effect::StopCamera]);
    // Stale readouts stay on display.
    assert_eq!(model.samples.top, Some(ColorSample::from_rgb(1, 2, 3)));
    assert_eq!(model.samples.bottom, Some(ColorSample::from_rgb(4, 5, 6)));
}

#[test]
fn test_start_completing_after_stop_releases_stream() {
    let config = Config::default();
    let (model, _) = init();

    // start, then stop while the camera is still coming up
    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::StartPressed),
    );
    let (model, effects) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::StopPressed),
    );
    assert_eq!(effects, vec![Effect::StopCamera]);

    // the late success must not leave the stream live
    let (model, effects) = transition(&config, model, Event::CameraStartDone(Ok(())));
    assert_eq!(model.capture, CaptureState::Inactive);
    assert_eq!(effects, vec![Effect::StopCamera]);
}

#[test]
fn test_tick_samples_only_while_active() {
    let config = Config::default();

    let (model, effects) = transition(&config, Model::default(), Event::Tick(Instant::now()));
    assert_eq!(model.capture, CaptureState::Inactive);
    assert!(effects.is_empty());

    let model = Model {
        capture: CaptureState::Active,
        ..Model::default()
    };
    let (model, effects) = transition(&config, model, Event::Tick(Instant::now()));
    assert_eq!(
        effects,
        vec![Effect::SampleFrame {
            top: model.points.top,
            bottom: model.points.bottom,
        }]
    );
}

#[test]
fn test_tick_carries_points_as_of_this_tick() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Active,
        drag: DragState::Dragging(MarkerId::Top),
        ..Model::default()
    };

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::PointerMoved {
            x_percent: 10.0,
            y_percent: 90.0,
        }),
    );

    let (_, effects) = transition(&config, model, Event::Tick(Instant::now()));
    assert_eq!(
        effects,
        vec![Effect::SampleFrame {
            top: SamplePoint {
                x_percent: 10.0,
                y_percent: 90.0,
            },
            bottom: SamplePoint {
                x_percent: 50.0,
                y_percent: 80.0,
            },
        }]
    );
}

#[test]
fn test_sample_done_updates_frame_and_both_swatches_together() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Active,
        ..Model::default()
    };

    let (model, effects) = transition(&config, model, sample_done());

    assert!(effects.is_empty());
    assert!(model.frame.is_some());
    assert_eq!(model.samples.top, Some(ColorSample::from_rgb(10, 20, 30)));
    assert_eq!(model.samples.bottom, Some(ColorSample::from_rgb(40, 50, 60)));
}

#[test]
fn test_no_sample_update_after_stop() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Active,
        ..Model::default()
    };

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::StopPressed),
    );

    // a tick that was already in flight when stop landed
    let (model, effects) = transition(&config, model, sample_done());

    assert!(effects.is_empty());
    assert!(model.frame.is_none());
    assert!(model.samples.top.is_none());
    assert!(model.samples.bottom.is_none());
}

#[test]
fn test_drag_clamps_to_bounds() {
    let config = Config::default();
    let (model, _) = init();

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::MarkerGrabbed(MarkerId::Top)),
    );
    assert_eq!(model.drag, DragState::Dragging(MarkerId::Top));

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::PointerMoved {
            x_percent: 120.0,
            y_percent: -5.0,
        }),
    );
    assert_eq!(
        model.points.top,
        SamplePoint {
            x_percent: 100.0,
            y_percent: 0.0,
        }
    );
}

#[test]
fn test_drag_moves_only_grabbed_marker() {
    let config = Config::default();
    let (model, _) = init();
    let bottom_before = model.points.bottom;

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::MarkerGrabbed(MarkerId::Top)),
    );
    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::PointerMoved {
            x_percent: 33.0,
            y_percent: 44.0,
        }),
    );

    assert_eq!(
        model.points.top,
        SamplePoint {
            x_percent: 33.0,
            y_percent: 44.0,
        }
    );
    assert_eq!(model.points.bottom, bottom_before);
}

#[test]
fn test_pointer_move_without_drag_is_ignored() {
    let config = Config::default();
    let (model, _) = init();
    let points_before = model.points;

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::PointerMoved {
            x_percent: 1.0,
            y_percent: 1.0,
        }),
    );

    assert_eq!(model.points, points_before);
}

#[test]
fn test_marker_grab_while_dragging_is_ignored() {
    let config = Config::default();
    let model = Model {
        drag: DragState::Dragging(MarkerId::Top),
        ..Model::default()
    };

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::MarkerGrabbed(MarkerId::Bottom)),
    );

    assert_eq!(model.drag, DragState::Dragging(MarkerId::Top));
}

#[test]
fn test_release_ends_drag() {
    let config = Config::default();
    let model = Model {
        drag: DragState::Dragging(MarkerId::Bottom),
        ..Model::default()
    };

    let (model, _) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::PointerReleased),
    );

    assert_eq!(model.drag, DragState::Idle);
}

#[test]
fn test_copy_emits_clipboard_write() {
    let config = Config::default();
    let model = Model {
        samples: SamplePair {
            top: Some(ColorSample::from_rgb(0xaa, 0xbb, 0xcc)),
            bottom: None,
        },
        ..Model::default()
    };

    let (model, effects) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::CopyPressed(MarkerId::Top)),
    );
    assert_eq!(
        effects,
        vec![Effect::WriteClipboard {
            hex: "#aabbcc".to_string(),
        }]
    );

    // no sample yet on the other marker
    let (_, effects) = transition(
        &config,
        model,
        Event::DisplayEvent(DeviceDisplayEvent::CopyPressed(MarkerId::Bottom)),
    );
    assert!(effects.is_empty());
}

#[test]
fn test_copy_confirmation_expires_after_window() {
    let config = Config::default();
    let (model, _) = init();

    let (model, _) = transition(
        &config,
        model,
        Event::ClipboardWriteDone {
            hex: "#aabbcc".to_string(),
            result: Ok(()),
        },
    );

    let copied = model.copied.clone().unwrap();
    assert_eq!(copied.hex, "#aabbcc");
    assert!(model
        .notifications
        .iter()
        .any(|n| n.severity == Severity::Info));

    // still inside the window
    let (model, _) = transition(&config, model, Event::Tick(Instant::now()));
    assert!(model.copied.is_some());

    // past the window
    let (model, _) = transition(
        &config,
        model,
        Event::Tick(Instant::now() + config.copied_flash),
    );
    assert!(model.copied.is_none());
}

#[test]
fn test_expired_flag_not_retriggered_by_unrelated_copy() {
    let config = Config::default();
    let (model, _) = init();

    let (model, _) = transition(
        &config,
        model,
        Event::ClipboardWriteDone {
            hex: "#111111".to_string(),
            result: Ok(()),
        },
    );
    let (model, _) = transition(
        &config,
        model,
        Event::Tick(Instant::now() + config.copied_flash),
    );
    assert!(model.copied.is_none());

    // an unrelated copy flags only its own value
    let (model, _) = transition(
        &config,
        model,
        Event::ClipboardWriteDone {
            hex: "#222222".to_string(),
            result: Ok(()),
        },
    );
    assert_eq!(model.copied.as_ref().unwrap().hex, "#222222");

    let (model, _) = transition(
        &config,
        model,
        Event::Tick(Instant::now() + config.copied_flash),
    );
    assert!(model.copied.is_none());
}

#[test]
fn test_clipboard_failure_leaves_model_unchanged() {
    let config = Config::default();
    let model = Model {
        copied: Some(CopiedFlag {
            hex: "#111111".to_string(),
            at: Instant::now(),
        }),
        ..Model::default()
    };
    let notifications_before = model.notifications.len();

    let (model, effects) = transition(
        &config,
        model,
        Event::ClipboardWriteDone {
            hex: "#222222".to_string(),
            result: Err("clipboard unavailable".into()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(model.copied.as_ref().unwrap().hex, "#111111");
    assert_eq!(model.notifications.len(), notifications_before);
}

#[test]
fn test_camera_disconnect_stops_capture() {
    let config = Config::default();
    let model = Model {
        capture: CaptureState::Active,
        ..Model::default()
    };

    let (model, effects) = transition(
        &config,
        model,
        Event::CameraEvent(DeviceCameraEvent::Disconnected),
    );

    assert_eq!(model.capture, CaptureState::Inactive);
    assert_eq!(effects, vec![Effect::StopCamera]);
    assert!(model
        .notifications
        .iter()
        .any(|n| n.severity == Severity::Error));

    // disconnect while already inactive is a no-op
    let (model, effects) = transition(
        &config,
        model,
        Event::CameraEvent(DeviceCameraEvent::Disconnected),
    );
    assert_eq!(model.capture, CaptureState::Inactive);
    assert!(effects.is_empty());
}

#[test]
fn test_notifications_pruned_after_lifetime() {
    let config = Config::default();
    let model = Model {
        notifications: vec![Notification {
            title: "Copied to clipboard".to_string(),
            description: "#aabbcc".to_string(),
            severity: Severity::Info,
            posted_at: Instant::now(),
        }],
        ..Model::default()
    };

    let (model, _) = transition(&config, model, Event::Tick(Instant::now()));
    assert_eq!(model.notifications.len(), 1);

    let (model, _) = transition(
        &config,
        model,
        Event::Tick(Instant::now() + config.notification_lifetime),
    );
    assert!(model.notifications.is_empty());
}
