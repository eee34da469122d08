use super::core::{CaptureState, Model};
use super::main::ColorPicker;
use crate::device_display::interface::{
    CaptureView, MarkerId, MarkerView, NotificationView, SwatchView, ViewModel,
};

/// Project the model onto the display's view-model language.
pub fn view(model: &Model) -> ViewModel {
    let capture = match model.capture {
        CaptureState::Inactive => CaptureView::Inactive,
        CaptureState::Starting => CaptureView::Starting,
        CaptureState::Active => CaptureView::Active,
    };

    let markers = [MarkerId::Top, MarkerId::Bottom]
        .into_iter()
        .map(|id| {
            let point = model.points.get(id);
            let swatch = model.samples.get(id).map(|sample| {
                let hex = sample.display_hex();
                SwatchView {
                    just_copied: model
                        .copied
                        .as_ref()
                        .map(|copied| copied.hex == hex)
                        .unwrap_or(false),
                    rgb: sample.display_rgb(),
                    red: sample.red,
                    green: sample.green,
                    blue: sample.blue,
                    hex,
                }
            });
            MarkerView {
                id,
                x_percent: point.x_percent,
                y_percent: point.y_percent,
                swatch,
            }
        })
        .collect();

    let notifications = model
        .notifications
        .iter()
        .map(|n| NotificationView {
            title: n.title.clone(),
            description: n.description.clone(),
            severity: n.severity,
        })
        .collect();

    ViewModel {
        capture,
        frame: model.frame.as_ref().map(|f| f.0.clone()),
        markers,
        notifications,
    }
}

impl ColorPicker {
    pub(crate) fn render(
        &self,
        model: &Model,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let view_model = view(model);
        self.device_display.lock().unwrap().render(&view_model)
    }
}
