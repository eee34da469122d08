use crate::color_picker::core::SamplePoint;
use crate::device_camera::interface::Frame;

/// One pixel read, kept as both raw channels and the 6-digit hex form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSample {
    pub hex: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            hex: format!("{}{}{}", channel_hex(red), channel_hex(green), channel_hex(blue)),
            red,
            green,
            blue,
        }
    }

    /// `#rrggbb` — the form shown in the UI and written to the clipboard.
    pub fn display_hex(&self) -> String {
        format!("#{}", self.hex)
    }

    pub fn display_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Zero-padded lowercase hex pair for one channel.
pub fn channel_hex(value: u8) -> String {
    format!("{:02x}", value)
}

/// Map percentage coordinates onto a frame's pixel grid. Floors, never
/// interpolates; the result is pinned inside the frame so a point at 100%
/// reads the last row/column.
pub fn to_pixel_coords(point: &SamplePoint, width: u32, height: u32) -> (u32, u32) {
    let x = (point.x_percent / 100.0 * width as f32).floor() as u32;
    let y = (point.y_percent / 100.0 * height as f32).floor() as u32;
    (
        x.min(width.saturating_sub(1)),
        y.min(height.saturating_sub(1)),
    )
}

/// Nearest-pixel read at a sampling point.
pub fn sample_pixel(frame: &Frame, point: &SamplePoint) -> ColorSample {
    let (x, y) = to_pixel_coords(point, frame.width(), frame.height());
    let pixel = frame.get_pixel(x, y);
    ColorSample::from_rgb(pixel[0], pixel[1], pixel[2])
}
