pub trait DeviceClipboard: Send + Sync {
    /// Write plain text to the system clipboard. May fail; the caller decides
    /// what failure means.
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
