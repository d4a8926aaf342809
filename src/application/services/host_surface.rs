/// What the core needs from whatever is rendering it.
pub trait HostSurface: Send + Sync {
    /// Opens `url` in a new viewing context (a browser tab, a terminal line).
    fn open_url(&self, url: &str);

    /// Blocking, high-urgency notification.
    fn alert(&self, message: &str);
}
