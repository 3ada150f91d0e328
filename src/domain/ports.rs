/// Presentation boundary. The comparer pushes progress and error text
/// through this trait and never touches any display surface itself.
pub trait ProgressSink: Send + Sync {
    fn progress(&self, text: &str);
    fn error(&self, text: &str);
}
