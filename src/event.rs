#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    Refresh,
    Shutdown,
}
