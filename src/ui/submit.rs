pub const IDLE_LABEL: &str = "Complete Setup";
pub const BUSY_LABEL: &str = "Submitting...";

/// The submit button. Disabled while a submission is in flight, which is the
/// only thing preventing overlapping submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub busy: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            busy: false,
        }
    }
}

impl SubmitControl {
    pub fn set_loading(&mut self, loading: bool) {
        self.enabled = !loading;
        self.busy = loading;
    }

    pub fn label(&self) -> &'static str {
        if self.busy { BUSY_LABEL } else { IDLE_LABEL }
    }
}
