/// Visibility of the SMS opt-in section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmsSection {
    pub visible: bool,
    pub faded_in: bool,
}

impl SmsSection {
    /// Whether a phone value is long enough to offer SMS. Counts characters
    /// of the trimmed input.
    pub fn should_show(phone: &str, min_len: usize) -> bool {
        phone.trim().chars().count() >= min_len
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.faded_in = false;
    }

    /// No-op if the section was hidden again before the fade fired.
    pub fn fade_in(&mut self) {
        if self.visible {
            self.faded_in = true;
        }
    }
}
