#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToggleControl {
    pub checked: bool,
}

impl ToggleControl {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn set_checked(&mut self, checked: bool) {
        tracing::trace!(checked, "toggle control updated");
        self.checked = checked;
    }
}
