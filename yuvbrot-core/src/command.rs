/// Direction of an iteration-limit change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitChange {
    Double,
    Halve,
}

/// One frame's worth of edge-triggered navigation commands.
///
/// The input collaborator fills a fresh `CommandSet` once per frame from a
/// polled snapshot of the device; commands are not queued across frames.
/// Pixel positions are frame coordinates (`(0, 0)` is the top-left pixel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandSet {
    pub pan_to: Option<(i32, i32)>,
    pub zoom_to: Option<(i32, i32)>,
    pub reset_view: bool,
    pub toggle_cycling: bool,
    pub halve_limit: bool,
    pub double_limit: bool,
    pub palette_prev: bool,
    pub palette_next: bool,
    /// Quit / power-off request. Handled by the process driver, not the view.
    pub quit: bool,
}

impl CommandSet {
    /// `true` if no command is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Limit changes in the order they are applied.
    pub fn limit_changes(&self) -> impl Iterator<Item = LimitChange> {
        [
            self.halve_limit.then_some(LimitChange::Halve),
            self.double_limit.then_some(LimitChange::Double),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(CommandSet::default().is_empty());
        let cmds = CommandSet {
            palette_next: true,
            ..Default::default()
        };
        assert!(!cmds.is_empty());
    }

    #[test]
    fn halve_is_applied_before_double() {
        let cmds = CommandSet {
            halve_limit: true,
            double_limit: true,
            ..Default::default()
        };
        let order: Vec<_> = cmds.limit_changes().collect();
        assert_eq!(order, vec![LimitChange::Halve, LimitChange::Double]);
    }
}
