use chrono::NaiveDate;

/// Which calendar grid is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Day,
    Month,
    Year,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Day => "day",
            View::Month => "month",
            View::Year => "year",
        }
    }
}

/// Mutable widget state shared with the views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerState {
    pub view: View,
    /// Date the keyboard cursor sits on; distinct from the committed selection
    pub hilighted_date: Option<NaiveDate>,
}

/// Partial update merged by [`DatePicker::set_state`](super::DatePicker::set_state)
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatePatch {
    pub view: Option<View>,
    pub hilighted_date: Option<NaiveDate>,
}

impl StatePatch {
    pub fn view(view: View) -> Self {
        Self { view: Some(view), ..Self::default() }
    }

    pub fn hilight(date: NaiveDate) -> Self {
        Self { hilighted_date: Some(date), ..Self::default() }
    }

    pub fn and_view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }
}

impl PickerState {
    /// Shallow merge of a patch into this state
    pub fn merge(&mut self, patch: StatePatch) {
        if let Some(view) = patch.view {
            self.view = view;
        }
        if let Some(date) = patch.hilighted_date {
            self.hilighted_date = Some(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_given_fields() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let mut state = PickerState { view: View::Day, hilighted_date: Some(date) };

        state.merge(StatePatch::view(View::Year));
        assert_eq!(state.view, View::Year);
        assert_eq!(state.hilighted_date, Some(date));

        let next = date.succ_opt().unwrap();
        state.merge(StatePatch::hilight(next).and_view(View::Day));
        assert_eq!(state, PickerState { view: View::Day, hilighted_date: Some(next) });
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut state = PickerState::default();
        state.merge(StatePatch::default());
        assert_eq!(state, PickerState::default());
        assert_eq!(state.view.name(), "day");
    }
}
