//! Discrete navigation commands independent of key bindings.

use serde::Deserialize;

/// Where a scroll-to-index target should land inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Item's top edge at the top of the viewport.
    #[default]
    Start,
    /// Item centred in the viewport.
    Center,
    /// Item's bottom edge at the bottom of the viewport.
    End,
    /// Move the least distance that makes the item fully visible.
    /// No movement if it already is.
    Nearest,
}

/// Navigation intent translated into a target scroll offset.
///
/// These represent user or programmatic intent, not specific keys. The
/// terminal demo maps key events onto them; a browser host would map its
/// own keyboard handling the same way.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavCommand {
    /// Move down by one nominal item height.
    StepForward,
    /// Move up by one nominal item height.
    StepBackward,
    /// Move down by one viewport extent.
    PageForward,
    /// Move up by one viewport extent.
    PageBackward,
    /// Jump to the start of the list.
    Home,
    /// Jump so the last item sits at the bottom of the viewport.
    End,
    /// Put the given item at the top of the viewport.
    ScrollToIndex(usize),
    /// Bring the given item into view with the given alignment.
    ScrollToIndexAligned(usize, Align),
    /// Proportional position: 0.0 = top, 1.0 = bottom (scrollbar drag).
    ScrollToFraction(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_defaults_to_start() {
        assert_eq!(Align::default(), Align::Start);
    }

    #[test]
    fn deserializes_unit_and_newtype_variants() {
        let home: NavCommand = serde_json::from_str(r#""home""#).expect("unit variant");
        assert_eq!(home, NavCommand::Home);

        let to_index: NavCommand =
            serde_json::from_str(r#"{"scroll_to_index":999}"#).expect("newtype variant");
        assert_eq!(to_index, NavCommand::ScrollToIndex(999));

        let aligned: NavCommand =
            serde_json::from_str(r#"{"scroll_to_index_aligned":[5,"center"]}"#)
                .expect("tuple variant");
        assert_eq!(aligned, NavCommand::ScrollToIndexAligned(5, Align::Center));
    }
}
