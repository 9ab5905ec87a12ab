use ratatui::layout::Rect;

use super::options::Mode;

/// Compute the popup's outer rect for a content size (border included)
///
/// `Below` hangs the popup under the anchor and flips it above when the
/// space below is too short and the space above is not. `Modal` centers it.
/// The result is always clipped to the viewport.
pub fn place(mode: Mode, anchor: Rect, viewport: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);

    let (x, y) = match mode {
        Mode::Modal => (
            viewport.x + (viewport.width - width) / 2,
            viewport.y + (viewport.height - height) / 2,
        ),
        Mode::Below => {
            let room_below = viewport.bottom().saturating_sub(anchor.bottom());
            let room_above = anchor.y.saturating_sub(viewport.y);
            let y = if room_below < height && room_above >= height {
                anchor.y - height
            } else {
                anchor.bottom().min(viewport.bottom() - height)
            };
            let x = anchor.x.max(viewport.x).min(viewport.right() - width);
            (x, y)
        }
    };

    Rect { x, y, width, height }
}
