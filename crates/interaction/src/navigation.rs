//! Sidebar link scrolling and keyboard traversal

/// Document offset to scroll to so the target's top sits `offset` below the
/// viewport top. `rect_top` is the target's viewport-relative top.
pub fn scroll_target(rect_top: f64, scroll_y: f64, offset: f64) -> f64 {
    rect_top + scroll_y - offset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowDown" => Some(Direction::Next),
        "ArrowUp" => Some(Direction::Previous),
        _ => None,
    }
}

/// Index of the link focus moves to, bounded at both ends
pub fn step(index: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Next if index + 1 < len => Some(index + 1),
        Direction::Previous if index > 0 && index < len => Some(index - 1),
        _ => None,
    }
}

/// Section id a link points at: `#materials` -> `materials`
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target_leaves_offset() {
        assert_eq!(scroll_target(300.0, 1200.0, 40.0), 1460.0);
        assert_eq!(scroll_target(-200.0, 1200.0, 40.0), 960.0);
    }

    #[test]
    fn test_step_is_bounded() {
        assert_eq!(step(0, 3, Direction::Next), Some(1));
        assert_eq!(step(2, 3, Direction::Next), None);
        assert_eq!(step(0, 3, Direction::Previous), None);
        assert_eq!(step(2, 3, Direction::Previous), Some(1));
        assert_eq!(step(0, 0, Direction::Next), None);
    }

    #[test]
    fn test_keys_and_fragments() {
        assert_eq!(direction_for_key("ArrowDown"), Some(Direction::Next));
        assert_eq!(direction_for_key("Tab"), None);
        assert_eq!(fragment("#materials"), Some("materials"));
        assert_eq!(fragment("#"), None);
        assert_eq!(fragment("/other-page"), None);
    }
}
