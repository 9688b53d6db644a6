/// Backing-store size for a canvas whose CSS box measures `css_w x css_h`,
/// or `None` when it already matches `current` or the box is collapsed.
#[inline]
pub fn backing_size_update(css_w: f64, css_h: f64, current: (u32, u32)) -> Option<(u32, u32)> {
    let target = (css_w.max(0.0) as u32, css_h.max(0.0) as u32);
    if target.0 == 0 || target.1 == 0 || target == current {
        return None;
    }
    Some(target)
}
