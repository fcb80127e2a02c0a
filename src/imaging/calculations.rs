//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for a source image and a target box.
///
/// # Arguments
/// * `original` - Source image dimensions (width, height)
/// * `target` - Nominal target box (width, height)
/// * `keep_aspect` - Fit inside the box preserving the aspect ratio; otherwise stretch to it
/// * `auto_orientation` - Swap the box to portrait shape when the source is portrait
///
/// # Returns
/// * `(width, height)` - Output dimensions, never smaller than 1x1
///
/// Without `keep_aspect` the target is returned unchanged. With it, the image
/// is scaled uniformly by `min(box_w / w, box_h / h)` and each side is
/// truncated, so the result fits the box and touches it in at least one
/// dimension. Scaling up is allowed: a small source grows to fit.
///
/// The truncation is done in integer arithmetic so that the touching side
/// always lands exactly on the box edge instead of one pixel short.
///
/// # Examples
/// ```
/// # use batch_resize::imaging::plan_dimensions;
/// // Portrait source, landscape box with auto-orientation → box becomes 500x1000
/// assert_eq!(plan_dimensions((100, 200), (1000, 500), true, true), (500, 1000));
///
/// // Stretch ignores the source shape entirely
/// assert_eq!(plan_dimensions((100, 200), (300, 300), false, true), (300, 300));
/// ```
pub fn plan_dimensions(
    original: (u32, u32),
    target: (u32, u32),
    keep_aspect: bool,
    auto_orientation: bool,
) -> (u32, u32) {
    if !keep_aspect {
        return target;
    }

    let (orig_w, orig_h) = (original.0.max(1) as u64, original.1.max(1) as u64);
    let (box_w, box_h) = fitting_box(original, target, auto_orientation);
    let (box_w, box_h) = (box_w as u64, box_h as u64);

    // box_w / orig_w <= box_h / orig_h, cross-multiplied
    let (w, h) = if box_w * orig_h <= box_h * orig_w {
        (box_w, orig_h * box_w / orig_w)
    } else {
        (orig_w * box_h / orig_h, box_h)
    };

    (clamp_dimension(w), clamp_dimension(h))
}

/// The box an image must fit inside, after applying the orientation rule.
///
/// Only a strictly portrait source (`height > width`) swaps the box; square
/// and landscape sources keep the nominal target.
pub fn fitting_box(original: (u32, u32), target: (u32, u32), auto_orientation: bool) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let (target_w, target_h) = target;

    if auto_orientation && orig_h > orig_w {
        (target_h, target_w)
    } else {
        (target_w, target_h)
    }
}

fn clamp_dimension(value: u64) -> u32 {
    value.clamp(1, u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Stretch (keep_aspect = false)
    // =========================================================================

    #[test]
    fn stretch_returns_target_exactly() {
        assert_eq!(plan_dimensions((100, 200), (300, 300), false, false), (300, 300));
        assert_eq!(plan_dimensions((100, 200), (300, 300), false, true), (300, 300));
    }

    #[test]
    fn stretch_ignores_orientation_for_any_source() {
        for original in [(4000, 3000), (3000, 4000), (512, 512), (1, 9000)] {
            for auto in [false, true] {
                assert_eq!(plan_dimensions(original, (640, 480), false, auto), (640, 480));
            }
        }
    }

    // =========================================================================
    // Fit (keep_aspect = true)
    // =========================================================================

    #[test]
    fn fit_landscape_into_square_box() {
        // 4000x3000 → 800x600 inside 800x800
        assert_eq!(plan_dimensions((4000, 3000), (800, 800), true, false), (800, 600));
    }

    #[test]
    fn fit_portrait_into_square_box() {
        // 3000x4000 → 600x800 inside 800x800
        assert_eq!(plan_dimensions((3000, 4000), (800, 800), true, false), (600, 800));
    }

    #[test]
    fn fit_scales_small_images_up() {
        assert_eq!(plan_dimensions((100, 50), (800, 800), true, false), (800, 400));
    }

    #[test]
    fn fit_truncates_instead_of_rounding() {
        // 1000x333 into 500x500: scale 0.5 → 500x166.5 → 166
        assert_eq!(plan_dimensions((1000, 333), (500, 500), true, false), (500, 166));
    }

    #[test]
    fn fit_touches_box_when_scale_is_not_representable() {
        // 3x7 into 7x7: scale 1.0 by height, width 3
        assert_eq!(plan_dimensions((3, 7), (7, 7), true, false), (3, 7));
        // 3x1 into 7x100: width-limited at 7/3, height 2.33 → 2
        assert_eq!(plan_dimensions((3, 1), (7, 100), true, false), (7, 2));
    }

    #[test]
    fn fit_floors_degenerate_side_to_one_pixel() {
        // 10000x1 into 100x100: height would be 0.01
        assert_eq!(plan_dimensions((10000, 1), (100, 100), true, false), (100, 1));
        assert_eq!(plan_dimensions((1, 10000), (100, 100), true, false), (1, 100));
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    #[test]
    fn portrait_with_square_target_swap_is_noop() {
        assert_eq!(fitting_box((100, 200), (800, 800), true), (800, 800));
        assert_eq!(plan_dimensions((100, 200), (800, 800), true, true), (400, 800));
    }

    #[test]
    fn portrait_with_landscape_target_swaps_box() {
        assert_eq!(fitting_box((100, 200), (1000, 500), true), (500, 1000));
        // Scale 5 in both directions fills the swapped box exactly
        assert_eq!(plan_dimensions((100, 200), (1000, 500), true, true), (500, 1000));
    }

    #[test]
    fn portrait_without_auto_orientation_uses_nominal_box() {
        // 100x200 into 1000x500: height-limited, scale 2.5 → 250x500
        assert_eq!(plan_dimensions((100, 200), (1000, 500), true, false), (250, 500));
    }

    #[test]
    fn square_source_never_swaps() {
        assert_eq!(fitting_box((300, 300), (1000, 500), true), (1000, 500));
        assert_eq!(plan_dimensions((300, 300), (1000, 500), true, true), (500, 500));
    }

    #[test]
    fn landscape_source_never_swaps() {
        assert_eq!(fitting_box((400, 300), (500, 1000), true), (500, 1000));
    }

    // =========================================================================
    // Fit invariants across a spread of shapes
    // =========================================================================

    #[test]
    fn fit_stays_in_box_and_is_tight() {
        let sources = [(1, 1), (7, 3), (3, 7), (640, 480), (1080, 1920), (4000, 1), (2, 9999)];
        let targets = [(1, 1), (800, 800), (1000, 500), (500, 1000), (33, 17)];

        for &original in &sources {
            for &target in &targets {
                for auto in [false, true] {
                    let (w, h) = plan_dimensions(original, target, true, auto);
                    let (box_w, box_h) = fitting_box(original, target, auto);
                    assert!(w >= 1 && h >= 1, "{original:?} {target:?} → {w}x{h}");
                    assert!(w <= box_w && h <= box_h, "{original:?} {target:?} → {w}x{h}");
                    assert!(
                        w == box_w || h == box_h,
                        "not tight: {original:?} in {box_w}x{box_h} → {w}x{h}"
                    );
                }
            }
        }
    }

    #[test]
    fn zero_sized_source_does_not_divide_by_zero() {
        let (w, h) = plan_dimensions((0, 0), (800, 600), true, true);
        assert!(w >= 1 && h >= 1);
    }
}
