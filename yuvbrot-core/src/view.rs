use tracing::{debug, info};

use crate::command::{CommandSet, LimitChange};
use crate::complex::Complex;
use crate::coords::CoordinateCache;
use crate::iteration::{IterationEngine, MAX_ITERATION_LIMIT, MIN_ITERATION_LIMIT};
use crate::resolution::Resolution;

/// Plane units per pixel at startup and after a reset.
pub const INITIAL_ZOOM: f64 = 0.007;

/// Smallest zoom (plane units per pixel). Below this, neighbouring pixels
/// map to the same `f64` plane coordinate and detail collapses.
pub const MIN_ZOOM: f64 = 1e-14;

/// Factor applied to the zoom on every zoom-in step.
pub const ZOOM_CONTRACTION: f64 = 0.35;

/// Iteration limit at startup and after a reset.
pub const INITIAL_ITERATION_LIMIT: u32 = 200;

/// Number of selectable palettes.
pub const PALETTE_COUNT: u8 = 10;

/// Palette selected at startup.
pub const INITIAL_PALETTE: u8 = 4;

/// The explorer's view of the plane plus its coloring state.
///
/// Every change that alters which plane point a pixel maps to, or how many
/// iterations it gets, bumps the recompute `epoch`. The field is stale
/// (dirty) whenever the last rendered epoch differs from the current one.
/// Coloring changes (palette, color cycling) leave the epoch alone, so the
/// existing field is simply re-encoded.
#[derive(Debug, Clone)]
pub struct ViewState {
    resolution: Resolution,
    center: Complex,
    zoom: f64,
    iteration_limit: u32,
    palette_index: u8,
    color_cycling: bool,
    cycle_offset: u32,
    epoch: u64,
    rendered_epoch: Option<u64>,
    coords: CoordinateCache,
}

impl ViewState {
    /// Default view for `resolution`: centred on the origin at the initial
    /// zoom and limit.
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        let coords = CoordinateCache::new(resolution)?;
        Ok(Self {
            resolution,
            center: Complex::ZERO,
            zoom: INITIAL_ZOOM,
            iteration_limit: INITIAL_ITERATION_LIMIT,
            palette_index: INITIAL_PALETTE,
            color_cycling: false,
            cycle_offset: 0,
            epoch: 0,
            rendered_epoch: None,
            coords,
        })
    }

    // -- Accessors ---------------------------------------------------------

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn iteration_limit(&self) -> u32 {
        self.iteration_limit
    }

    #[inline]
    pub fn palette_index(&self) -> u8 {
        self.palette_index
    }

    #[inline]
    pub fn color_cycling(&self) -> bool {
        self.color_cycling
    }

    #[inline]
    pub fn cycle_offset(&self) -> u32 {
        self.cycle_offset
    }

    /// Engine configured with the current iteration limit.
    #[inline]
    pub fn engine(&self) -> IterationEngine {
        IterationEngine::new(self.iteration_limit)
    }

    /// Zoom factor relative to the startup view.
    pub fn magnification(&self) -> f64 {
        INITIAL_ZOOM / self.zoom
    }

    // -- Recompute tracking ------------------------------------------------

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// `true` if the field has not been recomputed for the current epoch.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.rendered_epoch != Some(self.epoch)
    }

    /// Record that a full recompute for `epoch` has completed.
    pub fn mark_rendered(&mut self, epoch: u64) {
        self.rendered_epoch = Some(epoch);
    }

    fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Coordinate cache for the current epoch, refreshed if stale.
    pub fn coordinates(&mut self) -> &CoordinateCache {
        self.coords.refresh(self.center, self.zoom, self.epoch);
        &self.coords
    }

    /// Replace the coordinate cache for a new render resolution.
    pub fn set_resolution(&mut self, resolution: Resolution) -> crate::Result<()> {
        if resolution == self.resolution {
            return Ok(());
        }
        self.coords = CoordinateCache::new(resolution)?;
        self.resolution = resolution;
        self.invalidate();
        info!(
            width = resolution.width(),
            height = resolution.height(),
            "Render resolution changed"
        );
        Ok(())
    }

    /// Free the coordinate cache at shutdown.
    pub fn release_buffers(&mut self) {
        self.coords.release();
        info!("Coordinate cache released");
    }

    /// Bytes held by the coordinate cache.
    pub fn memory_footprint(&self) -> usize {
        self.coords.memory_footprint()
    }

    // -- Navigation --------------------------------------------------------

    /// Plane coordinate under frame pixel `(px, py)`.
    pub fn plane_at(&self, px: i32, py: i32) -> Complex {
        let (half_w, half_h) = self.resolution.half_extents();
        Complex::new(
            (px as i64 - half_w) as f64 * self.zoom + self.center.re,
            self.center.im - (py as i64 - half_h) as f64 * self.zoom,
        )
    }

    /// Move the center by a screen-pixel delta. Frame rows grow downward,
    /// so a positive `dy` moves toward smaller imaginary parts.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.center.re += dx as f64 * self.zoom;
        self.center.im -= dy as f64 * self.zoom;
        self.invalidate();
        debug!(re = self.center.re, im = self.center.im, "Panned");
    }

    /// Center the view on frame pixel `(px, py)`.
    pub fn pan_to(&mut self, px: i32, py: i32) {
        let (half_w, half_h) = self.resolution.half_extents();
        self.pan(
            (px as i64 - half_w) as i32,
            (py as i64 - half_h) as i32,
        );
    }

    /// Center on frame pixel `(px, py)` and zoom in one step.
    pub fn zoom_toward(&mut self, px: i32, py: i32) {
        self.pan_to(px, py);
        self.zoom = (self.zoom * ZOOM_CONTRACTION).max(MIN_ZOOM);
        self.invalidate();
        debug!(zoom = self.zoom, magnification = self.magnification(), "Zoomed in");
    }

    /// Restore the startup center, zoom and iteration limit.
    pub fn reset_view(&mut self) {
        self.center = Complex::ZERO;
        self.zoom = INITIAL_ZOOM;
        self.iteration_limit = INITIAL_ITERATION_LIMIT;
        self.invalidate();
        debug!("View reset");
    }

    /// Double or halve the iteration limit within its bounds.
    pub fn adjust_iteration_limit(&mut self, change: LimitChange) {
        self.iteration_limit = match change {
            LimitChange::Double => self.iteration_limit.saturating_mul(2),
            LimitChange::Halve => self.iteration_limit / 2,
        }
        .clamp(MIN_ITERATION_LIMIT, MAX_ITERATION_LIMIT);
        self.invalidate();
        debug!(limit = self.iteration_limit, "Iteration limit changed");
    }

    /// Step the palette index by `step`, wrapping around in both directions.
    /// Only the color mapping changes, so the field stays valid.
    pub fn cycle_palette(&mut self, step: i32) {
        let count = PALETTE_COUNT as i32;
        self.palette_index = (self.palette_index as i32 + step).rem_euclid(count) as u8;
        debug!(palette = self.palette_index, "Palette changed");
    }

    /// Turn palette animation on or off.
    pub fn toggle_color_cycling(&mut self) {
        self.color_cycling = !self.color_cycling;
        debug!(cycling = self.color_cycling, "Color cycling toggled");
    }

    /// Advance the color-cycle offset by one frame if cycling is enabled.
    pub fn advance_cycle(&mut self) {
        if self.color_cycling {
            self.cycle_offset = self.cycle_offset.wrapping_add(1);
        }
    }

    /// Apply one frame's command snapshot.
    ///
    /// Commands are applied in a fixed order: pan, zoom, reset, color
    /// cycling, limit changes (halve before double), palette. `quit` is left
    /// to the process driver.
    pub fn apply(&mut self, commands: &CommandSet) {
        if let Some((px, py)) = commands.pan_to {
            self.pan_to(px, py);
        }
        if let Some((px, py)) = commands.zoom_to {
            self.zoom_toward(px, py);
        }
        if commands.reset_view {
            self.reset_view();
        }
        if commands.toggle_cycling {
            self.toggle_color_cycling();
        }
        for change in commands.limit_changes() {
            self.adjust_iteration_limit(change);
        }
        if commands.palette_prev {
            self.cycle_palette(-1);
        }
        if commands.palette_next {
            self.cycle_palette(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewState {
        ViewState::new(Resolution::NTSC).unwrap()
    }

    fn clean_view() -> ViewState {
        let mut v = view();
        let epoch = v.epoch();
        v.mark_rendered(epoch);
        v
    }

    #[test]
    fn startup_defaults() {
        let v = view();
        assert_eq!(v.center(), Complex::ZERO);
        assert_eq!(v.zoom(), INITIAL_ZOOM);
        assert_eq!(v.iteration_limit(), 200);
        assert_eq!(v.palette_index(), 4);
        assert!(!v.color_cycling());
        assert!(v.is_dirty(), "a fresh view has never been rendered");
        assert_eq!(v.magnification(), 1.0);
    }

    #[test]
    fn center_pixel_maps_to_center() {
        let v = view();
        assert_eq!(v.plane_at(320, 240), Complex::ZERO);
        let c = v.plane_at(330, 230);
        assert!((c.re - 0.07).abs() < 1e-12);
        assert!((c.im - 0.07).abs() < 1e-12);
    }

    #[test]
    fn pan_moves_by_zoom_scaled_delta() {
        let mut v = clean_view();
        v.pan(100, -50);
        assert!((v.center().re - 0.7).abs() < 1e-12);
        assert!((v.center().im - 0.35).abs() < 1e-12);
        assert!(v.is_dirty());
    }

    #[test]
    fn pan_to_centers_on_pixel() {
        let mut v = view();
        let target = v.plane_at(400, 100);
        v.pan_to(400, 100);
        assert!((v.center().re - target.re).abs() < 1e-12);
        assert!((v.center().im - target.im).abs() < 1e-12);
    }

    #[test]
    fn zoom_toward_recenters_and_contracts() {
        let mut v = clean_view();
        let target = v.plane_at(100, 300);
        v.zoom_toward(100, 300);
        assert!((v.center().re - target.re).abs() < 1e-12);
        assert!((v.center().im - target.im).abs() < 1e-12);
        assert!((v.zoom() - INITIAL_ZOOM * ZOOM_CONTRACTION).abs() < 1e-18);
        assert!(v.is_dirty());
    }

    #[test]
    fn repeated_zoom_never_passes_floor() {
        let mut v = view();
        for _ in 0..200 {
            v.zoom_toward(320, 240);
            assert!(v.zoom() >= MIN_ZOOM);
        }
        assert_eq!(v.zoom(), MIN_ZOOM);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_coloring() {
        let mut v = view();
        v.zoom_toward(10, 10);
        v.adjust_iteration_limit(LimitChange::Double);
        v.cycle_palette(3);
        v.toggle_color_cycling();
        v.reset_view();
        assert_eq!(v.center(), Complex::ZERO);
        assert_eq!(v.zoom(), INITIAL_ZOOM);
        assert_eq!(v.iteration_limit(), INITIAL_ITERATION_LIMIT);
        assert_eq!(v.palette_index(), 7);
        assert!(v.color_cycling());
    }

    #[test]
    fn limit_double_then_halve_is_identity() {
        let mut v = view();
        v.adjust_iteration_limit(LimitChange::Double);
        v.adjust_iteration_limit(LimitChange::Double);
        v.adjust_iteration_limit(LimitChange::Double);
        // 1600, 800, … , 3, 1
        while v.iteration_limit() > 1 {
            let before = v.iteration_limit();
            v.adjust_iteration_limit(LimitChange::Double);
            v.adjust_iteration_limit(LimitChange::Halve);
            assert_eq!(v.iteration_limit(), before);
            v.adjust_iteration_limit(LimitChange::Halve);
        }
    }

    #[test]
    fn limit_is_clamped() {
        let mut v = view();
        for _ in 0..10 {
            v.adjust_iteration_limit(LimitChange::Double);
        }
        assert_eq!(v.iteration_limit(), MAX_ITERATION_LIMIT);
        for _ in 0..20 {
            v.adjust_iteration_limit(LimitChange::Halve);
        }
        assert_eq!(v.iteration_limit(), MIN_ITERATION_LIMIT);
    }

    #[test]
    fn limit_change_marks_dirty() {
        let mut v = clean_view();
        v.adjust_iteration_limit(LimitChange::Halve);
        assert!(v.is_dirty());
    }

    #[test]
    fn palette_cycling_wraps_both_ways_without_dirtying() {
        let mut v = clean_view();
        let mut seen = [false; PALETTE_COUNT as usize];
        for _ in 0..PALETTE_COUNT {
            seen[v.palette_index() as usize] = true;
            v.cycle_palette(1);
        }
        assert!(seen.iter().all(|&s| s), "next must visit every palette");
        assert_eq!(v.palette_index(), INITIAL_PALETTE);

        while v.palette_index() != 9 {
            v.cycle_palette(1);
        }
        v.cycle_palette(1);
        assert_eq!(v.palette_index(), 0);
        v.cycle_palette(-1);
        assert_eq!(v.palette_index(), 9);

        for start in 0..PALETTE_COUNT as i32 {
            v.cycle_palette(start - v.palette_index() as i32);
            v.cycle_palette(1);
            v.cycle_palette(-1);
            assert_eq!(v.palette_index() as i32, start);
        }
        assert!(!v.is_dirty());
    }

    #[test]
    fn color_cycle_advances_only_when_enabled() {
        let mut v = clean_view();
        v.advance_cycle();
        assert_eq!(v.cycle_offset(), 0);
        v.toggle_color_cycling();
        v.advance_cycle();
        v.advance_cycle();
        assert_eq!(v.cycle_offset(), 2);
        assert!(!v.is_dirty());
    }

    #[test]
    fn coordinates_follow_epoch() {
        let mut v = view();
        assert_eq!(v.coordinates().column_re()[320], 0.0);
        v.pan(10, 0);
        let epoch = v.epoch();
        let coords = v.coordinates();
        assert_eq!(coords.epoch(), Some(epoch));
        assert!((coords.column_re()[320] - 0.07).abs() < 1e-12);
    }

    #[test]
    fn apply_runs_commands_in_order() {
        let mut v = clean_view();
        v.apply(&CommandSet {
            zoom_to: Some((0, 0)),
            reset_view: true,
            double_limit: true,
            palette_next: true,
            ..Default::default()
        });
        // Reset lands after the zoom, the doubling after the reset.
        assert_eq!(v.zoom(), INITIAL_ZOOM);
        assert_eq!(v.iteration_limit(), 400);
        assert_eq!(v.palette_index(), 5);
        assert!(v.is_dirty());
    }

    #[test]
    fn empty_commands_leave_view_clean() {
        let mut v = clean_view();
        v.apply(&CommandSet::default());
        assert!(!v.is_dirty());
    }

    #[test]
    fn resolution_change_invalidates() {
        let mut v = clean_view();
        v.set_resolution(Resolution::PAL).unwrap();
        assert!(v.is_dirty());
        assert_eq!(v.coordinates().row_im().len(), 508);
    }

    #[test]
    fn release_buffers_frees_cache() {
        let mut v = view();
        v.coordinates();
        assert_eq!(v.memory_footprint(), (640 + 460) * 8);
        v.release_buffers();
        assert_eq!(v.memory_footprint(), 0);
    }
}
