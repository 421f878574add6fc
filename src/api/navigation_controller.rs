use tracing::{debug, warn};

use crate::core::{DrawHistoryEntry, GroundPoint, Window};
use crate::error::{MapError, MapResult};
use crate::extensions::MapEvent;
use crate::render::{DisplayBackend, DrawOutcome};

use super::validation::{validate_scale, validate_zoom_factor};
use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Attaches a (new) model: forgets the history, recomputes the overview and
    /// draws either `initial` or the overview.
    pub fn replace_map_model<C: SpatialController>(
        &mut self,
        controller: &C,
        initial: Option<Window>,
    ) -> MapResult<()> {
        self.discard_tool();
        self.history.clear();
        self.viewport.reset();
        self.refresh_model_extent(controller);

        match (initial, self.overview) {
            (Some(window), _) => self.set_new_window(controller, window, true)?,
            (None, Some(_)) => self.draw_overview(controller)?,
            (None, None) => {
                self.draw_scene(controller)?;
                self.sync_scroll_bars();
            }
        }
        debug!(model_extent = ?self.model_extent, "map model replaced");
        Ok(())
    }

    /// Detaches the model and blanks the display.
    pub fn clear_model<C: SpatialController>(&mut self, controller: &C) -> MapResult<()> {
        self.discard_tool();
        self.history.clear();
        self.viewport.reset();
        self.model_extent = None;
        self.overview = None;
        self.draw_scene(controller)?;
        self.sync_scroll_bars();
        debug!("map model cleared");
        Ok(())
    }

    /// Draws the whole model (plus the overview margin), recording history.
    pub fn draw_overview<C: SpatialController>(&mut self, controller: &C) -> MapResult<()> {
        self.refresh_model_extent(controller);
        match (self.overview, self.model_extent) {
            (Some(overview), _) => self.set_new_window(controller, overview, true),
            (None, Some(_)) => {
                debug!("ignoring overview while the display has no area");
                Ok(())
            }
            (None, None) => Err(MapError::InvalidOperation(
                "there is no model extent to show".to_owned(),
            )),
        }
    }

    /// Whether there is an overview that differs from the current view.
    #[must_use]
    pub fn is_overview_enabled(&self) -> bool {
        match (self.overview, self.viewport.extent()) {
            (Some(overview), Some(extent)) => {
                !extent.approx_eq(overview, overview_tolerance(overview))
            }
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Makes `window` visible (fitted to the display aspect) and redraws.
    pub fn set_new_window<C: SpatialController>(
        &mut self,
        controller: &C,
        window: Window,
        add_to_history: bool,
    ) -> MapResult<()> {
        if !self.viewport.size().is_valid() {
            debug!(%window, "ignoring new window while the display has no area");
            return Ok(());
        }
        self.viewport
            .set_window(window, self.config.point_symbol_height_m)?;
        self.after_view_change(controller, add_to_history)
    }

    /// Shorthand for [`MapDisplay::set_new_window`] with history.
    pub fn draw_window<C: SpatialController>(
        &mut self,
        controller: &C,
        window: Window,
    ) -> MapResult<()> {
        self.set_new_window(controller, window, true)
    }

    pub fn set_center_and_scale<C: SpatialController>(
        &mut self,
        controller: &C,
        center: GroundPoint,
        scale: f64,
        add_to_history: bool,
    ) -> MapResult<()> {
        if !self.viewport.size().is_valid() {
            debug!(
                x = center.x,
                y = center.y,
                scale,
                "ignoring new center while the display has no area"
            );
            return Ok(());
        }
        self.viewport
            .set_center_and_scale(center.x, center.y, validate_scale(scale)?)?;
        self.after_view_change(controller, add_to_history)
    }

    /// Re-centers the view at the current scale.
    pub fn set_center<C: SpatialController>(
        &mut self,
        controller: &C,
        center: GroundPoint,
    ) -> MapResult<()> {
        let scale = self.require_scale()?;
        self.set_center_and_scale(controller, center, scale, true)
    }

    /// Redraws at the current center with a new scale denominator.
    pub fn set_scale<C: SpatialController>(&mut self, controller: &C, scale: f64) -> MapResult<()> {
        let center = self
            .viewport
            .center()
            .ok_or_else(|| MapError::InvalidOperation("no view to rescale".to_owned()))?;
        self.set_center_and_scale(controller, center, scale, true)
    }

    /// Zooms in about the view center: spans shrink by `1 + 2 * factor`.
    pub fn zoom_in<C: SpatialController>(&mut self, controller: &C, factor: f64) -> MapResult<()> {
        let factor = validate_zoom_factor(factor)?;
        let center = self
            .viewport
            .center()
            .ok_or_else(|| MapError::InvalidOperation("no view to zoom".to_owned()))?;
        self.zoom_in_about(controller, center, factor)
    }

    /// Zooms out about the view center (spans grow by `1 + 2 * factor`),
    /// never beyond the overview.
    pub fn zoom_out<C: SpatialController>(&mut self, controller: &C, factor: f64) -> MapResult<()> {
        let factor = validate_zoom_factor(factor)?;
        let extent = self
            .viewport
            .extent()
            .ok_or_else(|| MapError::InvalidOperation("no view to zoom".to_owned()))?;
        let scale = self.require_scale()?;
        let zoomed = extent.scaled(1.0 + 2.0 * factor);

        match self.overview {
            Some(overview)
                if !zoomed.is_enclosed_by(overview.expanded_by(overview_tolerance(overview))) =>
            {
                let clamped = zoomed.intersection(overview).unwrap_or(overview);
                self.set_new_window(controller, clamped, true)
            }
            _ => self.set_center_and_scale(
                controller,
                extent.center(),
                scale * (1.0 + 2.0 * factor),
                true,
            ),
        }
    }

    pub(super) fn zoom_in_about<C: SpatialController>(
        &mut self,
        controller: &C,
        center: GroundPoint,
        factor: f64,
    ) -> MapResult<()> {
        let scale = self.require_scale()?;
        self.set_center_and_scale(controller, center, scale / (1.0 + 2.0 * factor), true)
    }

    /// Redraws after the viewport changed: records history, refreshes the
    /// scrollbars and notifies plugins.
    pub(super) fn after_view_change<C: SpatialController>(
        &mut self,
        controller: &C,
        add_to_history: bool,
    ) -> MapResult<()> {
        let (Some(extent), Some(scale)) = (self.viewport.extent(), self.viewport.scale()) else {
            return Ok(());
        };

        if self.draw_scene(controller)? == DrawOutcome::Dropped {
            warn!(%extent, scale, "view changed but the frame was dropped");
        }
        self.sync_scroll_bars();
        self.emit_plugin_event(MapEvent::ExtentChanged { extent, scale });

        if add_to_history {
            let center = extent.center();
            self.history
                .append(DrawHistoryEntry::new(center.x, center.y, scale));
            if let Some(cursor) = self.history.cursor() {
                let len = self.history.len();
                self.emit_plugin_event(MapEvent::HistoryAppended { len, cursor });
            }
        }
        Ok(())
    }

    /// Re-reads the model extent and fits the overview to the current display.
    ///
    /// The overview is what [`MapDisplay::draw_overview`] shows, so it has the
    /// display aspect. There is none while the display has no area.
    pub(super) fn refresh_model_extent<C: SpatialController>(&mut self, controller: &C) {
        self.model_extent = controller.model_extent();
        let overview = match self.model_extent {
            Some(extent) if self.viewport.size().is_valid() => {
                let expanded = extent.expanded(self.config.overview_margin);
                match self
                    .viewport
                    .fitted_window(expanded, self.config.point_symbol_height_m)
                {
                    Ok(window) => Some(window),
                    Err(err) => {
                        warn!(error = %err, %extent, "cannot fit the overview");
                        None
                    }
                }
            }
            _ => None,
        };
        self.overview = overview;
    }

    fn require_scale(&self) -> MapResult<f64> {
        self.viewport
            .scale()
            .ok_or_else(|| MapError::InvalidOperation("no view is defined".to_owned()))
    }
}

/// Slack for comparing a view with the overview it was fitted from.
pub(super) fn overview_tolerance(overview: Window) -> f64 {
    overview.width().max(overview.height()) * 1e-9
}
