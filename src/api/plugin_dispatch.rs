use crate::extensions::{MapEvent, MapPluginContext};
use crate::render::DisplayBackend;

use super::MapDisplay;

impl<B: DisplayBackend> MapDisplay<B> {
    pub(super) fn plugin_context(&self) -> MapPluginContext {
        MapPluginContext {
            size: self.viewport.size(),
            extent: self.viewport.extent(),
            scale: self.viewport.scale(),
            overview: self.overview,
            interaction_mode: self.interaction_mode(),
            history_len: self.history.len(),
            history_cursor: self.history.cursor(),
        }
    }

    /// Plugins are notified in registration order.
    pub(super) fn emit_plugin_event(&mut self, event: MapEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
