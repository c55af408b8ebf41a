use crate::{
    layers::base::{Layer, LayerId},
    prelude::HashMap,
};

/// Holds the layers attached to a session, keyed by handle and ordered by z-index
pub struct LayerManager {
    /// All layers indexed by handle
    layers: HashMap<LayerId, Box<dyn Layer>>,
    /// Ordered list of handles for drawing (sorted by z-index, then insertion)
    render_order: Vec<LayerId>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer; returns `false` if a layer with the same handle is already held
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> bool {
        let layer_id = layer.id();
        if self.layers.contains_key(&layer_id) {
            return false;
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id, layer);

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        true
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: LayerId) -> Option<Box<dyn Layer>> {
        self.render_order.retain(|id| *id != layer_id);
        self.layers.remove(&layer_id)
    }

    /// Gets a reference to a layer by handle
    pub fn get_layer(&self, layer_id: LayerId) -> Option<&dyn Layer> {
        self.layers.get(&layer_id).map(|l| l.as_ref())
    }

    pub fn contains(&self, layer_id: LayerId) -> bool {
        self.layers.contains_key(&layer_id)
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn Layer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
