//! Names and ids given to the container nodes the renderer creates.

use layer_state::LayerId;

/// Name carried by every raster layer container.
pub const RASTER_LAYER_NAME: &str = "raster_layer";

/// Name carried by the group that holds a raster layer's objects.
pub const RASTER_LAYER_OBJECT_GROUP_NAME: &str = "raster_layer.object_group";

/// Id for a layer's object group. The suffix keeps ids unique if a layer is
/// ever rebuilt from scratch.
pub fn object_group_id(layer_id: &LayerId, suffix: impl std::fmt::Display) -> String {
    format!("{layer_id}_group_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_id_is_scoped_to_layer() {
        let id = object_group_id(&LayerId::from("L1"), "abc");
        assert_eq!(id, "L1_group_abc");
    }
}
