//! Point-in-solid-tile probe.

use tilewalk_core::{CanonicalPosition, LookupError, TileId};

use crate::layout::WorldLayout;

/// Reports whether the tile under `position` can be walked through.
///
/// Lookups that fail are treated as solid, so callers never step into
/// territory the layout does not define.
#[must_use]
pub fn is_empty(layout: &WorldLayout, position: &CanonicalPosition) -> bool {
    match tile_under(layout, position) {
        Ok(tile) => tile.is_empty(),
        Err(error) => {
            tracing::warn!(%error, ?position, "collision probe failed closed");
            false
        }
    }
}

/// Returns the tile under a canonical position.
pub fn tile_under(
    layout: &WorldLayout,
    position: &CanonicalPosition,
) -> Result<TileId, LookupError> {
    layout
        .grid_of(position)?
        .tile_at(position.tile_x(), position.tile_y())
}
