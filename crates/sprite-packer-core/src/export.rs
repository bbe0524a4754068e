use crate::model::Atlas;
use serde_json::{Value, json};

/// Serialize the whole `Atlas` as a JSON object `{ pages, rejected, meta }`
/// (array-of-pages style). Suitable for generic tooling and simple
/// consumption.
pub fn to_json_array(atlas: &Atlas) -> Value {
    let pages_val = atlas
        .pages
        .iter()
        .map(|p| {
            let placements: Vec<Value> = p
                .placements
                .iter()
                .map(|pl| {
                    json!({
                        "key": pl.key,
                        "frame": {"x": pl.frame.x, "y": pl.frame.y, "w": pl.frame.w, "h": pl.frame.h},
                    })
                })
                .collect();
            json!({
                "id": p.id,
                "width": p.width,
                "height": p.height,
                "placements": placements,
            })
        })
        .collect::<Vec<_>>();
    json!({"pages": pages_val, "rejected": &atlas.rejected, "meta": &atlas.meta})
}

/// Flatten placements keyed by name, include page id/size hints.
/// Shape: `{ frames: { name: { frame, page, pageSize } }, rejected, meta }`.
/// Compatible with pipelines expecting TexturePacker-like JSON hash.
pub fn to_json_hash(atlas: &Atlas) -> Value {
    let mut frames = serde_json::Map::new();
    for page in &atlas.pages {
        for pl in &page.placements {
            frames.insert(
                pl.key.clone(),
                json!({
                    "frame": {"x": pl.frame.x, "y": pl.frame.y, "w": pl.frame.w, "h": pl.frame.h},
                    "page": page.id,
                    "pageSize": {"w": page.width, "h": page.height},
                }),
            );
        }
    }
    json!({"frames": frames, "rejected": &atlas.rejected, "meta": &atlas.meta})
}
