use sprite_packer_core::model::{Page, Placement, Rect};
use sprite_packer_core::{PackerConfig, pack_layout, to_json_array, to_json_hash, to_tpsheet};

#[test]
fn json_array_carries_pages_rejects_and_meta() {
    let cfg = PackerConfig::builder().max_size(16).alignment(4).build();
    let atlas = pack_layout(vec![("hero", 4, 4), ("big", 20, 20)], cfg).expect("pack");

    let v = to_json_array(&atlas);
    assert_eq!(v["pages"][0]["width"], 4);
    assert_eq!(v["pages"][0]["placements"][0]["key"], "hero");
    assert_eq!(v["pages"][0]["placements"][0]["frame"]["x"], 0);
    assert_eq!(v["rejected"][0]["key"], "big");
    assert_eq!(v["meta"]["app"], "sprite-packer");
    assert_eq!(v["meta"]["max_size"], 16);
}

#[test]
fn json_hash_keys_frames_by_name() {
    let cfg = PackerConfig::builder().max_size(16).alignment(4).build();
    let atlas = pack_layout(vec![("hero", 4, 4)], cfg).expect("pack");

    let v = to_json_hash(&atlas);
    assert_eq!(v["frames"]["hero"]["page"], 0);
    assert_eq!(v["frames"]["hero"]["frame"]["w"], 4);
    assert_eq!(v["frames"]["hero"]["pageSize"]["w"], 4);
}

#[test]
fn tpsheet_flips_y_to_bottom_left_origin() {
    let page = Page {
        id: 0,
        width: 8,
        height: 8,
        placements: vec![Placement {
            key: "hero".into(),
            frame: Rect::new(0, 0, 4, 4),
        }],
    };
    let sheet = to_tpsheet(&page, "atlas_0.png");

    assert!(sheet.starts_with("# Sprite sheet data for Unity.\n"));
    assert!(sheet.contains(":texture=atlas_0.png\n"));
    assert!(sheet.contains(":size=8x8\n"));
    // Placed at y=0 (top), h=4 on an 8-high page: bottom-left y is 4.
    assert!(sheet.contains("\nhero;0;4;4;4; 0.5;0.5;"));
}

#[test]
fn tpsheet_hash_is_stable_for_identical_pages() {
    let page = Page {
        id: 0,
        width: 12,
        height: 8,
        placements: Vec::new(),
    };
    let a = to_tpsheet(&page, "atlas.png");
    let b = to_tpsheet(&page, "atlas.png");
    assert_eq!(a, b);
    assert_ne!(a, to_tpsheet(&page, "other.png"));
}
