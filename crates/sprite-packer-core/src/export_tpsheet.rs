use crate::model::Page;

/// Render one page as a Unity `.tpsheet` sheet (TexturePackerImporter
/// format). `texture_name` is the PNG filename the sheet refers to.
///
/// The importer expects a bottom-left origin, so sprite y coordinates are
/// flipped here and only here; everything upstream stays top-left/y-down.
pub fn to_tpsheet(page: &Page, texture_name: &str) -> String {
    let smart_hash = smart_update_hash(texture_name, page.width, page.height);

    let mut s = String::new();
    s.push_str("# Sprite sheet data for Unity.\n");
    s.push_str(
        "# To import these sprites into your Unity project, download \"TexturePackerImporter\":\n",
    );
    s.push_str("# https://www.codeandweb.com/texturepacker/unity\n\n");
    s.push_str(&format!("# $TexturePacker:SmartUpdate:{}:0:0$\n", smart_hash));
    s.push_str(":format=40300\n");
    s.push_str(&format!(":texture={}\n", texture_name));
    s.push_str(&format!(":size={}x{}\n", page.width, page.height));
    s.push_str(":pivotpoints=enabled\n");
    s.push_str(":borders=disabled\n");
    s.push_str(":alphahandling=ClearTransparentPixels\n\n");

    for pl in &page.placements {
        let f = pl.frame;
        let y_flipped = page.height - f.y - f.h;
        let vertices = format!("4;{w};0;0;0;0;{h};{w};{h}", w = f.w, h = f.h);
        let triangles = "2;1;2;3;0;1;3";
        s.push_str(&format!(
            "{};{};{};{};{}; 0.5;0.5; 0;0;0;0; {}; {}\n",
            pl.key, f.x, y_flipped, f.w, f.h, vertices, triangles
        ));
    }
    s
}

// Content fingerprint for the importer's smart-update check; 32 hex chars to
// match the field width the format ships with.
fn smart_update_hash(texture_name: &str, width: u32, height: u32) -> String {
    let digest = blake3::hash(format!("{}{}x{}", texture_name, width, height).as_bytes());
    digest.to_hex()[..32].to_string()
}
