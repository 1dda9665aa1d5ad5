//! Parses and validates the preview shaders with naga, so a WGSL mistake shows
//! up in `cargo test` instead of at pipeline creation.

use spacecast::shader::{BillboardInstance, LineVertex, BILLBOARD_SHADER, LINE_SHADER};

fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code).map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
    module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect()
}

#[test]
fn test_billboard_shader_validates() {
    let module = validate_wgsl(BILLBOARD_SHADER).unwrap();
    let entries = entry_points(&module);
    assert!(entries.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(entries.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_line_shader_validates() {
    let module = validate_wgsl(LINE_SHADER).unwrap();
    let entries = entry_points(&module);
    assert!(entries.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(entries.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn test_vertex_layouts_match_shader_locations() {
    // One attribute per @location in each vertex input
    assert_eq!(BillboardInstance::ATTRIBUTES.len(), 4);
    assert_eq!(LineVertex::ATTRIBUTES.len(), 2);
    for location in 0..4 {
        assert!(BILLBOARD_SHADER.contains(&format!("@location({})", location)));
    }
}
