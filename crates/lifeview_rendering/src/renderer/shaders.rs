//! WGSL source for the point-sprite pipeline.

/// Point-sprite shader.
///
/// Each instance is one alive cell index; six vertices expand it into a
/// square `scale` pixels wide centred on the cell.
///
/// ```text
/// index ──► (x, y) = (i mod side, -floor(i / side))
///       ──► field space  [-1, 1], centred in the cell
///       ──► (pos + offset) * scale
///       ──► pixels: * side / resolution
/// ```
pub const POINT_SHADER: &str = r"
struct ViewUniforms {
    dimensions: vec2<f32>,
    resolution: vec2<f32>,
    transform: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> view: ViewUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) corner_index: u32,
    @location(0) cell_index: f32,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );

    let side = view.dimensions.x;
    let cell = vec2<f32>(cell_index % side, -floor(cell_index / side));

    var pos = 2.0 * cell / view.dimensions + vec2<f32>(-1.0, 1.0);
    pos = pos + vec2<f32>(1.0, -1.0) / view.dimensions;
    pos = (pos + view.transform.xy) * view.transform.z;
    pos = pos * view.dimensions / view.resolution;

    // One sprite is `scale` pixels wide; a pixel spans 2 / resolution in NDC.
    let sprite = corners[corner_index] * 2.0 * view.transform.z / view.resolution;

    var out: VertexOutput;
    out.position = vec4<f32>(pos + sprite, 0.0, 1.0);
    return out;
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
";

/// Vertices emitted per point sprite.
pub(crate) const VERTICES_PER_POINT: u32 = 6;
