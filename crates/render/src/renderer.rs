use glam::{Mat4, Vec3};
use skyway_common::Transform;
use skyway_scene::SceneGraph;

/// Camera output consumed by renderers.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// World-to-view matrix.
    pub view: Mat4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, -5.0),
            view: Mat4::IDENTITY,
            fov_degrees: 45.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and a view, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &SceneGraph, view: &RenderView) -> Self::Output;
}

/// Text frame renderer, the workaround for a GPU backend.
///
/// Produces a human-readable string: one line for the camera (eye plus the
/// view rotation recovered from the view matrix), one line per scene node
/// with its resolved world position. Useful for CLI output, logging, and
/// testing the render interface.
#[derive(Debug, Default)]
pub struct TextFrameRenderer;

impl TextFrameRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TextFrameRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frame (nodes={}) ===\n", scene.len()));
        // The view matrix's translation is the rotated negative eye, so only
        // the recovered rotation adds information next to the eye field.
        let rot = Transform::from_matrix(&view.view).rotation;
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) rot=({:+.2}, {:+.2}, {:+.2}, {:+.2}) fov={:.0}\n",
            view.eye.x, view.eye.y, view.eye.z, rot.x, rot.y, rot.z, rot.w, view.fov_degrees
        ));

        let worlds = scene.world_transforms();
        for (node, world) in scene.nodes().iter().zip(&worlds) {
            let p = world.transform_point3(Vec3::ZERO);
            out.push_str(&format!(
                "  {}: pos=({:.2}, {:.2}, {:.2})\n",
                node.name, p.x, p.y, p.z
            ));
        }

        tracing::trace!(nodes = scene.len(), "text frame rendered");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn text_renderer_empty_scene() {
        let scene = SceneGraph::new();
        let renderer = TextFrameRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("nodes=0"));
        assert!(output.contains("Camera: eye="));
        // An identity view decomposes to the identity rotation.
        assert!(output.contains("rot=(+0.00, +0.00, +0.00, +1.00)"));
    }

    #[test]
    fn camera_line_shows_the_view_rotation() {
        let scene = SceneGraph::new();
        let view = RenderView {
            view: Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            ..RenderView::default()
        };
        let output = TextFrameRenderer::new().render(&scene, &view);

        // A quarter turn about Y recovered from the matrix.
        assert!(
            output.contains("rot=(+0.00, +0.71, +0.00, +0.71)"),
            "{output}"
        );
    }

    #[test]
    fn text_renderer_prints_world_positions() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(
            "car.0",
            Transform::from_position_rotation(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY),
        );
        scene
            .add_child(
                "trailer",
                root,
                Transform::from_position_rotation(Vec3::new(0.0, 0.0, -4.0), Quat::IDENTITY),
            )
            .unwrap();

        let renderer = TextFrameRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("nodes=2"));
        assert!(output.contains("car.0: pos=(1.00, 2.00, 3.00)"));
        // The trailer position is resolved through its parent.
        assert!(output.contains("trailer: pos=(1.00, 2.00, -1.00)"));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 45.0);
        assert_eq!(view.view, Mat4::IDENTITY);
    }
}
