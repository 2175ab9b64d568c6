use crate::projector::{SCREEN_HEIGHT, SCREEN_WIDTH, ShapeSet};

/// Renderer-agnostic interface. All render sinks implement this trait.
///
/// A sink reads a projected shape set and produces output. It never sees
/// world state or the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, shapes: &ShapeSet) -> Self::Output;
}

/// Human-readable frame summary for the CLI and logs.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// How many of the nearest dots to list.
    pub nearest: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { nearest: 3 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, shapes: &ShapeSet) -> String {
        let mut out = String::new();
        let id = shapes.id.0.simple().to_string();
        out.push_str(&format!("=== Shapes (set={}) ===\n", &id[..8]));
        out.push_str(&format!(
            "Dots: {} (visible {})\n",
            shapes.dots.len(),
            shapes.visible_dots()
        ));
        out.push_str(&format!(
            "Paths: {} (visible {})\n",
            shapes.paths.len(),
            shapes.visible_paths()
        ));
        // Dots are sorted far to near.
        for dot in shapes
            .dots
            .iter()
            .rev()
            .filter(|d| d.is_visible())
            .take(self.nearest)
        {
            out.push_str(&format!(
                "  [{}] at=({:.1}, {:.1}) dist={:.3} r={:.1}\n",
                dot.id, dot.left, dot.top, dot.dist, dot.radius
            ));
        }
        out
    }
}

/// Standalone SVG document, one element per shape.
#[derive(Debug, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }
}

const INVISIBLE: &str = r#" class="shape--invisible""#;

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, shapes: &ShapeSet) -> String {
        let mut out = String::with_capacity(64 * (shapes.dots.len() + shapes.paths.len()) + 256);
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = SCREEN_WIDTH,
            h = SCREEN_HEIGHT
        ));
        for path in &shapes.paths {
            out.push_str(&format!(
                "  <path id=\"{}\" d=\"{}\" fill=\"none\" stroke=\"black\"{}/>\n",
                path.id,
                path.d,
                if path.visible { "" } else { INVISIBLE }
            ));
        }
        for dot in &shapes.dots {
            out.push_str(&format!(
                "  <circle id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{}/>\n",
                dot.id,
                dot.left,
                dot.top,
                dot.radius,
                if dot.is_visible() { "" } else { INVISIBLE }
            ));
        }
        out.push_str("</svg>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::Projector;
    use glam::DVec3;
    use pointstage_common::{CameraPose, SpacePath};
    use pointstage_kernel::WorldState;

    fn sample() -> ShapeSet {
        let pose = CameraPose {
            position: DVec3::ZERO,
            ..CameraPose::default()
        };
        let state = WorldState {
            dots: vec![
                DVec3::new(0.0, 0.0, 2.0),
                DVec3::new(0.0, 0.0, -3.0),
                DVec3::new(1.0, 1.0, 10.0),
            ],
            paths: vec![
                SpacePath::new(vec![DVec3::new(0.0, 0.0, 2.0), DVec3::new(1.0, 0.0, 2.0)], false)
                    .unwrap(),
                SpacePath::new(vec![DVec3::new(0.0, 0.0, -2.0)], false).unwrap(),
            ],
        };
        Projector::new().project(&state, &pose).unwrap().clone()
    }

    #[test]
    fn debug_renderer_counts() {
        let output = DebugTextRenderer::new().render(&sample());
        assert!(output.contains("Dots: 3 (visible 2)"));
        assert!(output.contains("Paths: 2 (visible 1)"));
        assert!(output.contains("circle_"));
    }

    #[test]
    fn debug_renderer_lists_nearest_first() {
        let shapes = sample();
        let output = DebugTextRenderer { nearest: 1 }.render(&shapes);
        let nearest = shapes.dots.last().unwrap();
        assert!(output.contains(&nearest.id));
        assert_eq!(output.lines().filter(|l| l.starts_with("  [")).count(), 1);
    }

    #[test]
    fn svg_has_one_element_per_shape() {
        let svg = SvgRenderer::new().render(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1280" height="720""#));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn each_element_is_on_its_own_line() {
        let shapes = sample();
        let svg = SvgRenderer::new().render(&shapes);
        assert_eq!(svg.lines().count(), 1 + 2 + 3 + 1);
        let text = DebugTextRenderer::new().render(&shapes);
        assert_eq!(text.lines().count(), 3 + shapes.visible_dots());
        assert!(text.lines().nth(1).unwrap().starts_with("Dots: 3"));
    }

    #[test]
    fn svg_marks_hidden_shapes() {
        let shapes = sample();
        let svg = SvgRenderer::new().render(&shapes);
        assert_eq!(svg.matches("shape--invisible").count(), 2);
        let hidden = &shapes.dots[0];
        let line = svg.lines().find(|l| l.contains(&hidden.id)).unwrap();
        assert!(line.contains("shape--invisible"));
    }
}
