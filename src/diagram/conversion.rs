use super::definition::DiagramDefinition;
use crate::error::DiagramError;

/// A trait for detector output formats that can be converted into a `DiagramDefinition`.
///
/// Shape detectors disagree on how they describe their findings (YOLO boxes, contour
/// lists, swimlane-annotated blocks). Implementing this trait on such a format is the
/// only thing needed to run it through the rest of the pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use flowscribe::diagram::{DiagramDefinition, EdgeRecord, IntoDiagram, NodeRecord};
/// use flowscribe::error::DiagramError;
///
/// struct Block { name: String, class: String, text: String }
/// struct Detection { blocks: Vec<Block>, arrows: Vec<(String, String)> }
///
/// impl IntoDiagram for Detection {
///     fn into_diagram(self) -> Result<DiagramDefinition, DiagramError> {
///         let nodes = self
///             .blocks
///             .into_iter()
///             .map(|b| {
///                 let kind = if b.class == "gateway" { "diamond" } else { "rectangle" };
///                 NodeRecord::new(b.name, kind, b.text)
///             })
///             .collect();
///         let edges = self
///             .arrows
///             .into_iter()
///             .map(|(s, t)| EdgeRecord::new(s, t))
///             .collect();
///         Ok(DiagramDefinition { nodes, edges })
///     }
/// }
/// ```
pub trait IntoDiagram {
    /// Consumes the object and converts it into raw node/edge records.
    fn into_diagram(self) -> Result<DiagramDefinition, DiagramError>;
}

impl IntoDiagram for DiagramDefinition {
    fn into_diagram(self) -> Result<DiagramDefinition, DiagramError> {
        Ok(self)
    }
}
