//! Host contracts: the scene graph and the controller input
//!
//! The viewer only talks to the rendering and XR runtime through these two
//! traits. Implementations own the GPU side; the viewer owns the content.

use crate::mesh::Mesh;
use crate::stage::Stage;
use std::fmt;

/// Handle of a node inserted into a [`SceneHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Scene graph port
///
/// Every call happens on the frame loop; implementations need no locking.
pub trait SceneHost {
    /// Installs camera rig, light and controller
    fn set_stage(&mut self, stage: &Stage);

    /// Viewport changed
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Uploads the mesh resources and inserts it as a new node
    fn add(&mut self, mesh: Mesh) -> NodeId;

    /// Detaches a node; its resources stay allocated until [`SceneHost::dispose`]
    fn remove(&mut self, id: NodeId) -> Option<Mesh>;

    /// Releases the geometry and material resources of a detached mesh
    fn dispose(&mut self, mesh: Mesh);

    /// Draws one frame
    fn render(&mut self);
}

/// State of one component of a motion controller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentState {
    pub id: String,
    /// Button value, 1.0 when fully pressed
    pub button: f32,
    pub x_axis: f32,
    pub y_axis: f32,
}

impl ComponentState {
    pub fn button(id: impl Into<String>, value: f32) -> Self {
        Self {
            id: id.into(),
            button: value,
            ..Self::default()
        }
    }
}

/// Controller input port
pub trait InputSource {
    /// Input-state sequence of a controller, `None` when it is not connected
    fn input_state(&mut self, controller: usize) -> Option<Vec<ComponentState>>;
}
