//! Workspace layout description.
//!
//! The tiling/docking algorithm itself is an external collaborator; this is
//! only the ordered description handed to it: tab groups with relative
//! weights, each listing slot identifiers in their string form.

/// One tab group (a tile holding a tab row).
#[derive(Debug, Clone)]
pub struct GroupSpec {
    /// Relative horizontal weight of the tile.
    pub weight: u16,
    pub tabs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LayoutSpec {
    pub groups: Vec<GroupSpec>,
}

/// Default workspace: project panels left, documents center, inspector
/// right. Panel slots carry an empty name (`tree::`), document slots a
/// document name (`script::mario`).
pub fn default_layout() -> LayoutSpec {
    LayoutSpec {
        groups: vec![
            GroupSpec {
                weight: 1,
                tabs: vec!["tree::".into(), "files::".into()],
            },
            GroupSpec {
                weight: 3,
                tabs: vec![
                    "scene::mario".into(),
                    "script::mario".into(),
                    "script::goomba".into(),
                ],
            },
            GroupSpec {
                weight: 1,
                tabs: vec!["inspector::".into()],
            },
        ],
    }
}
