use serde::{Deserialize, Serialize};

/// A spacing value in px, rendered as `--<category>-<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingVariable {
    pub id: String,
    pub name: String,
    pub value: u32,
}

/// Named group of spacing variables, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingCategory {
    pub id: String,
    pub name: String,
    pub expanded: bool,
    pub variables: Vec<SpacingVariable>,
}

/// Value given to a freshly added variable.
pub const DEFAULT_SPACING_VALUE: u32 = 8;

impl SpacingCategory {
    fn with_scale(id: &str, name: &str, scale: &[(&str, &str, u32)]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expanded: false,
            variables: scale
                .iter()
                .map(|(id, name, value)| SpacingVariable {
                    id: (*id).into(),
                    name: (*name).into(),
                    value: *value,
                })
                .collect(),
        }
    }

    pub fn variable_mut(&mut self, id: &str) -> Option<&mut SpacingVariable> {
        self.variables.iter_mut().find(|v| v.id == id)
    }
}

pub fn builtin_spacing_categories() -> Vec<SpacingCategory> {
    let mut layout = SpacingCategory::with_scale(
        "layout",
        "Layout",
        &[("sm", "Small gap", 8), ("md", "Medium gap", 16), ("lg", "Large gap", 32)],
    );
    layout.expanded = true;
    vec![
        layout,
        SpacingCategory::with_scale(
            "component",
            "Component",
            &[("xs", "Inset extra small", 4), ("sm", "Inset small", 8), ("md", "Inset medium", 12)],
        ),
    ]
}
