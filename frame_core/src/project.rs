//! # Project Catalog
//!
//! Materials and cross-sections owned by the project and referenced by id
//! from members and slabs.
//!
//! ## Structure
//!
//! ```text
//! ProjectCatalog
//! ├── materials: [Material]  (C25_FY420, ...)
//! └── sections:  [Section]   (300x600, IPE300, ...)
//! ```
//!
//! Entries keep insertion order, and an id can be added only once: a
//! material or section never changes after members start referencing it.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::materials::Material;
//! use frame_core::project::{ProjectCatalog, DEFAULT_MATERIAL_ID};
//!
//! let mut catalog = ProjectCatalog::default();
//! assert!(catalog.material(DEFAULT_MATERIAL_ID).is_some());
//!
//! catalog.add_material(Material::reinforced_concrete(30.0, 500.0)).unwrap();
//! assert!(catalog.add_material(Material::reinforced_concrete(30.0, 500.0)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{FrameError, FrameResult};
use crate::materials::{Material, Section, SteelCatalog};

/// Material every new project starts with
pub const DEFAULT_MATERIAL_ID: &str = "C25_FY420";

/// Section every new project starts with
pub const DEFAULT_SECTION_ID: &str = "300x600";

/// Materials and sections available to the structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCatalog {
    materials: Vec<Material>,
    sections: Vec<Section>,
}

impl ProjectCatalog {
    /// A catalog with nothing in it
    pub fn empty() -> Self {
        ProjectCatalog {
            materials: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Add a material; `DuplicateId` if the id is taken
    pub fn add_material(&mut self, material: Material) -> FrameResult<()> {
        if self.material(&material.id).is_some() {
            return Err(FrameError::DuplicateId {
                kind: "material".into(),
                id: material.id,
            });
        }
        debug!(material = %material.id, "material added to catalog");
        self.materials.push(material);
        Ok(())
    }

    /// Add a section; `DuplicateId` if the id is taken
    pub fn add_section(&mut self, section: Section) -> FrameResult<()> {
        if self.section(&section.id).is_some() {
            return Err(FrameError::DuplicateId {
                kind: "section".into(),
                id: section.id,
            });
        }
        debug!(section = %section.id, "section added to catalog");
        self.sections.push(section);
        Ok(())
    }

    /// Add a rolled steel section looked up in a steel catalog.
    ///
    /// Returns the new section id (the size designation).
    pub fn add_rolled_section(
        &mut self,
        steel: &impl SteelCatalog,
        section_type: &str,
        size: &str,
    ) -> FrameResult<String> {
        let dims = steel
            .dimensions(section_type, size)
            .ok_or_else(|| FrameError::SectionNotFound {
                section_id: format!("{} {}", section_type, size),
            })?;
        let section = Section::rolled_steel(size.trim(), &dims);
        let id = section.id.clone();
        self.add_section(section)?;
        Ok(id)
    }
}

impl Default for ProjectCatalog {
    /// C25_FY420 concrete and a 300x600 rectangular RC section
    fn default() -> Self {
        ProjectCatalog {
            materials: vec![Material::reinforced_concrete(25.0, 420.0)],
            sections: vec![Section::rect_rc(DEFAULT_SECTION_ID, 0.3, 0.6, 0.04)],
        }
    }
}
