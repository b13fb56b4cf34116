//! Surface materials and the rules for combining two of them at a contact.
//!
//! Scene assets describe materials with a [`MaterialDescriptor`]. Descriptors are interned by
//! content, so any number of assets with the same five values share a single [`Material`] (and a
//! single [`MaterialHandle`]). Pairs of interned materials can then be given a
//! [`CombinedInteraction`], which decides the friction and restitution the solver uses when
//! bodies with these two materials touch. Pairs without one are left to the physics engine's own
//! combination.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::error::ContactRulesError;
use crate::math::{ContactScalar, Float};
use crate::relation::RelationRegistry;

/// How two scalar material properties merge into one contact coefficient.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CombineMode {
    #[default]
    Average,
    Maximum,
    Minimum,
    /// Also used for any mode value that is not recognized.
    #[cfg_attr(feature = "serialize", serde(other))]
    Multiply,
}

impl CombineMode {
    /// Decode the integer encoding scene assets store combine modes with.
    ///
    /// Unrecognized values fall back to [`CombineMode::Multiply`].
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Average,
            1 => Self::Multiply,
            2 => Self::Minimum,
            3 => Self::Maximum,
            _ => {
                debug!("Unrecognized combine mode {raw}, using Multiply");
                Self::Multiply
            }
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Self::Average => 0,
            Self::Multiply => 1,
            Self::Minimum => 2,
            Self::Maximum => 3,
        }
    }

    pub fn apply<S: ContactScalar>(self, x: S, y: S) -> S {
        match self {
            Self::Average => (x + y).half(),
            Self::Maximum => x.max(y),
            Self::Minimum => x.min(y),
            Self::Multiply => x * y,
        }
    }
}

/// The authored properties of a surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDescriptor {
    pub dynamic_friction: f32,
    pub static_friction: f32,
    pub bounciness: f32,
    pub friction_combine: CombineMode,
    pub bounce_combine: CombineMode,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            dynamic_friction: 0.6,
            static_friction: 0.6,
            bounciness: 0.0,
            friction_combine: CombineMode::Average,
            bounce_combine: CombineMode::Average,
        }
    }
}

impl MaterialDescriptor {
    /// The content key used for deduplication. Equal field values always produce equal keys.
    pub fn key(&self) -> MaterialKey {
        fn canonical_bits(value: f32) -> u32 {
            // `-0.0 == 0.0`, so they must share a key.
            if value == 0.0 {
                0.0_f32.to_bits()
            } else {
                value.to_bits()
            }
        }
        MaterialKey {
            dynamic_friction: canonical_bits(self.dynamic_friction),
            static_friction: canonical_bits(self.static_friction),
            bounciness: canonical_bits(self.bounciness),
            friction_combine: self.friction_combine,
            bounce_combine: self.bounce_combine,
        }
    }

    pub fn validate(&self) -> Result<(), ContactRulesError> {
        for (field, value) in [
            ("dynamic_friction", self.dynamic_friction),
            ("static_friction", self.static_friction),
            ("bounciness", self.bounciness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ContactRulesError::InvalidMaterialDescriptor { field, value });
            }
        }
        Ok(())
    }
}

/// See [`MaterialDescriptor::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    dynamic_friction: u32,
    static_friction: u32,
    bounciness: u32,
    friction_combine: CombineMode,
    bounce_combine: CombineMode,
}

/// An interned material, in the pipeline's numeric representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material<S: ContactScalar = Float> {
    pub static_friction: S,
    pub kinetic_friction: S,
    pub bounciness: S,
}

impl<S: ContactScalar> Material<S> {
    pub fn from_descriptor(descriptor: &MaterialDescriptor) -> Self {
        Self {
            static_friction: S::from_f32(descriptor.static_friction),
            kinetic_friction: S::from_f32(descriptor.dynamic_friction),
            bounciness: S::from_f32(descriptor.bounciness),
        }
    }
}

/// Handle to a [`Material`] interned in a [`MaterialResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialHandle(u32);

impl MaterialHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The coefficients the solver uses for a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionProperties<S: ContactScalar = Float> {
    pub kinetic_friction: S,
    pub static_friction: S,
    pub bounciness: S,
}

/// Which materials a [`CombinedInteraction`] computes its result from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionCapture {
    /// Use the two materials the interaction was defined with, ignoring the materials it is
    /// invoked with. For a registered pair these are normally the same materials, but the
    /// arguments are never consulted.
    #[default]
    DefinitionTime,
    /// Use the materials the interaction is invoked with.
    CallTime,
}

/// A contact combination rule, bound to the two materials it was defined for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedInteraction<S: ContactScalar = Float> {
    material_a: Material<S>,
    material_b: Material<S>,
    friction_combine: CombineMode,
    bounce_combine: CombineMode,
    capture: InteractionCapture,
}

impl<S: ContactScalar> CombinedInteraction<S> {
    pub fn new(
        material_a: Material<S>,
        material_b: Material<S>,
        friction_combine: CombineMode,
        bounce_combine: CombineMode,
        capture: InteractionCapture,
    ) -> Self {
        Self {
            material_a,
            material_b,
            friction_combine,
            bounce_combine,
            capture,
        }
    }

    pub fn friction_combine(&self) -> CombineMode {
        self.friction_combine
    }

    pub fn bounce_combine(&self) -> CombineMode {
        self.bounce_combine
    }

    pub fn capture(&self) -> InteractionCapture {
        self.capture
    }

    /// Compute the contact coefficients for a contact between `a` and `b`.
    ///
    /// With [`InteractionCapture::DefinitionTime`] the arguments are ignored and the result only
    /// depends on the materials this interaction was created with.
    pub fn resolve(&self, a: &Material<S>, b: &Material<S>) -> InteractionProperties<S> {
        match self.capture {
            InteractionCapture::DefinitionTime => self.combine(&self.material_a, &self.material_b),
            InteractionCapture::CallTime => self.combine(a, b),
        }
    }

    fn combine(&self, a: &Material<S>, b: &Material<S>) -> InteractionProperties<S> {
        InteractionProperties {
            kinetic_friction: self
                .friction_combine
                .apply(a.kinetic_friction, b.kinetic_friction),
            static_friction: self
                .friction_combine
                .apply(a.static_friction, b.static_friction),
            bounciness: self.bounce_combine.apply(a.bounciness, b.bounciness),
        }
    }
}

/// Interns materials and holds the combination rules between pairs of them.
#[derive(Resource, Debug, Clone)]
pub struct MaterialResolver<S: ContactScalar = Float> {
    capture: InteractionCapture,
    by_key: HashMap<MaterialKey, MaterialHandle>,
    materials: Vec<Material<S>>,
    interactions: RelationRegistry<MaterialHandle, CombinedInteraction<S>>,
}

impl<S: ContactScalar> Default for MaterialResolver<S> {
    fn default() -> Self {
        Self::new(InteractionCapture::default())
    }
}

impl<S: ContactScalar> MaterialResolver<S> {
    pub fn new(capture: InteractionCapture) -> Self {
        Self {
            capture,
            by_key: Default::default(),
            materials: Vec::new(),
            interactions: Default::default(),
        }
    }

    pub fn capture(&self) -> InteractionCapture {
        self.capture
    }

    /// Get the material for the descriptor, creating it on first sight.
    ///
    /// Equal descriptors always get the same handle. The material is built once; later calls
    /// with an equal descriptor do not touch it.
    pub fn intern(&mut self, descriptor: &MaterialDescriptor) -> MaterialHandle {
        let key = descriptor.key();
        if let Some(handle) = self.by_key.get(&key) {
            return *handle;
        }
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(Material::from_descriptor(descriptor));
        self.by_key.insert(key, handle);
        handle
    }

    /// Like [`intern`](Self::intern), but rejects descriptors with negative or non-finite values.
    pub fn try_intern(
        &mut self,
        descriptor: &MaterialDescriptor,
    ) -> Result<MaterialHandle, ContactRulesError> {
        descriptor.validate()?;
        Ok(self.intern(descriptor))
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material<S>> {
        self.materials.get(handle.index())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Number of material pairs with a registered interaction.
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Register how contacts between `material_a` and `material_b` are combined.
    ///
    /// The two materials are bound into the registered [`CombinedInteraction`] now. Redefining a
    /// pair replaces its interaction, and the replaced one is returned.
    pub fn define_combination(
        &mut self,
        material_a: MaterialHandle,
        material_b: MaterialHandle,
        friction_combine: CombineMode,
        bounce_combine: CombineMode,
    ) -> Result<Option<CombinedInteraction<S>>, ContactRulesError> {
        let a = *self
            .material(material_a)
            .ok_or(ContactRulesError::UnknownMaterial(material_a))?;
        let b = *self
            .material(material_b)
            .ok_or(ContactRulesError::UnknownMaterial(material_b))?;
        let interaction =
            CombinedInteraction::new(a, b, friction_combine, bounce_combine, self.capture);
        let replaced = self.interactions.set(material_a, material_b, interaction);
        if let Some(old) = replaced
            && old != interaction
        {
            debug!(
                "Material combination between {material_a:?} and {material_b:?} redefined from ({:?}, {:?}) to ({friction_combine:?}, {bounce_combine:?})",
                old.friction_combine, old.bounce_combine,
            );
        }
        Ok(replaced)
    }

    pub fn interaction(
        &self,
        material_a: MaterialHandle,
        material_b: MaterialHandle,
    ) -> Option<&CombinedInteraction<S>> {
        self.interactions.get(material_a, material_b)
    }

    /// The contact coefficients for two materials, or `None` if the pair has no registered
    /// interaction and the engine's default combination should be used.
    pub fn resolve(
        &self,
        material_a: MaterialHandle,
        material_b: MaterialHandle,
    ) -> Option<InteractionProperties<S>> {
        let interaction = self.interaction(material_a, material_b)?;
        let a = self.material(material_a)?;
        let b = self.material(material_b)?;
        Some(interaction.resolve(a, b))
    }
}
