//! Cascade: turning merged declarations into a fully populated computed style.
//!
//! Declarations are applied first-write-wins, so callers pass blocks in
//! priority order (the merged block from the style cache already is). After
//! the declarations, every slot still unset receives its property's initial
//! value, so a cascaded record never has a hole.

use weft_common::warning::warn_once;

use crate::computed::{ComputedStyle, Origin};
use crate::declaration::DeclarationBlock;
use crate::error::Result;
use crate::registry::{Keyword, PropertyRegistry};

/// Apply `block` to every slot of `computed` not yet written from a declaration.
///
/// Each value goes through its property family's cascade step. A rejected
/// value falls back to the property's initial value, and `initial` is
/// replaced by it. `inherit` is kept for [`apply_inheritance`].
pub fn apply_declarations(
    registry: &PropertyRegistry,
    block: &DeclarationBlock,
    computed: &mut ComputedStyle,
) {
    for declaration in block {
        if declaration.value.is_absent() || computed.is_set(declaration.key) {
            continue;
        }
        let Some(def) = registry.property_def(declaration.key) else {
            warn_once(
                "CSS",
                &format!("ignoring unknown property key {}", declaration.key.0),
            );
            continue;
        };
        let value = match def.family.cascade(&declaration.value) {
            Some(value) if value.is_keyword(Keyword::Initial) => def.initial.clone(),
            Some(value) => value,
            None => {
                warn_once(
                    "CSS",
                    &format!(
                        "invalid value {} for {}, using initial value",
                        declaration.value.describe(registry),
                        def.name
                    ),
                );
                def.initial.clone()
            }
        };
        computed.write(declaration.key, Origin::Declared, value);
    }
}

/// Give every slot not written from a declaration its initial value.
pub fn fill_defaults(registry: &PropertyRegistry, computed: &mut ComputedStyle) {
    for def in registry.properties() {
        if !computed.is_set(def.key) {
            computed.write(def.key, Origin::Initial, def.initial.clone());
        }
    }
}

/// Replace `inherit` values with the parent's value for the same property,
/// or with the initial value when there is no parent.
pub fn apply_inheritance(
    registry: &PropertyRegistry,
    parent: Option<&ComputedStyle>,
    computed: &mut ComputedStyle,
) {
    for def in registry.properties() {
        if !computed.get(def.key).is_keyword(Keyword::Inherit) {
            continue;
        }
        let value = parent
            .map(|parent| parent.get(def.key))
            .filter(|value| !value.is_absent())
            .map_or_else(|| def.initial.clone(), Clone::clone);
        computed.update(def.key, value);
    }
}

/// Grow `computed` to the registry's size, then apply `block` and fill defaults.
///
/// # Errors
///
/// Returns [`crate::error::StyleError::AllocationFailure`] if the record cannot grow.
pub fn cascade_style(
    registry: &PropertyRegistry,
    block: &DeclarationBlock,
    computed: &mut ComputedStyle,
) -> Result<()> {
    computed.grow(registry.property_count())?;
    apply_declarations(registry, block, computed);
    fill_defaults(registry, computed);
    Ok(())
}
