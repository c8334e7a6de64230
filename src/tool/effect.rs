use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// One stackable visual effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEffect {
    pub name: String,
    pub intensity: f32,
    pub enabled: bool,
}

impl ToolEffect {
    pub fn new(name: impl Into<String>, intensity: f32) -> Self {
        Self {
            name: name.into(),
            intensity,
            enabled: true,
        }
    }
}

/// Effects in insertion order.
///
/// Effects are applied front to back, so when two touch the same property
/// the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectStack(Vec<ToolEffect>);

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: ToolEffect) {
        self.0.push(effect);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolEffect> {
        self.0.iter()
    }

    /// Enabled effects in application order
    pub fn enabled(&self) -> impl Iterator<Item = &ToolEffect> {
        self.0.iter().filter(|effect| effect.enabled)
    }

    /// Intensity of the last enabled effect with this name
    pub fn intensity_of(&self, name: &str) -> Option<f32> {
        self.enabled()
            .filter(|effect| effect.name == name)
            .last()
            .map(|effect| effect.intensity)
    }
}

impl FromIterator<ToolEffect> for EffectStack {
    fn from_iter<I: IntoIterator<Item = ToolEffect>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Degrees
    pub rotation: f32,
    pub scale: Vec2,
    pub position: Pos2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: Vec2::splat(1.0),
            position: Pos2::ZERO,
        }
    }
}

impl Transform {
    /// Same transform with negative scale components clamped to zero
    pub fn normalized(self) -> Self {
        Self {
            scale: self.scale.max(Vec2::ZERO),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_effect_wins_and_disabled_are_skipped() {
        let mut disabled = ToolEffect::new("torn-edge", 0.9);
        disabled.enabled = false;
        let stack: EffectStack = [
            ToolEffect::new("torn-edge", 0.2),
            ToolEffect::new("crumpled", 1.0),
            ToolEffect::new("torn-edge", 0.6),
            disabled,
        ]
        .into_iter()
        .collect();
        assert_eq!(stack.intensity_of("torn-edge"), Some(0.6));
        assert_eq!(stack.enabled().count(), 3);
        assert_eq!(stack.intensity_of("folded"), None);
    }

    #[test]
    fn normalized_clamps_negative_scale() {
        let transform = Transform {
            scale: Vec2::new(-1.0, 2.0),
            ..Transform::default()
        };
        assert_eq!(transform.normalized().scale, Vec2::new(0.0, 2.0));
    }
}
