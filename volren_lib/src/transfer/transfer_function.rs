use std::fmt;

use log::{debug, warn};

use crate::{
    color::Color,
    defaults::{LIVE_DENSITY, LIVE_INTENSITY, TF_SLOT_COUNT},
    shader::{names, UniformDelta},
    Result, VolumeError,
};

/// Committed transfer function sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// <0;1>
    pub density: f32,
    /// <0;1>
    pub intensity: f32,
    pub color: Color,
}

impl ControlPoint {
    pub fn new(density: f32, intensity: f32, color: Color) -> ControlPoint {
        ControlPoint {
            density,
            intensity,
            color,
        }
    }
}

// Shown with two decimals, trailing zeros dropped
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Density: {}, Intensity: {}, Color: {}",
            round2(self.density),
            round2(self.intensity),
            self.color
        )
    }
}

/// Point under the pointer, not yet committed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivePoint {
    pub density: f32,
    pub intensity: f32,
}

impl Default for LivePoint {
    fn default() -> Self {
        LivePoint {
            density: LIVE_DENSITY,
            intensity: LIVE_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Filled(ControlPoint),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn point(&self) -> Option<&ControlPoint> {
        match self {
            Slot::Empty => None,
            Slot::Filled(point) => Some(point),
        }
    }

    /// Color of the slot, white when empty
    pub fn color(&self) -> Color {
        self.point().map(|p| p.color).unwrap_or_default()
    }

    /// Text shown next to the slot's clear button, `index` counted from 0
    pub fn label(&self, index: usize) -> String {
        match self {
            Slot::Empty => format!("{}. no value selected", index + 1),
            Slot::Filled(point) => point.to_string(),
        }
    }
}

/// Fixed row of control point slots plus the live point
///
/// Slots are filled in index order, first empty slot wins.
/// A filled slot keeps its values until cleared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferFunctionModel {
    slots: [Slot; TF_SLOT_COUNT],
    live: LivePoint,
}

impl TransferFunctionModel {
    pub fn new() -> TransferFunctionModel {
        Default::default()
    }

    /// Move the live point
    ///
    /// Values are expected in <0;1>, they are not clamped here.
    /// Returns the `iso_value` change to push to the first-hit program.
    pub fn update_live(&mut self, density: f32, intensity: f32) -> UniformDelta {
        self.live = LivePoint { density, intensity };
        debug!("Live point moved to ({density}, {intensity})");
        UniformDelta::new(names::ISO_VALUE, density)
    }

    pub fn live(&self) -> LivePoint {
        self.live
    }

    /// Store the live point with `color` in the first empty slot
    ///
    /// Returns the slot index, `None` if every slot is filled.
    /// A full model is left unchanged.
    pub fn commit(&mut self, color: Color) -> Option<usize> {
        match self.try_commit(color) {
            Ok(index) => Some(index),
            Err(_) => {
                warn!("Transfer function is full, sample not saved");
                None
            }
        }
    }

    /// Like [`commit`](TransferFunctionModel::commit), reports a full model as an error
    pub fn try_commit(&mut self, color: Color) -> Result<usize> {
        let index = self
            .slots
            .iter()
            .position(Slot::is_empty)
            .ok_or(VolumeError::CapacityExceeded(TF_SLOT_COUNT))?;

        let point = ControlPoint::new(self.live.density, self.live.intensity, color);
        self.slots[index] = Slot::Filled(point);
        debug!("Slot {index} set to {point}");
        Ok(index)
    }

    /// Reset slot `index` to empty
    pub fn clear_slot(&mut self, index: usize) -> Result<()> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            VolumeError::ContractViolation(format!(
                "slot index {index} out of range 0..{TF_SLOT_COUNT}"
            ))
        })?;
        *slot = Slot::Empty;
        Ok(())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Filled slots with their index, for chart markers
    pub fn markers(&self) -> impl Iterator<Item = (usize, &ControlPoint)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.point().map(|p| (i, p)))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::shader::UniformValue;

    const RED: Color = Color::new(255, 0, 0);

    fn filled_model() -> TransferFunctionModel {
        let mut model = TransferFunctionModel::new();
        for i in 0..TF_SLOT_COUNT {
            model.update_live(i as f32 / 10.0, 1.0 - i as f32 / 10.0);
            assert_eq!(model.commit(RED), Some(i));
        }
        model
    }

    #[test]
    fn starts_empty() {
        let model = TransferFunctionModel::new();

        assert!(model.slots().iter().all(Slot::is_empty));
        assert_eq!(model.markers().count(), 0);
        assert_eq!(
            model.live(),
            LivePoint {
                density: 0.3,
                intensity: 1.0
            }
        );
    }

    #[test]
    fn live_update_feeds_iso_value() {
        let mut model = TransferFunctionModel::new();
        let delta = model.update_live(0.42, 0.1);

        assert_eq!(delta.name, names::ISO_VALUE);
        assert_eq!(delta.value, UniformValue::Float(0.42));
        assert_eq!(model.live().intensity, 0.1);
    }

    #[test]
    fn commit_into_first_slot() {
        let mut model = TransferFunctionModel::new();
        model.update_live(0.5, 0.8);

        assert_eq!(model.commit("#ff0000".parse().unwrap()), Some(0));
        assert_eq!(
            model.slot(0),
            Some(&Slot::Filled(ControlPoint::new(0.5, 0.8, RED)))
        );
        assert!(model.slots()[1..].iter().all(Slot::is_empty));
    }

    #[test]
    fn sixth_commit_is_ignored() {
        let mut model = filled_model();
        let before = model.clone();

        model.update_live(0.9, 0.9);
        assert_eq!(model.commit(Color::WHITE), None);
        assert_eq!(model, TransferFunctionModel { live: model.live, ..before });
        assert!(model.is_full());
    }

    #[test]
    fn try_commit_reports_capacity() {
        let mut model = filled_model();
        assert!(matches!(
            model.try_commit(RED),
            Err(VolumeError::CapacityExceeded(5))
        ));
    }

    #[test]
    fn clear_touches_one_slot() {
        let mut model = filled_model();
        let before = model.clone();

        model.clear_slot(2).unwrap();

        for (i, (slot, old)) in model.slots().iter().zip(before.slots()).enumerate() {
            if i == 2 {
                assert_eq!(*slot, Slot::Empty);
                assert_eq!(slot.color(), Color::WHITE);
            } else {
                assert_eq!(slot, old);
            }
        }

        // freed slot is reused first
        model.update_live(0.25, 0.75);
        assert_eq!(model.commit(RED), Some(2));
    }

    #[test]
    fn clear_out_of_range() {
        let mut model = TransferFunctionModel::new();
        assert!(matches!(
            model.clear_slot(5),
            Err(VolumeError::ContractViolation(_))
        ));
        // clearing an empty slot is fine
        model.clear_slot(4).unwrap();
    }

    #[test]
    fn labels() {
        let point = ControlPoint::new(0.456, 0.8, RED);
        assert_eq!(
            Slot::Filled(point).label(0),
            "Density: 0.46, Intensity: 0.8, Color: #ff0000"
        );
        assert_eq!(Slot::Empty.label(3), "4. no value selected");
    }
}
