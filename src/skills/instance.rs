//! Runtime Ability Instances
//!
//! An instance is the per-caster mutable counterpart of a concept: current
//! cooldown and casting/channeling progress. Instances are created by the
//! container factory, advanced once per simulation tick, and discarded when
//! the caster loses the ability. Interruption is only permitted when the
//! concept marks its casting window as a channel.

use bevy::prelude::*;
use std::sync::Arc;

use super::concept::{AbilityConcept, AbilityType};
use super::container::AbilityBehavior;

/// Casting progress of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastPhase {
    Ready,
    /// Hard cast: cannot be interrupted.
    Casting { remaining: u32 },
    /// Channel: may be interrupted externally.
    Channeling { remaining: u32 },
}

/// Why a cast attempt was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastRefused {
    /// Passive abilities are never cast directly.
    NotActive,
    OnCooldown,
    AlreadyCasting,
}

/// Per-caster runtime state of one ability.
#[derive(Component)]
pub struct AbilityInstance {
    concept: Arc<AbilityConcept>,
    behavior: Box<dyn AbilityBehavior>,
    cooldown_remaining: u32,
    phase: CastPhase,
}

impl AbilityInstance {
    pub(crate) fn new(concept: Arc<AbilityConcept>, behavior: Box<dyn AbilityBehavior>) -> Self {
        Self {
            concept,
            behavior,
            cooldown_remaining: 0,
            phase: CastPhase::Ready,
        }
    }

    pub fn concept(&self) -> &AbilityConcept {
        &self.concept
    }

    pub fn phase(&self) -> CastPhase {
        self.phase
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn can_cast(&self) -> bool {
        self.concept.ability_type() != AbilityType::Passive
            && self.cooldown_remaining == 0
            && self.phase == CastPhase::Ready
    }

    /// Begin casting. Instant abilities (no casting ticks) complete on the
    /// spot; otherwise the instance enters its casting or channeling window.
    pub fn try_cast(&mut self) -> Result<(), CastRefused> {
        if self.concept.ability_type() == AbilityType::Passive {
            return Err(CastRefused::NotActive);
        }
        if self.phase != CastPhase::Ready {
            return Err(CastRefused::AlreadyCasting);
        }
        if self.cooldown_remaining > 0 {
            return Err(CastRefused::OnCooldown);
        }

        let ticks = self.concept.casting_ticks();
        if ticks == 0 {
            self.complete_cast();
        } else if self.concept.interruptible() {
            self.phase = CastPhase::Channeling { remaining: ticks };
        } else {
            self.phase = CastPhase::Casting { remaining: ticks };
        }
        Ok(())
    }

    /// Advance one simulation tick: count down the cooldown and any casting
    /// window, completing the cast when its window elapses.
    pub fn tick(&mut self) {
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
        }
        match self.phase {
            CastPhase::Ready => {}
            CastPhase::Casting { remaining } => {
                if remaining <= 1 {
                    self.complete_cast();
                } else {
                    self.phase = CastPhase::Casting {
                        remaining: remaining - 1,
                    };
                }
            }
            CastPhase::Channeling { remaining } => {
                if remaining <= 1 {
                    self.complete_cast();
                } else {
                    self.phase = CastPhase::Channeling {
                        remaining: remaining - 1,
                    };
                }
            }
        }
    }

    /// Externally cancel an in-progress cast. Only channels can be
    /// interrupted; returns whether anything was cancelled. An interrupted
    /// channel does not trigger its cooldown.
    pub fn interrupt(&mut self) -> bool {
        match self.phase {
            CastPhase::Channeling { .. } => {
                self.phase = CastPhase::Ready;
                true
            }
            CastPhase::Ready | CastPhase::Casting { .. } => false,
        }
    }

    fn complete_cast(&mut self) {
        self.behavior.on_cast(&self.concept);
        self.cooldown_remaining = self.concept.cooldown_ticks();
        self.phase = CastPhase::Ready;
    }
}

/// Advance every ability instance by one tick. Registered on `FixedUpdate`
/// by the skills plugin; per-instance state is owned by its caster entity,
/// so no synchronization is involved.
pub fn tick_ability_instances(mut instances: Query<&mut AbilityInstance>) {
    for mut instance in &mut instances {
        instance.tick();
    }
}
