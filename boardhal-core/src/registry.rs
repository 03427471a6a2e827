//! Context registry
//!
//! Fixed-size arena of contexts indexed by board slot. The registry only
//! does bookkeeping; hardware bring-up and teardown around it are the
//! caller's job (see [`crate::Hal`]).

use boardhal_hal::PinId;

use crate::context::{Access, Context, PeripheralKind, Payload};
use crate::error::RegistryError;

/// Outcome of [`Registry::acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acquired {
    /// New context created; hardware must be brought up
    Created,
    /// Joined an existing context; holds the new share count
    Joined(u8),
    /// Greedy request took over an existing context
    Seized,
}

/// Outcome of [`Registry::bind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bound {
    /// New context created; hardware must be brought up
    Created,
    /// A context of the same kind already existed
    Existing,
}

/// Outcome of [`Registry::release`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Released {
    /// Counter reached zero; the removed context must be torn down
    Freed(Context),
    /// Other users remain
    Retained(u8),
}

/// Arena of per-pin contexts
pub struct Registry<const N: usize> {
    slots: [Option<Context>; N],
}

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Registry<N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Table capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop every context without touching hardware
    pub fn clear(&mut self) {
        self.slots = [None; N];
    }

    /// Context in a slot
    pub fn get(&self, slot: usize) -> Option<&Context> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Mutable context in a slot
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Context> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Number of live contexts
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate over live contexts in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Context> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn entry(&mut self, slot: usize, pin: PinId) -> Result<&mut Option<Context>, RegistryError> {
        self.slots
            .get_mut(slot)
            .ok_or(RegistryError::InvalidPin(pin))
    }

    /// Request a pin under an access policy
    ///
    /// An empty slot gets a fresh context with `payload`. An occupied slot
    /// must hold the same kind; then `Weak` fails, `Shared` increments the
    /// counter (unless the holder is greedy) and `Greedy` resets it to one.
    pub fn acquire(
        &mut self,
        slot: usize,
        pin: PinId,
        access: Access,
        payload: Payload,
    ) -> Result<Acquired, RegistryError> {
        let entry = self.entry(slot, pin)?;
        if entry.is_none() {
            *entry = Some(Context::new(pin, access, payload));
            return Ok(Acquired::Created);
        }
        let ctx = entry.as_mut().ok_or(RegistryError::NotBound(pin))?;

        check_kind(ctx, payload.kind())?;

        match access {
            Access::Weak => Err(RegistryError::Busy(pin)),
            Access::Shared => {
                if ctx.access == Access::Greedy {
                    return Err(RegistryError::Busy(pin));
                }
                ctx.users = ctx.users.checked_add(1).ok_or(RegistryError::Busy(pin))?;
                Ok(Acquired::Joined(ctx.users))
            }
            Access::Greedy => {
                ctx.users = 1;
                ctx.access = Access::Greedy;
                Ok(Acquired::Seized)
            }
        }
    }

    /// Bind a pin lazily without touching the share counter
    pub fn bind(
        &mut self,
        slot: usize,
        pin: PinId,
        payload: Payload,
    ) -> Result<Bound, RegistryError> {
        let entry = self.entry(slot, pin)?;
        if let Some(ctx) = entry.as_ref() {
            check_kind(ctx, payload.kind())?;
            return Ok(Bound::Existing);
        }
        *entry = Some(Context::new(pin, Access::Shared, payload));
        Ok(Bound::Created)
    }

    /// Drop one reference to a pin
    pub fn release(&mut self, slot: usize, pin: PinId) -> Result<Released, RegistryError> {
        let entry = self.entry(slot, pin)?;
        let ctx = entry.as_mut().ok_or(RegistryError::NotBound(pin))?;

        ctx.users = ctx.users.saturating_sub(1);
        if ctx.users > 0 {
            return Ok(Released::Retained(ctx.users));
        }

        // Counter hit zero: remove it
        entry
            .take()
            .map(Released::Freed)
            .ok_or(RegistryError::NotBound(pin))
    }

    /// Remove a context regardless of its share counter
    pub fn discard(&mut self, slot: usize) -> Option<Context> {
        self.slots.get_mut(slot).and_then(Option::take)
    }
}

fn check_kind(ctx: &Context, requested: PeripheralKind) -> Result<(), RegistryError> {
    let bound = ctx.kind();
    if bound != requested {
        return Err(RegistryError::TypeConflict {
            pin: ctx.pin,
            bound,
            requested,
        });
    }
    Ok(())
}
