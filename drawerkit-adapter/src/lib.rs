//! Adapter utilities for the `drawerkit` crate.
//!
//! The `drawerkit` crate is UI-agnostic and hands every transition back to the host as an
//! animation request. This crate provides small, framework-neutral helpers for running them:
//!
//! - Tweens and easing curves matching drawerkit's timing curves
//! - An [`Animator`] seam with a tween-based implementation
//! - A tick-driven [`Controller`] that owns a drawer and runs its transitions
//!
//! This crate is framework-agnostic (no winit/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod animator;
mod controller;
mod tween;

#[cfg(test)]
mod tests;

pub use animator::{Animator, AnimatorSample, TweenAnimator};
pub use controller::Controller;
pub use tween::{Easing, Tween, secs_to_ms};
