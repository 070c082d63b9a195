#![warn(clippy::all, clippy::pedantic)]

//! The render-sink contract between the game core and a presentation layer.
//!
//! The core never touches presentation directly; it narrates state changes
//! through this trait. Every method defaults to a no-op, so a missing or
//! partial sink degrades silently and headless tests can run the full game
//! loop with [`NullSink`].

use bevy_ecs::prelude::Entity;

use crate::components::{Lane, ReactionPolarity};

pub trait RenderSink {
    /// A new item entered the playfield. The entity id doubles as the
    /// visual id for later position updates and removal.
    fn create_item(&mut self, _id: Entity, _icon: &'static str, _lane: Lane, _y: f32) {}

    fn update_item_position(&mut self, _id: Entity, _y: f32) {}

    fn remove_item(&mut self, _id: Entity) {}

    fn set_catcher_position(&mut self, _lane: Lane) {}

    /// Show a transient reaction message; superseded by the next call or by
    /// `clear_reaction`.
    fn set_reaction(&mut self, _text: &'static str, _polarity: ReactionPolarity) {}

    fn clear_reaction(&mut self) {}

    fn set_display(&mut self, _score: u32, _time_remaining: u32, _level: u32) {}
}

/// Sink used when no presentation layer is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {}
