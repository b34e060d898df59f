//! Core application logic: state, menu control, event handling and action dispatch.

pub mod action;
pub mod event;
pub mod handler;
pub mod input;
pub mod menu;
pub mod state;
