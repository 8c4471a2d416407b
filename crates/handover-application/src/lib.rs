//! Application layer for Handover.
//!
//! This crate provides use case implementations that coordinate the core
//! dialog engine with directory providers: seeding sessions, running
//! stale-safe searches, and driving the Forward and Guest-Invite dialogs.

pub mod dialog_usecase;
pub mod forward;
pub mod invite;

pub use dialog_usecase::DialogUseCase;
pub use forward::{ForwardUseCase, TypeFilter};
pub use invite::{GuestInvitePick, GuestInviteUseCase};
